//! Behaviour-driven tests covering default locale resolution.

use std::cell::RefCell;
use std::str::FromStr;

mod support;

use numfmt::{LocaleSelection, LocaleSource, NumberFormats, normalise_locale, resolve_locale};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use support::locale::StepLocale;

#[derive(Default)]
struct SelectionWorld {
    explicit: RefCell<Option<String>>,
    environment: RefCell<Option<String>>,
    configuration: RefCell<Option<String>>,
    selection: RefCell<Option<LocaleSelection>>,
}

impl SelectionWorld {
    fn with_selection<R>(&self, check: impl FnOnce(&LocaleSelection) -> R) -> R {
        let borrow = self.selection.borrow();
        let selection = borrow
            .as_ref()
            .unwrap_or_else(|| panic!("the locale should have been resolved"));
        check(selection)
    }
}

#[fixture]
fn world() -> SelectionWorld {
    SelectionWorld::default()
}

/// Locale source named in a step (`explicit`, `environment`, ...).
#[derive(Debug)]
struct StepSource(LocaleSource);

impl FromStr for StepSource {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let source = match input.trim().to_lowercase().as_str() {
            "explicit" => LocaleSource::ExplicitArgument,
            "environment" => LocaleSource::EnvironmentVariable,
            "configuration" => LocaleSource::Configuration,
            "fallback" => LocaleSource::Fallback,
            other => return Err(format!("unknown locale source '{other}'")),
        };
        Ok(Self(source))
    }
}

#[given("no explicit locale override is provided")]
fn no_explicit(world: &SelectionWorld) {
    world.explicit.borrow_mut().take();
}

#[given("the explicit locale override is {value}")]
fn set_explicit(world: &SelectionWorld, value: StepLocale) {
    world.explicit.borrow_mut().replace(value.into_inner());
}

#[given("the environment does not set NUMFMT_LOCALE")]
fn clear_environment(world: &SelectionWorld) {
    world.environment.borrow_mut().take();
}

#[given("NUMFMT_LOCALE is {value}")]
fn set_environment(world: &SelectionWorld, value: StepLocale) {
    world.environment.borrow_mut().replace(value.into_inner());
}

#[given("no configuration locale is provided")]
fn clear_configuration(world: &SelectionWorld) {
    world.configuration.borrow_mut().take();
}

#[given("the configuration locale is {value}")]
fn set_configuration(world: &SelectionWorld, value: StepLocale) {
    world.configuration.borrow_mut().replace(value.into_inner());
}

#[when("the locale is resolved")]
fn resolve(world: &SelectionWorld) {
    let explicit = world.explicit.borrow().clone();
    let environment = world.environment.borrow().clone();
    let configuration = world.configuration.borrow().clone();

    let selection = resolve_locale(
        NumberFormats::embedded().registry(),
        explicit.as_deref(),
        environment,
        configuration.as_deref(),
    )
    .unwrap_or_else(|| panic!("the bundled registry should not be empty"));
    world.selection.borrow_mut().replace(selection);
}

#[then("the locale source is {source}")]
fn assert_source(world: &SelectionWorld, source: StepSource) {
    world.with_selection(|selection| assert_eq!(selection.source(), source.0));
}

#[then("the resolved locale is {value}")]
fn assert_locale(world: &SelectionWorld, value: StepLocale) {
    let raw = value.into_inner();
    let expected = normalise_locale(Some(raw.as_str()))
        .unwrap_or_else(|| panic!("expected the step to provide a locale value"));

    world.with_selection(|selection| assert_eq!(selection.locale().as_str(), expected));
}

#[then("the requested candidate is {value}")]
fn assert_requested(world: &SelectionWorld, value: StepLocale) {
    let expected = value.into_inner();
    world.with_selection(|selection| assert_eq!(selection.requested(), Some(expected.as_str())));
}

#[then("the fallback locale is used")]
fn assert_fallback_used(world: &SelectionWorld) {
    world.with_selection(|selection| {
        assert!(selection.used_fallback());
        assert!(selection.requested().is_none());
    });
}

#[then("the fallback locale is not used")]
fn assert_fallback_not_used(world: &SelectionWorld) {
    world.with_selection(|selection| assert!(!selection.used_fallback()));
}

#[scenario("tests/features/locale_resolution.feature", index = 0)]
fn scenario_fallback(world: SelectionWorld) {
    let _ = world;
}

#[scenario("tests/features/locale_resolution.feature", index = 1)]
fn scenario_environment(world: SelectionWorld) {
    let _ = world;
}

#[scenario("tests/features/locale_resolution.feature", index = 2)]
fn scenario_configuration(world: SelectionWorld) {
    let _ = world;
}

#[scenario("tests/features/locale_resolution.feature", index = 3)]
fn scenario_explicit(world: SelectionWorld) {
    let _ = world;
}

#[scenario("tests/features/locale_resolution.feature", index = 4)]
fn scenario_whitespace(world: SelectionWorld) {
    let _ = world;
}
