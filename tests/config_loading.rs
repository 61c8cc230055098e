//! Behaviour-driven tests for `numfmt.toml` loading.

use std::cell::RefCell;
use std::convert::Infallible;
use std::fs;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use numfmt::{CONFIG_FILE_NAME, ConfigError, FormatsConfig, LocaleId, NumberSystemSelector};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

const FRENCH: &str = r##"{
    "locale": "fr",
    "minimum_grouping_digits": 1,
    "number_systems": { "default": "latn" },
    "formats": { "latn": { "standard": "#,##0.###", "percent": "#,##0 %" } }
}"##;

#[derive(Default)]
struct ConfigWorld {
    source: RefCell<Option<String>>,
    directory: RefCell<Option<TempDir>>,
    outcome: RefCell<Option<Result<FormatsConfig, ConfigError>>>,
}

impl ConfigWorld {
    fn with_config<R>(&self, check: impl FnOnce(&FormatsConfig) -> R) -> R {
        let borrow = self.outcome.borrow();
        match borrow.as_ref() {
            Some(Ok(config)) => check(config),
            Some(Err(error)) => panic!("expected configuration loading to succeed: {error}"),
            None => panic!("configuration should be loaded"),
        }
    }

    fn error_message(&self) -> String {
        let borrow = self.outcome.borrow();
        match borrow.as_ref() {
            Some(Err(error)) => error.to_string(),
            Some(Ok(config)) => {
                panic!("expected configuration loading to fail but succeeded with {config:?}")
            }
            None => panic!("configuration should be loaded"),
        }
    }

    fn config_path(&self) -> Option<Utf8PathBuf> {
        self.directory.borrow().as_ref().map(|dir| {
            let root = Utf8Path::from_path(dir.path())
                .unwrap_or_else(|| panic!("temporary directory should be UTF-8"));
            root.join(CONFIG_FILE_NAME)
        })
    }
}

#[fixture]
fn world() -> ConfigWorld {
    ConfigWorld::default()
}

/// Error text expected in a step, with surrounding quotes removed.
#[derive(Debug)]
struct ErrorSnippet(String);

impl FromStr for ErrorSnippet {
    type Err = Infallible;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input
            .trim()
            .trim_matches(|candidate| matches!(candidate, '"' | '\''));
        Ok(Self(trimmed.to_owned()))
    }
}

#[given("no configuration state has been prepared")]
fn reset_state(world: &ConfigWorld) {
    world.source.borrow_mut().take();
    world.directory.borrow_mut().take();
    world.outcome.borrow_mut().take();
}

#[given("no configuration overrides are provided")]
fn no_overrides(world: &ConfigWorld) {
    world.source.borrow_mut().take();
}

fn append(world: &ConfigWorld, line: &str) {
    let mut source = world.source.borrow_mut();
    let text = source.get_or_insert_with(String::new);
    text.push_str(line);
    text.push('\n');
}

#[given("the configuration holds a numeric locale")]
fn invalid_locale(world: &ConfigWorld) {
    append(world, "locale = 42");
}

#[given("the configuration sets the locale to {value}")]
fn set_locale(world: &ConfigWorld, value: String) {
    append(world, &format!("locale = \"{value}\""));
}

#[given("the configuration sets the number system to {value}")]
fn set_number_system(world: &ConfigWorld, value: String) {
    append(world, &format!("number_system = \"{value}\""));
}

#[given("the configuration includes unknown fields")]
fn unknown_fields(world: &ConfigWorld) {
    append(world, "unexpected = true");
}

#[given("the configuration points at a data directory holding only fr")]
fn data_directory(world: &ConfigWorld) {
    let dir = tempfile::tempdir().expect("create temporary directory");
    let data = dir.path().join("data");
    fs::create_dir(&data).expect("create data directory");
    fs::write(data.join("fr.json"), FRENCH).expect("write locale document");
    world.directory.borrow_mut().replace(dir);
    append(world, "data_dir = \"data\"");
}

#[when("the configuration is loaded")]
fn load_config(world: &ConfigWorld) {
    let source = world.source.borrow().clone();
    let outcome = match world.config_path() {
        Some(path) => {
            fs::write(&path, source.unwrap_or_default()).expect("write configuration file");
            FormatsConfig::from_path(&path)
        }
        None => FormatsConfig::load_with(Utf8Path::new(CONFIG_FILE_NAME), |path| {
            assert_eq!(path.as_str(), CONFIG_FILE_NAME);
            source
                .as_deref()
                .map_or_else(|| Ok(FormatsConfig::default()), FormatsConfig::from_toml_str)
        }),
    };
    world.outcome.borrow_mut().replace(outcome);
}

#[then("no locale is configured")]
fn assert_no_locale(world: &ConfigWorld) {
    world.with_config(|config| assert!(config.locale().is_none()));
}

#[then("the configured locale is {expected}")]
fn assert_locale(world: &ConfigWorld, expected: String) {
    world.with_config(|config| assert_eq!(config.locale(), Some(expected.as_str())));
}

#[then("the configured number system is {expected}")]
fn assert_number_system(world: &ConfigWorld, expected: String) {
    world.with_config(|config| {
        assert_eq!(
            config.selector(),
            NumberSystemSelector::from(expected.as_str())
        );
    });
}

#[then("a configuration error is reported")]
fn assert_error(world: &ConfigWorld) {
    assert!(!world.error_message().is_empty());
}

#[then("a configuration error mentioning {snippet} is reported")]
fn assert_error_with_snippet(world: &ConfigWorld, snippet: ErrorSnippet) {
    let message = world.error_message();
    assert!(
        message.contains(snippet.0.as_str()),
        "expected error '{message}' to mention '{}'",
        snippet.0,
    );
}

#[then("the loaded formats support only fr")]
fn assert_directory_formats(world: &ConfigWorld) {
    world.with_config(|config| {
        let formats = config.number_formats().expect("directory data should load");
        let locales: Vec<&str> = formats
            .available_locales()
            .iter()
            .map(LocaleId::as_str)
            .collect();
        assert_eq!(locales, vec!["fr"]);
    });
}

#[scenario("tests/features/config_loading.feature", index = 0)]
fn scenario_defaults(world: ConfigWorld) {
    let _ = world;
}

#[scenario("tests/features/config_loading.feature", index = 1)]
fn scenario_overrides(world: ConfigWorld) {
    let _ = world;
}

#[scenario("tests/features/config_loading.feature", index = 2)]
fn scenario_invalid_values(world: ConfigWorld) {
    let _ = world;
}

#[scenario("tests/features/config_loading.feature", index = 3)]
fn scenario_unknown_fields(world: ConfigWorld) {
    let _ = world;
}

#[scenario("tests/features/config_loading.feature", index = 4)]
fn scenario_data_directory(world: ConfigWorld) {
    let _ = world;
}
