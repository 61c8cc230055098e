//! Query execution for the inspector.
//!
//! [`inspect`] loads the configuration named on the command line, selects a
//! locale and number system, and runs the requested [`Command`] against the
//! resulting table. Every report owns its data so it can be rendered after
//! the table is dropped.

use std::collections::{BTreeMap, BTreeSet};

use camino::Utf8Path;
use log::debug;
use numfmt::{
    FormatSet, FormatStyle, FormatsConfig, LocaleId, NumberFormats, NumberSystemSelector,
    SystemName, SystemRole,
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::error::{InspectError, Result};

/// Supported locales.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct LocalesReport {
    /// Canonical tags in sorted order.
    pub locales: Vec<LocaleId>,
}

/// Number systems of one locale.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SystemsReport {
    /// Inspected locale.
    pub locale: LocaleId,
    /// Roles whose system has format data, with the system they name.
    pub roles: BTreeMap<SystemRole, SystemName>,
    /// Every system with format data.
    pub systems: Vec<SystemName>,
}

/// Patterns for one locale and number system.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FormatsReport {
    /// Inspected locale.
    pub locale: LocaleId,
    /// Resolved number system.
    pub system: SystemName,
    /// The format record.
    pub formats: FormatSet,
}

/// Style classes for one locale and number system.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StylesReport {
    /// Inspected locale.
    pub locale: LocaleId,
    /// Resolved number system.
    pub system: SystemName,
    /// Every populated style.
    pub available: BTreeSet<FormatStyle>,
    /// Compact styles.
    pub short: BTreeSet<FormatStyle>,
    /// Single-pattern decimal styles.
    pub decimal: BTreeSet<FormatStyle>,
}

/// Grouping threshold of one locale.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct GroupingReport {
    /// Inspected locale.
    pub locale: LocaleId,
    /// Minimum digits before grouping separators apply.
    pub minimum_grouping_digits: u8,
}

/// Outcome of one inspection command.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    /// Output of `locales`.
    Locales(LocalesReport),
    /// Output of `systems`.
    Systems(SystemsReport),
    /// Output of `formats`.
    Formats(FormatsReport),
    /// Output of `styles`.
    Styles(StylesReport),
    /// Output of `grouping`.
    Grouping(GroupingReport),
}

/// Loads the configuration at `path`, or the defaults when none is given.
///
/// # Errors
///
/// Returns [`InspectError::Config`] when the file cannot be read or parsed.
pub fn load_config(path: Option<&Utf8Path>) -> Result<FormatsConfig> {
    match path {
        Some(path) => Ok(FormatsConfig::from_path(path)?),
        None => Ok(FormatsConfig::default()),
    }
}

/// Runs the inspection `cli` describes.
///
/// # Errors
///
/// Returns an [`InspectError`] when configuration or data loading fails, or
/// when the locale or number system is not supported.
pub fn inspect(cli: &Cli) -> Result<Report> {
    let config = load_config(cli.config.as_deref())?;
    let formats = config.number_formats()?;
    run_command(cli, &config, &formats)
}

/// Runs `cli.command` against an already loaded table.
///
/// # Errors
///
/// Returns [`InspectError::Format`] for unsupported locales or systems and
/// [`InspectError::NoLocales`] when no locale can be selected.
pub fn run_command(cli: &Cli, config: &FormatsConfig, formats: &NumberFormats) -> Result<Report> {
    match cli.command {
        Command::Locales => Ok(Report::Locales(LocalesReport {
            locales: formats.available_locales().to_vec(),
        })),
        Command::Systems => {
            systems_report(formats, select_locale(cli, config, formats)?).map(Report::Systems)
        }
        Command::Formats => formats_report(
            formats,
            select_locale(cli, config, formats)?,
            &selector(cli, config),
        )
        .map(Report::Formats),
        Command::Styles => styles_report(
            formats,
            select_locale(cli, config, formats)?,
            &selector(cli, config),
        )
        .map(Report::Styles),
        Command::Grouping => {
            let locale = select_locale(cli, config, formats)?;
            Ok(Report::Grouping(GroupingReport {
                minimum_grouping_digits: formats.minimum_grouping_digits_for(locale.as_str())?,
                locale,
            }))
        }
    }
}

fn selector(cli: &Cli, config: &FormatsConfig) -> NumberSystemSelector {
    cli.system
        .as_deref()
        .map_or_else(|| config.selector(), NumberSystemSelector::from)
}

fn select_locale(cli: &Cli, config: &FormatsConfig, formats: &NumberFormats) -> Result<LocaleId> {
    if let Some(explicit) = cli.locale.as_deref() {
        return Ok(formats.validate_locale(explicit)?);
    }

    let selection = config
        .default_locale(formats)
        .ok_or(InspectError::NoLocales)?;
    debug!(
        target: "numfmt::inspect",
        "inspecting `{}` selected from {}",
        selection.locale(),
        selection.source(),
    );
    Ok(selection.into_locale())
}

fn systems_report(formats: &NumberFormats, locale: LocaleId) -> Result<SystemsReport> {
    let tag = locale.as_str();
    let roles = formats
        .system_roles(tag)?
        .into_iter()
        .map(|role| -> Result<(SystemRole, SystemName)> {
            Ok((role, formats.system_name_for(tag, role)?.clone()))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;
    let systems = formats.system_names(tag)?.into_iter().cloned().collect();

    Ok(SystemsReport {
        locale,
        roles,
        systems,
    })
}

fn formats_report(
    formats: &NumberFormats,
    locale: LocaleId,
    selector: &NumberSystemSelector,
) -> Result<FormatsReport> {
    let system = formats.system_name_for(locale.as_str(), selector)?.clone();
    let set = formats.formats_for(locale.as_str(), selector)?.clone();

    Ok(FormatsReport {
        locale,
        system,
        formats: set,
    })
}

fn styles_report(
    formats: &NumberFormats,
    locale: LocaleId,
    selector: &NumberSystemSelector,
) -> Result<StylesReport> {
    let tag = locale.as_str();
    let system = formats.system_name_for(tag, selector)?.clone();
    let available = formats.format_styles_for(tag, selector)?;
    let short = formats.short_format_styles_for(tag, selector)?;
    let decimal = formats.decimal_format_styles_for(tag, selector)?;

    Ok(StylesReport {
        locale,
        system,
        available,
        short,
        decimal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use numfmt::NumberFormatError;
    use rstest::rstest;

    fn cli(command: Command, locale: Option<&str>, system: Option<&str>) -> Cli {
        Cli {
            config: None,
            locale: locale.map(str::to_owned),
            system: system.map(str::to_owned),
            json: false,
            command,
        }
    }

    fn run(cli: &Cli) -> Result<Report> {
        run_command(cli, &FormatsConfig::default(), NumberFormats::embedded())
    }

    #[test]
    fn lists_every_bundled_locale() {
        let report = run(&cli(Command::Locales, None, None)).expect("locales report");
        let Report::Locales(LocalesReport { locales }) = report else {
            panic!("expected a locales report");
        };
        assert_eq!(locales.len(), 10);
        assert_eq!(locales.first().map(LocaleId::as_str), Some("ar"));
    }

    #[test]
    fn reports_declared_roles() {
        let report = run(&cli(Command::Systems, Some("he"), None)).expect("systems report");
        let Report::Systems(systems) = report else {
            panic!("expected a systems report");
        };

        assert_eq!(systems.locale.as_str(), "he");
        assert_eq!(
            systems.roles.keys().copied().collect::<Vec<_>>(),
            vec![SystemRole::Default, SystemRole::Native]
        );
        assert_eq!(
            systems.roles.get(&SystemRole::Native).map(SystemName::as_str),
            Some("latn")
        );
        assert_eq!(systems.systems, vec![SystemName::from("latn")]);
    }

    #[test]
    fn resolves_configured_number_systems() {
        let config = FormatsConfig {
            number_system: Some(String::from("native")),
            ..FormatsConfig::default()
        };
        let report = run_command(
            &cli(Command::Formats, Some("th"), None),
            &config,
            NumberFormats::embedded(),
        )
        .expect("formats report");
        let Report::Formats(formats) = report else {
            panic!("expected a formats report");
        };

        assert_eq!(formats.system.as_str(), "thai");
        assert!(!formats.formats.contains(FormatStyle::CurrencyLong));
    }

    #[test]
    fn command_line_systems_override_configuration() {
        let config = FormatsConfig {
            number_system: Some(String::from("native")),
            ..FormatsConfig::default()
        };
        let report = run_command(
            &cli(Command::Styles, Some("th"), Some("latn")),
            &config,
            NumberFormats::embedded(),
        )
        .expect("styles report");
        let Report::Styles(styles) = report else {
            panic!("expected a styles report");
        };

        assert_eq!(styles.system.as_str(), "latn");
        assert!(styles.short.contains(&FormatStyle::DecimalShort));
        assert!(styles.decimal.contains(&FormatStyle::Standard));
        assert!(styles.available.contains(&FormatStyle::CurrencyLong));
    }

    #[rstest]
    #[case("en", 1)]
    #[case("es", 2)]
    fn reports_grouping_digits(#[case] locale: &str, #[case] expected: u8) {
        let report = run(&cli(Command::Grouping, Some(locale), None)).expect("grouping report");
        let Report::Grouping(grouping) = report else {
            panic!("expected a grouping report");
        };
        assert_eq!(grouping.minimum_grouping_digits, expected);
    }

    #[rstest]
    #[case(Command::Systems)]
    #[case(Command::Formats)]
    #[case(Command::Styles)]
    #[case(Command::Grouping)]
    fn explicit_unknown_locales_fail(#[case] command: Command) {
        let outcome = run(&cli(command, Some("zz"), None));
        assert!(matches!(
            outcome,
            Err(InspectError::Format(NumberFormatError::UnknownLocale { .. }))
        ));
    }

    #[test]
    fn unknown_systems_fail() {
        let outcome = run(&cli(Command::Formats, Some("ja"), Some("traditional")));
        assert!(matches!(
            outcome,
            Err(InspectError::Format(NumberFormatError::UnknownNumberSystem { .. }))
        ));
    }

    #[test]
    fn missing_configuration_files_fail() {
        let outcome = load_config(Some(Utf8Path::new("/nonexistent/numfmt.toml")));
        assert!(matches!(outcome, Err(InspectError::Config(_))));
    }
}
