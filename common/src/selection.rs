//! Default-locale selection.
//!
//! Callers without an explicit locale fall back through the `NUMFMT_LOCALE`
//! environment variable, the configured locale, and finally the bundled
//! [`FALLBACK_LOCALE`]. Each step is validated against the registry so the
//! selection always names a supported locale.

use std::env;
use std::fmt;

use log::{debug, warn};

use crate::locale::{LocaleId, LocaleRegistry};
use crate::resolver::NumberFormats;

/// Environment variable consulted for the default locale.
pub const LOCALE_ENV_VAR: &str = "NUMFMT_LOCALE";

/// Locale used when no candidate is supported.
pub const FALLBACK_LOCALE: &str = "en";

/// Source for a resolved locale.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LocaleSource {
    /// Locale supplied explicitly by the caller.
    ExplicitArgument,
    /// Locale sourced from the `NUMFMT_LOCALE` environment variable.
    EnvironmentVariable,
    /// Locale taken from `numfmt.toml`.
    Configuration,
    /// The bundled fallback locale.
    Fallback,
}

impl fmt::Display for LocaleSource {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitArgument => formatter.write_str("explicit locale override"),
            Self::EnvironmentVariable => formatter.write_str(LOCALE_ENV_VAR),
            Self::Configuration => formatter.write_str("configuration locale"),
            Self::Fallback => formatter.write_str("fallback locale"),
        }
    }
}

/// Outcome of locale selection, including provenance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleSelection {
    locale: LocaleId,
    source: LocaleSource,
    requested: Option<String>,
}

impl LocaleSelection {
    /// The selected locale.
    #[must_use]
    pub const fn locale(&self) -> &LocaleId {
        &self.locale
    }

    /// Where the locale came from.
    #[must_use]
    pub const fn source(&self) -> LocaleSource {
        self.source
    }

    /// The raw candidate that won, if any.
    #[must_use]
    pub fn requested(&self) -> Option<&str> {
        self.requested.as_deref()
    }

    /// Whether the fallback locale was used.
    #[must_use]
    pub fn used_fallback(&self) -> bool {
        self.source == LocaleSource::Fallback
    }

    /// Consumes the selection, yielding the locale.
    #[must_use]
    pub fn into_locale(self) -> LocaleId {
        self.locale
    }

    /// Emit a debug log summarising the selection.
    pub fn log_outcome(&self, target: &str) {
        debug!(
            target: target,
            "resolved {} to `{}`",
            self.source,
            self.locale,
        );
    }
}

fn try_resolve_candidate(
    registry: &LocaleRegistry,
    source: LocaleSource,
    raw: Option<&str>,
) -> Option<LocaleSelection> {
    let candidate = normalise_locale(raw)?;

    match registry.validate(candidate) {
        Ok(locale) => Some(LocaleSelection {
            locale,
            source,
            requested: Some(candidate.to_owned()),
        }),
        Err(_) => {
            warn!(
                target: "numfmt::selection",
                "skipping unsupported {source} `{candidate}`",
            );
            None
        }
    }
}

/// Select a locale from explicit, environment, and configuration candidates.
///
/// Candidates are considered in that order; blank ones are skipped
/// silently and unsupported ones with a warning. When none is usable the
/// fallback is chosen; if the registry lacks even the fallback, its first
/// locale is used instead.
///
/// Returns `None` only when the registry is empty.
#[must_use]
pub fn resolve_locale(
    registry: &LocaleRegistry,
    explicit: Option<&str>,
    environment: Option<String>,
    configuration: Option<&str>,
) -> Option<LocaleSelection> {
    let candidates = [
        (LocaleSource::ExplicitArgument, explicit),
        (LocaleSource::EnvironmentVariable, environment.as_deref()),
        (LocaleSource::Configuration, configuration),
    ];

    candidates
        .into_iter()
        .find_map(|(source, raw)| try_resolve_candidate(registry, source, raw))
        .or_else(|| {
            registry
                .validate(FALLBACK_LOCALE)
                .ok()
                .or_else(|| registry.locales().first().cloned())
                .map(|locale| LocaleSelection {
                    locale,
                    source: LocaleSource::Fallback,
                    requested: None,
                })
        })
}

/// Select the default locale for `formats` using the process environment.
///
/// Reads `NUMFMT_LOCALE`, then `configuration`, logging the outcome under
/// `numfmt::selection`.
///
/// # Examples
///
/// ```
/// use numfmt_common::{NumberFormats, default_locale_for};
///
/// let selection = default_locale_for(NumberFormats::embedded(), Some("fr"))
///     .expect("bundled data is never empty");
/// assert!(!selection.locale().as_str().is_empty());
/// ```
#[must_use]
pub fn default_locale_for(
    formats: &NumberFormats,
    configuration: Option<&str>,
) -> Option<LocaleSelection> {
    let environment = env::var_os(LOCALE_ENV_VAR).and_then(|value| value.into_string().ok());
    let selection = resolve_locale(formats.registry(), None, environment, configuration)?;
    selection.log_outcome("numfmt::selection");
    Some(selection)
}

/// Trim whitespace and discard empty locale candidates.
#[must_use]
pub fn normalise_locale(input: Option<&str>) -> Option<&str> {
    input
        .map(str::trim)
        .and_then(|value| if value.is_empty() { None } else { Some(value) })
}
