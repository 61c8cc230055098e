//! Locale number formats with file-based configuration.
//!
//! Re-exports the lookup API from `numfmt-common` and adds
//! [`FormatsConfig`], which reads `numfmt.toml` to choose a default locale,
//! a default number system, and an optional directory of locale data.

pub mod config;

pub use config::{CONFIG_FILE_NAME, ConfigError, FormatsConfig};
pub use numfmt_common::{
    DataError, FALLBACK_LOCALE, FormatSet, FormatStyle, LOCALE_ENV_VAR, LocaleId, LocaleSelection,
    LocaleSource, NumberFormatError, NumberFormats, NumberSystemSelector, PatternValue,
    PluralCategory, SystemName, SystemRole, default_locale_for, normalise_locale, raise,
    resolve_locale,
};
