//! Error types for format resolution and locale data loading.
//!
//! Query failures are [`NumberFormatError`] values. [`raise`] turns a query
//! result into a panic for call sites that have already validated their
//! input. Malformed locale data surfaces as [`DataError`] while the format
//! table is being built and never after.

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::pattern::{FormatStyle, InvalidThreshold, MagnitudeThreshold, PatternShape};
use crate::system::SystemRole;

/// Errors returned by format queries.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum NumberFormatError {
    /// The locale is not part of the loaded locale set.
    #[error("locale `{locale}` is not supported")]
    UnknownLocale {
        /// The locale tag as supplied by the caller.
        locale: String,
    },

    /// The selector names no number system with formats for the locale.
    #[error("number system `{system}` is not known for locale `{locale}`")]
    UnknownNumberSystem {
        /// Canonical locale tag.
        locale: String,
        /// The role or system name that failed to resolve.
        system: String,
    },
}

/// Result type alias using [`NumberFormatError`].
pub type Result<T> = std::result::Result<T, NumberFormatError>;

/// Unwrap a query result, panicking with the error's message on failure.
///
/// # Panics
///
/// Panics when `result` is an error.
///
/// # Examples
///
/// ```
/// use numfmt_common::{NumberFormats, SystemRole, raise};
///
/// let formats = NumberFormats::embedded();
/// let digits = raise(formats.minimum_grouping_digits_for("es"));
/// assert_eq!(digits, 2);
/// ```
#[track_caller]
pub fn raise<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}

/// Errors raised while loading and compiling locale data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A locale document could not be read.
    #[error("failed to read locale data at {path}")]
    Read {
        /// Path of the unreadable document.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The locale data directory listing failed.
    #[error("failed to list locale data in {path}: {reason}")]
    List {
        /// Directory being listed.
        path: Utf8PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// A locale document is not valid JSON for the expected schema.
    #[error("invalid locale data for `{locale}`")]
    Parse {
        /// Tag the document was loaded under.
        locale: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A locale tag does not parse as a language identifier.
    #[error("`{tag}` is not a valid locale identifier")]
    InvalidLocaleTag {
        /// The offending tag.
        tag: String,
    },

    /// A document declares a different locale from the one requested.
    #[error("locale data loaded for `{expected}` declares `{found}`")]
    LocaleMismatch {
        /// Tag the document was loaded under.
        expected: String,
        /// Tag found inside the document.
        found: String,
    },

    /// Two documents canonicalise to the same locale.
    #[error("locale `{locale}` is defined more than once")]
    DuplicateLocale {
        /// Canonical tag.
        locale: String,
    },

    /// The data source offered no locales at all.
    #[error("no locale data was found")]
    NoLocales,

    /// A locale has no number system with formats.
    #[error("locale `{locale}` defines no number formats")]
    NoNumberSystems {
        /// Canonical tag.
        locale: String,
    },

    /// A role names a system the document has no formats for.
    #[error("role `{role}` for `{locale}` names `{system}`, which has no formats")]
    UnformattedRole {
        /// Canonical tag.
        locale: String,
        /// The declaring role.
        role: SystemRole,
        /// System the role points at.
        system: String,
    },

    /// A number system has no populated style.
    #[error("number system `{system}` for `{locale}` has no populated styles")]
    EmptyFormatSet {
        /// Canonical tag.
        locale: String,
        /// System name.
        system: String,
    },

    /// A style uses the wrong pattern shape.
    #[error("`{style}` for `{locale}`/`{system}` must be {expected}")]
    ShapeMismatch {
        /// Canonical tag.
        locale: String,
        /// System name.
        system: String,
        /// Offending style.
        style: FormatStyle,
        /// Shape the style requires.
        expected: PatternShape,
    },

    /// A compact threshold is not a power of ten.
    #[error("`{style}` for `{locale}`/`{system}` has an invalid threshold")]
    InvalidThreshold {
        /// Canonical tag.
        locale: String,
        /// System name.
        system: String,
        /// Offending style.
        style: FormatStyle,
        /// The parse failure.
        #[source]
        source: InvalidThreshold,
    },

    /// Compact thresholds are not strictly increasing.
    #[error("`{style}` for `{locale}`/`{system}` repeats or reorders threshold {threshold}")]
    ThresholdOrder {
        /// Canonical tag.
        locale: String,
        /// System name.
        system: String,
        /// Offending style.
        style: FormatStyle,
        /// First threshold not above its predecessor.
        threshold: MagnitudeThreshold,
    },

    /// A plural pattern map has no `other` entry.
    #[error("`{style}` for `{locale}`/`{system}` lacks an `other` pattern at {threshold}")]
    MissingOtherPattern {
        /// Canonical tag.
        locale: String,
        /// System name.
        system: String,
        /// Offending style.
        style: FormatStyle,
        /// Threshold of the incomplete step.
        threshold: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::panic::catch_unwind;

    #[rstest]
    #[case(
        NumberFormatError::UnknownLocale { locale: "zz".to_owned() },
        "locale `zz` is not supported"
    )]
    #[case(
        NumberFormatError::UnknownNumberSystem {
            locale: "en".to_owned(),
            system: "thai".to_owned(),
        },
        "number system `thai` is not known for locale `en`"
    )]
    fn messages_name_the_offending_input(
        #[case] error: NumberFormatError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.to_string(), expected);
    }

    #[test]
    fn raise_passes_values_through() {
        assert_eq!(raise(Ok::<_, NumberFormatError>(3)), 3);
    }

    #[test]
    fn raise_panics_with_the_error_message() {
        let payload = catch_unwind(|| {
            raise::<u8>(Err(NumberFormatError::UnknownLocale {
                locale: "xx".to_owned(),
            }))
        })
        .expect_err("raise should panic on errors");

        let message = payload
            .downcast::<String>()
            .expect("panic payload should be a formatted string");
        assert_eq!(*message, "locale `xx` is not supported");
    }

    #[test]
    fn read_errors_preserve_their_source() {
        let error = DataError::Read {
            path: Utf8PathBuf::from("locales/en.json"),
            source: std::io::Error::other("denied"),
        };
        assert!(error.to_string().contains("locales/en.json"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
