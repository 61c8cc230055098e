//! Locale-aware number format resolution.
//!
//! Bundled locale documents compile into an immutable two-level table
//! (locale, then number system). [`NumberFormats`] answers every query
//! against it: resolving a number-system role or name, fetching the
//! patterns for a system, classifying styles as short or decimal, and
//! reading grouping thresholds.
//!
//! Each query exists twice. The plain form returns a
//! [`Result`](std::result::Result) carrying a [`NumberFormatError`]; the
//! `_or_panic` form unwraps it through [`raise`] for callers that treat an
//! unsupported locale as a programming error.
//!
//! ```
//! use numfmt_common::{FormatStyle, NumberFormats, SystemRole};
//!
//! let formats = NumberFormats::embedded();
//! let patterns = formats.formats_for("en", SystemRole::Default)?;
//! assert_eq!(patterns.pattern(FormatStyle::Standard), Some("#,##0.###"));
//! # Ok::<(), numfmt_common::NumberFormatError>(())
//! ```

pub mod classify;
pub mod error;
pub mod loader;
pub mod locale;
pub mod pattern;
pub mod resolver;
pub mod selection;
pub mod system;
pub mod table;
pub mod testing;

pub use classify::{LONG_SHORT_STYLES, SHORT_STYLE_EXCEPTIONS, is_short_style};
pub use error::{DataError, NumberFormatError, Result, raise};
pub use loader::{DataSource, DirectorySource, EmbeddedSource, LocaleDocument};
pub use locale::{LocaleId, LocaleRegistry, canonicalise};
pub use pattern::{
    CompactEntry, CompactPatterns, CurrencySpacing, FormatSet, FormatStyle, InvalidThreshold,
    MagnitudeThreshold, PatternShape, PatternValue, PluralCategory, PluralPatternMap, SpacingRule,
};
pub use resolver::NumberFormats;
pub use selection::{
    FALLBACK_LOCALE, LOCALE_ENV_VAR, LocaleSelection, LocaleSource, default_locale_for,
    normalise_locale, resolve_locale,
};
pub use system::{NumberSystemSelector, SystemName, SystemRole};
pub use table::{FormatTable, LocaleFormats};
