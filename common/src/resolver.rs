//! Validated queries over the compiled format table.
//!
//! [`NumberFormats`] pairs a [`FormatTable`] with the [`LocaleRegistry`] of
//! its locales. Every query validates the locale first and short-circuits
//! with the same [`NumberFormatError`] whichever query was asked. Each
//! checked query has an `_or_panic` sibling for call sites whose input is
//! already known to be valid.

use std::collections::{BTreeMap, BTreeSet};

use once_cell::sync::Lazy;

use crate::classify;
use crate::error::{DataError, Result, raise};
use crate::loader::{DataSource, EmbeddedSource};
use crate::locale::{LocaleId, LocaleRegistry};
use crate::pattern::{FormatSet, FormatStyle};
use crate::system::{NumberSystemSelector, SystemName, SystemRole, resolve_system_name};
use crate::table::{FormatTable, LocaleFormats};

static EMBEDDED: Lazy<NumberFormats> = Lazy::new(|| {
    match NumberFormats::from_source(&EmbeddedSource) {
        Ok(formats) => formats,
        Err(error) => panic!("bundled locale data is invalid: {error}"),
    }
});

/// Read-only number-format data for a closed set of locales.
#[derive(Clone, Debug)]
pub struct NumberFormats {
    registry: LocaleRegistry,
    table: FormatTable,
}

impl NumberFormats {
    /// Build from every locale `source` supplies.
    ///
    /// # Errors
    ///
    /// Returns a [`DataError`] when any document is missing or malformed.
    pub fn from_source(source: &impl DataSource) -> std::result::Result<Self, DataError> {
        let (table, registry) = FormatTable::build(source)?;
        Ok(Self { registry, table })
    }

    /// Shared instance built from the bundled locale data on first use.
    ///
    /// # Panics
    ///
    /// Panics on first use if the bundled data fails validation, which the
    /// crate's own tests rule out.
    #[must_use]
    pub fn embedded() -> &'static Self {
        &EMBEDDED
    }

    /// The registry of supported locales.
    #[must_use]
    pub const fn registry(&self) -> &LocaleRegistry {
        &self.registry
    }

    /// Supported locales in sorted order.
    #[must_use]
    pub fn available_locales(&self) -> &[LocaleId] {
        self.registry.locales()
    }

    /// Validate `locale` against the registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::NumberFormatError::UnknownLocale`] for unsupported
    /// locales.
    pub fn validate_locale(&self, locale: &str) -> Result<LocaleId> {
        self.registry.validate(locale)
    }

    /// Resolve `selector` to a system name with formats for `locale`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocale` or `UnknownNumberSystem`.
    pub fn system_name_for(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> Result<&SystemName> {
        let (id, entry) = self.entry(locale)?;
        resolve_system_name(&id, entry, &selector.into())
    }

    /// Format record for `locale` and `selector`.
    ///
    /// ```
    /// use numfmt_common::{FormatStyle, NumberFormats, SystemRole};
    ///
    /// let formats = NumberFormats::embedded()
    ///     .formats_for("en", SystemRole::Default)
    ///     .expect("en is bundled");
    /// assert_eq!(formats.pattern(FormatStyle::Standard), Some("#,##0.###"));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocale` or `UnknownNumberSystem`.
    ///
    /// # Panics
    ///
    /// Panics if a resolved system has no record, which table construction
    /// rules out.
    pub fn formats_for(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> Result<&FormatSet> {
        let (id, entry) = self.entry(locale)?;
        let system = resolve_system_name(&id, entry, &selector.into())?;
        match entry.formats(system.as_str()) {
            Some(format_set) => Ok(format_set),
            None => incomplete_table(&id, Some(system)),
        }
    }

    /// Format records for every system of `locale`, keyed by system name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocale` for unsupported locales.
    pub fn all_formats_for(&self, locale: &str) -> Result<&BTreeMap<SystemName, FormatSet>> {
        self.entry(locale).map(|(_, entry)| entry.systems())
    }

    /// Minimum digits before the grouping separator applies in `locale`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocale` for unsupported locales.
    pub fn minimum_grouping_digits_for(&self, locale: &str) -> Result<u8> {
        self.entry(locale)
            .map(|(_, entry)| entry.minimum_grouping_digits())
    }

    /// Roles `locale` declares.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocale` for unsupported locales.
    pub fn system_roles(&self, locale: &str) -> Result<BTreeSet<SystemRole>> {
        self.entry(locale)
            .map(|(_, entry)| entry.roles().collect())
    }

    /// Names of the systems of `locale` that have format data.
    ///
    /// # Errors
    ///
    /// Returns `UnknownLocale` for unsupported locales.
    pub fn system_names(&self, locale: &str) -> Result<BTreeSet<&SystemName>> {
        self.entry(locale)
            .map(|(_, entry)| entry.systems().keys().collect())
    }

    /// Populated styles for `locale` and `selector`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::formats_for`].
    pub fn format_styles_for(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> Result<BTreeSet<FormatStyle>> {
        self.formats_for(locale, selector)
            .map(classify::available_styles)
    }

    /// Populated compact styles for `locale` and `selector`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::formats_for`].
    pub fn short_format_styles_for(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> Result<BTreeSet<FormatStyle>> {
        self.formats_for(locale, selector).map(classify::short_styles)
    }

    /// Populated single-pattern decimal styles for `locale` and `selector`.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::formats_for`].
    pub fn decimal_format_styles_for(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> Result<BTreeSet<FormatStyle>> {
        self.formats_for(locale, selector)
            .map(classify::decimal_styles)
    }

    /// Panicking form of [`Self::system_name_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message when resolution fails.
    #[must_use]
    #[track_caller]
    pub fn system_name_for_or_panic(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> &SystemName {
        raise(self.system_name_for(locale, selector))
    }

    /// Panicking form of [`Self::formats_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message when resolution fails.
    #[must_use]
    #[track_caller]
    pub fn formats_for_or_panic(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> &FormatSet {
        raise(self.formats_for(locale, selector))
    }

    /// Panicking form of [`Self::all_formats_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message for unsupported locales.
    #[must_use]
    #[track_caller]
    pub fn all_formats_for_or_panic(&self, locale: &str) -> &BTreeMap<SystemName, FormatSet> {
        raise(self.all_formats_for(locale))
    }

    /// Panicking form of [`Self::minimum_grouping_digits_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message for unsupported locales.
    #[must_use]
    #[track_caller]
    pub fn minimum_grouping_digits_for_or_panic(&self, locale: &str) -> u8 {
        raise(self.minimum_grouping_digits_for(locale))
    }

    /// Panicking form of [`Self::system_roles`].
    ///
    /// # Panics
    ///
    /// Panics with the error message for unsupported locales.
    #[must_use]
    #[track_caller]
    pub fn system_roles_or_panic(&self, locale: &str) -> BTreeSet<SystemRole> {
        raise(self.system_roles(locale))
    }

    /// Panicking form of [`Self::system_names`].
    ///
    /// # Panics
    ///
    /// Panics with the error message for unsupported locales.
    #[must_use]
    #[track_caller]
    pub fn system_names_or_panic(&self, locale: &str) -> BTreeSet<&SystemName> {
        raise(self.system_names(locale))
    }

    /// Panicking form of [`Self::format_styles_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message when resolution fails.
    #[must_use]
    #[track_caller]
    pub fn format_styles_for_or_panic(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> BTreeSet<FormatStyle> {
        raise(self.format_styles_for(locale, selector))
    }

    /// Panicking form of [`Self::short_format_styles_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message when resolution fails.
    #[must_use]
    #[track_caller]
    pub fn short_format_styles_for_or_panic(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> BTreeSet<FormatStyle> {
        raise(self.short_format_styles_for(locale, selector))
    }

    /// Panicking form of [`Self::decimal_format_styles_for`].
    ///
    /// # Panics
    ///
    /// Panics with the error message when resolution fails.
    #[must_use]
    #[track_caller]
    pub fn decimal_format_styles_for_or_panic(
        &self,
        locale: &str,
        selector: impl Into<NumberSystemSelector>,
    ) -> BTreeSet<FormatStyle> {
        raise(self.decimal_format_styles_for(locale, selector))
    }

    fn entry(&self, locale: &str) -> Result<(LocaleId, &LocaleFormats)> {
        let id = self.registry.validate(locale)?;
        match self.table.locale(&id) {
            Some(entry) => Ok((id, entry)),
            None => incomplete_table(&id, None),
        }
    }
}

/// The registry and table are built together, so a validated locale or a
/// resolved system without a record means the table itself is corrupt.
#[cold]
fn incomplete_table(locale: &LocaleId, system: Option<&SystemName>) -> ! {
    match system {
        Some(system) => panic!("format table has no `{system}` record for validated locale `{locale}`"),
        None => panic!("format table has no entry for validated locale `{locale}`"),
    }
}
