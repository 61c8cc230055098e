//! The compiled format table.
//!
//! Built once from a [`DataSource`], the table maps each canonical locale to
//! its [`LocaleFormats`]: every number system with format data, the role
//! map, and the minimum grouping digits. Nothing is mutated after
//! [`FormatTable::build`] returns.

use std::collections::{BTreeMap, HashMap};

use log::debug;

use crate::error::DataError;
use crate::loader::DataSource;
use crate::locale::{LocaleId, LocaleRegistry, canonicalise};
use crate::pattern::FormatSet;
use crate::system::{SystemName, SystemRole};

/// Everything the table knows about one locale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocaleFormats {
    systems: BTreeMap<SystemName, FormatSet>,
    roles: BTreeMap<SystemRole, SystemName>,
    minimum_grouping_digits: u8,
}

impl LocaleFormats {
    pub(crate) const fn new(
        systems: BTreeMap<SystemName, FormatSet>,
        roles: BTreeMap<SystemRole, SystemName>,
        minimum_grouping_digits: u8,
    ) -> Self {
        Self {
            systems,
            roles,
            minimum_grouping_digits,
        }
    }

    /// Format records keyed by system name.
    #[must_use]
    pub const fn systems(&self) -> &BTreeMap<SystemName, FormatSet> {
        &self.systems
    }

    /// Format record for `system`, if the locale has one.
    #[must_use]
    pub fn formats(&self, system: &str) -> Option<&FormatSet> {
        self.systems.get(system)
    }

    /// System the locale declares for `role`.
    #[must_use]
    pub fn role(&self, role: SystemRole) -> Option<&SystemName> {
        self.roles.get(&role)
    }

    /// Every role the locale declares.
    pub fn roles(&self) -> impl Iterator<Item = SystemRole> + '_ {
        self.roles.keys().copied()
    }

    /// Minimum digits before grouping applies.
    #[must_use]
    pub const fn minimum_grouping_digits(&self) -> u8 {
        self.minimum_grouping_digits
    }

    pub(crate) fn system_key(&self, name: &str) -> Option<&SystemName> {
        self.systems.get_key_value(name).map(|(key, _)| key)
    }
}

/// Two-level immutable map: locale, then number system.
#[derive(Clone, Debug, Default)]
pub struct FormatTable {
    locales: HashMap<LocaleId, LocaleFormats>,
}

impl FormatTable {
    /// Load and compile every locale `source` offers.
    ///
    /// Returns the table together with the registry of its locales.
    ///
    /// # Errors
    ///
    /// Returns the first [`DataError`] met while enumerating, loading, or
    /// validating documents.
    pub fn build(source: &impl DataSource) -> Result<(Self, LocaleRegistry), DataError> {
        let tags = source.locales()?;
        if tags.is_empty() {
            return Err(DataError::NoLocales);
        }

        let mut compiled: HashMap<String, LocaleFormats> = HashMap::with_capacity(tags.len());
        for tag in tags {
            let canonical =
                canonicalise(&tag).ok_or_else(|| DataError::InvalidLocaleTag { tag: tag.clone() })?;
            if compiled.contains_key(&canonical) {
                return Err(DataError::DuplicateLocale { locale: canonical });
            }
            let entry = source.load(&tag)?.compile(&canonical)?;
            compiled.insert(canonical, entry);
        }

        let registry = LocaleRegistry::from_canonical(compiled.keys().cloned());
        let locales = registry
            .locales()
            .iter()
            .filter_map(|locale| {
                compiled
                    .remove(locale.as_str())
                    .map(|entry| (locale.clone(), entry))
            })
            .collect::<HashMap<_, _>>();

        debug!(
            target: "numfmt::table",
            "compiled number formats for {} locales",
            locales.len(),
        );

        Ok((Self { locales }, registry))
    }

    /// Entry for a validated locale.
    #[must_use]
    pub fn locale(&self, locale: &LocaleId) -> Option<&LocaleFormats> {
        self.locales.get(locale)
    }

    /// Format record for a validated locale and system.
    #[must_use]
    pub fn formats(&self, locale: &LocaleId, system: &str) -> Option<&FormatSet> {
        self.locale(locale).and_then(|entry| entry.formats(system))
    }

    /// Minimum grouping digits for a validated locale.
    #[must_use]
    pub fn minimum_grouping_digits(&self, locale: &LocaleId) -> Option<u8> {
        self.locale(locale).map(LocaleFormats::minimum_grouping_digits)
    }

    /// Number of locales in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}
