//! Locale validation against the closed set of loaded locales.
//!
//! Tags are parsed and canonicalised with `unic-langid`, so `EN-gb` and
//! `en_GB` both resolve to `en-GB`. Only [`LocaleRegistry::validate`] hands
//! out [`LocaleId`] values, which makes holding one proof of membership.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;
use unic_langid::LanguageIdentifier;

use crate::error::{NumberFormatError, Result};

/// A canonical locale tag known to the registry.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct LocaleId(String);

impl LocaleId {
    /// Returns the canonical tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for LocaleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Canonicalise a locale tag, accepting `_` as a subtag separator.
///
/// Returns `None` when the tag is not a valid language identifier.
#[must_use]
pub fn canonicalise(tag: &str) -> Option<String> {
    let normalised = tag.trim().replace('_', "-");
    normalised
        .parse::<LanguageIdentifier>()
        .ok()
        .map(|identifier| identifier.to_string())
}

/// The closed set of supported locales, kept sorted for binary search.
#[derive(Clone, Debug, Default)]
pub struct LocaleRegistry {
    locales: Vec<LocaleId>,
}

impl LocaleRegistry {
    /// Build a registry from canonical tags.
    pub(crate) fn from_canonical(tags: impl IntoIterator<Item = String>) -> Self {
        let mut locales: Vec<LocaleId> = tags.into_iter().map(LocaleId).collect();
        locales.sort_unstable();
        locales.dedup();
        Self { locales }
    }

    /// Validate `tag`, returning its canonical [`LocaleId`].
    ///
    /// # Errors
    ///
    /// Returns [`NumberFormatError::UnknownLocale`] when the tag does not
    /// parse or names a locale outside the registry.
    pub fn validate(&self, tag: &str) -> Result<LocaleId> {
        canonicalise(tag)
            .and_then(|canonical| self.find(&canonical))
            .cloned()
            .ok_or_else(|| NumberFormatError::UnknownLocale {
                locale: tag.to_owned(),
            })
    }

    /// Whether `tag` names a supported locale.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        canonicalise(tag).is_some_and(|canonical| self.find(&canonical).is_some())
    }

    /// Supported locales in sorted order.
    #[must_use]
    pub fn locales(&self) -> &[LocaleId] {
        &self.locales
    }

    /// Number of supported locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    fn find(&self, canonical: &str) -> Option<&LocaleId> {
        self.locales
            .binary_search_by(|candidate| candidate.as_str().cmp(canonical))
            .ok()
            .and_then(|index| self.locales.get(index))
    }
}
