//! Test doubles shared by unit and behaviour tests.
//!
//! [`StaticSource`] serves locale documents from memory so tests can build
//! small format tables without touching the filesystem. [`LocaleOverride`]
//! scopes changes to `NUMFMT_LOCALE`.

use std::collections::BTreeMap;
use std::ffi::OsString;

use camino::Utf8PathBuf;

use crate::error::DataError;
use crate::loader::{DataSource, LocaleDocument};
use crate::selection::LOCALE_ENV_VAR;

/// In-memory [`DataSource`] holding raw JSON documents.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StaticSource {
    documents: BTreeMap<String, String>,
}

impl StaticSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the JSON document `raw` under `locale`.
    #[must_use]
    pub fn with_document(mut self, locale: &str, raw: &str) -> Self {
        self.documents.insert(locale.to_owned(), raw.to_owned());
        self
    }
}

impl DataSource for StaticSource {
    fn locales(&self) -> Result<Vec<String>, DataError> {
        Ok(self.documents.keys().cloned().collect())
    }

    fn load(&self, locale: &str) -> Result<LocaleDocument, DataError> {
        let raw = self
            .documents
            .get(locale)
            .ok_or_else(|| DataError::Read {
                path: Utf8PathBuf::from(format!("memory/{locale}.json")),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })?;
        LocaleDocument::from_json(locale, raw)
    }
}

/// Guard that overrides `NUMFMT_LOCALE` for the lifetime of the instance.
///
/// The guard captures any existing value and restores it when dropped.
/// Callers must serialise the surrounding tests (for example with a shared
/// `Mutex`) so the unsafe environment access stays race-free.
pub struct LocaleOverride {
    previous: Option<OsString>,
}

impl LocaleOverride {
    /// Sets `NUMFMT_LOCALE` to `locale` until the guard is dropped.
    #[must_use]
    pub fn set(locale: &str) -> Self {
        let previous = std::env::var_os(LOCALE_ENV_VAR);
        // SAFETY: Callers serialise the surrounding test, so no other thread
        // reads or writes the environment concurrently.
        unsafe {
            std::env::set_var(LOCALE_ENV_VAR, locale);
        }
        Self { previous }
    }

    /// Removes `NUMFMT_LOCALE` until the guard is dropped.
    #[must_use]
    pub fn clear() -> Self {
        let previous = std::env::var_os(LOCALE_ENV_VAR);
        // SAFETY: As for `set`, the caller serialises environment access.
        unsafe {
            std::env::remove_var(LOCALE_ENV_VAR);
        }
        Self { previous }
    }
}

impl Drop for LocaleOverride {
    fn drop(&mut self) {
        match &self.previous {
            // SAFETY: The guard only lives within a serialised test.
            Some(value) => unsafe { std::env::set_var(LOCALE_ENV_VAR, value) },
            // SAFETY: As above.
            None => unsafe { std::env::remove_var(LOCALE_ENV_VAR) },
        }
    }
}
