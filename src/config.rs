//! File-based configuration for number format lookups.
//!
//! Settings live in `numfmt.toml`. Every key is optional: `locale` pins the
//! default locale when `NUMFMT_LOCALE` is silent, `number_system` names the
//! default system (a role keyword or a system name), and `data_dir` points at
//! a directory of `<locale>.json` documents that replaces the bundled data.

use std::borrow::Cow;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use numfmt_common::{
    DataError, DirectorySource, LocaleSelection, NumberFormats, NumberSystemSelector,
    default_locale_for, normalise_locale,
};
use serde::Deserialize;
use thiserror::Error;

/// Conventional configuration file name.
pub const CONFIG_FILE_NAME: &str = "numfmt.toml";

/// Errors raised while loading configuration or the data it points at.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration at {path}: {source}")]
    Read {
        /// Location of the configuration file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML for [`FormatsConfig`].
    #[error("invalid configuration: {source}")]
    Parse {
        /// The TOML deserialisation error.
        #[source]
        source: Box<toml::de::Error>,
    },

    /// The configured data directory holds unusable locale data.
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Result alias for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings read from `numfmt.toml`.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FormatsConfig {
    /// Preferred locale when the caller and environment are silent.
    ///
    /// Whitespace-only values are ignored, so `locale = ""` behaves as if the
    /// key were absent.
    pub locale: Option<String>,
    /// Default number system: `default`, `native`, `traditional`, `finance`,
    /// or a system name such as `latn`.
    pub number_system: Option<String>,
    /// Directory of locale documents used instead of the bundled data.
    pub data_dir: Option<Utf8PathBuf>,
}

impl FormatsConfig {
    /// Loads configuration through the supplied loader.
    ///
    /// The loader receives `path` and decides how to produce the settings,
    /// which lets tests stub out the filesystem.
    ///
    /// # Errors
    ///
    /// Returns whatever [`ConfigError`] the loader reports.
    ///
    /// # Examples
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use numfmt::FormatsConfig;
    ///
    /// let config = FormatsConfig::load_with(Utf8Path::new("numfmt.toml"), |_| {
    ///     Ok(FormatsConfig::default())
    /// })?;
    /// assert!(config.locale().is_none());
    /// # Ok::<(), numfmt::ConfigError>(())
    /// ```
    pub fn load_with<F>(path: &Utf8Path, loader: F) -> Result<Self>
    where
        F: FnOnce(&Utf8Path) -> Result<Self>,
    {
        loader(path)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// A relative `data_dir` is resolved against the directory holding the
    /// file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn from_path(path: &Utf8Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;

        if let (Some(dir), Some(parent)) = (config.data_dir.as_mut(), path.parent())
            && dir.is_relative()
        {
            *dir = parent.join(dir.as_path());
        }

        debug!(target: "numfmt::config", "loaded configuration from {path}");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML, mistyped values, or
    /// unknown keys.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            source: Box::new(source),
        })
    }

    /// The configured locale, if one is set.
    #[must_use]
    pub fn locale(&self) -> Option<&str> {
        normalise_locale(self.locale.as_deref())
    }

    /// The configured number system, if one is set.
    #[must_use]
    pub fn number_system(&self) -> Option<&str> {
        self.number_system
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Selector for the configured number system, defaulting to the
    /// locale's default role.
    #[must_use]
    pub fn selector(&self) -> NumberSystemSelector {
        self.number_system()
            .map(NumberSystemSelector::from)
            .unwrap_or_default()
    }

    /// The configured data directory, if one is set.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Utf8Path> {
        self.data_dir.as_deref()
    }

    /// Builds the format table these settings describe.
    ///
    /// Without a `data_dir` the shared bundled table is borrowed; otherwise
    /// the directory is loaded and validated once.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Data`] when the directory cannot be read or
    /// holds malformed documents.
    pub fn number_formats(&self) -> Result<Cow<'static, NumberFormats>> {
        match self.data_dir() {
            Some(dir) => {
                let formats = NumberFormats::from_source(&DirectorySource::new(dir))?;
                Ok(Cow::Owned(formats))
            }
            None => Ok(Cow::Borrowed(NumberFormats::embedded())),
        }
    }

    /// Selects the default locale for `formats`, consulting
    /// `NUMFMT_LOCALE` before the configured locale.
    #[must_use]
    pub fn default_locale(&self, formats: &NumberFormats) -> Option<LocaleSelection> {
        default_locale_for(formats, self.locale())
    }
}
