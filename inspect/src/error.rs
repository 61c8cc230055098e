//! Error types for the inspector CLI.

use numfmt::{ConfigError, NumberFormatError};
use thiserror::Error;

/// Errors that stop an inspection.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The configuration or the data it names could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A locale or number-system query failed.
    #[error(transparent)]
    Format(#[from] NumberFormatError),

    /// No locale could be selected because the data set is empty.
    #[error("no locales are available to inspect")]
    NoLocales,
}

/// Result alias for inspector operations.
pub type Result<T> = std::result::Result<T, InspectError>;
