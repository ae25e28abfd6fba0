//! Error types for tasklog
//!
//! Caller mistakes surface as `Validation`. Damaged or missing store files are
//! never errors on the read path; the store degrades to an empty list instead.
//! Write-side failures (`Io`, `Json`) still propagate because the caller's
//! mutation would otherwise be lost silently.

use thiserror::Error;

/// Main error type for tasklog operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// True for errors caused by bad caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result type alias for tasklog operations
pub type Result<T> = std::result::Result<T, Error>;
