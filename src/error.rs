//! Error types for the configuration pool.

use thiserror::Error;

/// Boxed error returned by caller-supplied validation functions and hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by pool operations, option resolution and typed access.
#[derive(Debug, Error)]
pub enum Error {
    /// A required key was absent (or empty) after default substitution.
    #[error("no such key: {0:?}")]
    NoKey(String),

    /// `set` or `extract` was called on a section that doesn't exist.
    #[error("no such section: {0:?}")]
    NoSection(String),

    #[error("regexp validation failed for key: {0:?}")]
    RegexValidation(String),

    #[error("enum validation failed for key: {0:?}")]
    EnumValidation(String),

    /// Error produced by a caller-supplied validation function or hook,
    /// passed through as-is.
    #[error(transparent)]
    Validation(BoxError),

    /// A value is present but can't be parsed as the requested type.
    #[error("unable to convert value {value:?} for key {key:?} into {datatype}")]
    Conversion {
        key: String,
        value: String,
        datatype: &'static str,
    },

    /// A Report-strategy merge found a key that already holds another value.
    #[error("section {section:?}, key {key:?} already exists")]
    Conflict { section: String, key: String },

    /// A section couldn't be decoded into the requested record or map.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl Error {
    pub(crate) fn conversion(key: &str, value: &str, datatype: &'static str) -> Self {
        Error::Conversion {
            key: key.to_string(),
            value: value.to_string(),
            datatype,
        }
    }

    /// Returns the caller's own error when this is a pass-through
    /// validation failure.
    pub fn validation_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Error::Validation(inner) => Some(inner.as_ref()),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Decode(err.to_string())
    }
}
