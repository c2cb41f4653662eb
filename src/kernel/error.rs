//! # Pith Kernel Errors
//!
//! Defines error types specific to the Pith kernel.
//!
//! This module includes [`Error`], the single enum covering the failures the
//! kernel itself can raise: lookups of undefined services or parameters, and
//! typed-accessor mismatches. Errors raised inside consumer-supplied service
//! factories or event listeners propagate through the kernel unmodified; the
//! [`Error::Other`] variant and the `From<&str>` / `From<String>` conversions
//! exist so that consumer code can raise ad hoc errors without defining its
//! own error type.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

/// Custom error type for kernel operations
#[derive(Debug, ThisError)]
pub enum Error {
    /// Service resolution was attempted for an identifier with no definition.
    #[error("Undefined service '{id}'")]
    UndefinedService { id: String },

    /// Parameter lookup was attempted for a key with no stored value.
    #[error("Undefined parameter '{key}'")]
    UndefinedParameter { key: String },

    /// A typed service accessor was used with a type the stored instance
    /// does not have.
    #[error("Service '{id}' is not of the requested type '{expected}'")]
    ServiceType { id: String, expected: &'static str },

    /// A typed parameter accessor could not deserialize the stored value.
    #[error("Parameter '{key}' cannot be read as '{expected}': {source}")]
    ParameterType {
        key: String,
        expected: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Generic error with message, for consumer factories and listeners
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}
