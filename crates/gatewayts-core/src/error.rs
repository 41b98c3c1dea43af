//! Error handling for the gatewayts code generation library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use gatewayts_core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::registry("type '.pkg.Missing' is not registered"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

use crate::url_template::PathTemplateError;

/// Result type for gatewayts generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for gatewayts generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Schema registry is structurally unusable
    #[error("Registry error: {0}")]
    Registry(String),

    /// HTTP path pattern could not be tokenized
    #[error("Path template error: {0}")]
    PathTemplate(#[from] PathTemplateError),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    /// Create a new registry error
    pub fn registry<S: Into<String>>(msg: S) -> Self {
        Self::Registry(msg.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }
}

/// Flatten an error and its sources into a single line.
///
/// Tera nests the interesting message (an unmapped type, a bad placeholder)
/// several `source()` levels below the "failed to render" wrapper.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        message.push_str(": ");
        message.push_str(&source.to_string());
        current = source.source();
    }
    message
}
