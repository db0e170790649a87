//! Error types for storage context configuration and registration.

use thiserror::Error;

/// Errors raised while configuring, validating, registering or resolving a context
#[derive(Debug, Error)]
pub enum ContextError {
    /// A builder or model setter received a blank or missing value
    #[error("Invalid argument: {0}")]
    Argument(String),

    /// The finalized options failed mode-specific validation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The context type already has a registration record
    #[error("Context {0} is already registered")]
    DuplicateRegistration(String),

    /// No implementation is registered for the requested capability
    #[error("Unable to resolve service of type {0}")]
    Resolution(String),
}

impl ContextError {
    pub(crate) fn argument(argument: &str, message: &str) -> Self {
        ContextError::Argument(format!("{}: {}", argument, message))
    }
}

impl From<config::ConfigError> for ContextError {
    fn from(err: config::ConfigError) -> Self {
        ContextError::Configuration(err.to_string())
    }
}

/// Reject blank input at the call site.
///
/// Returns the value untouched; surrounding whitespace is not trimmed.
pub(crate) fn require_non_blank<'a>(value: &'a str, argument: &str) -> Result<&'a str, ContextError> {
    if value.trim().is_empty() {
        return Err(ContextError::argument(argument, "must be provided"));
    }
    Ok(value)
}
