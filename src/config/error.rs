//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),

    #[error("Unsupported default language: {0} (expected 'en' or 'ml')")]
    UnsupportedLanguage(String),

    #[error("Context window size must be at least 1")]
    InvalidContextWindow,

    #[error("Context token budget must be at least 1")]
    InvalidTokenBudget,
}
