//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `SUPPORT_DESK` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use support_desk::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod support;

pub use ai::{AiConfig, AiProvider};
pub use error::{ConfigError, ValidationError};
pub use support::SupportConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration (Anthropic/OpenAI/mock)
    #[serde(default)]
    pub ai: AiConfig,

    /// Message pipeline configuration
    #[serde(default)]
    pub support: SupportConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads environment variables with the
    /// `SUPPORT_DESK` prefix, nested values separated by `__`:
    ///
    /// - `SUPPORT_DESK__AI__PROVIDER=mock` -> `ai.provider = Mock`
    /// - `SUPPORT_DESK__SUPPORT__DEFAULT_LANGUAGE=ml` -> `support.default_language`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUPPORT_DESK")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.support.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize these tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("SUPPORT_DESK__AI__PROVIDER");
        env::remove_var("SUPPORT_DESK__AI__ANTHROPIC_API_KEY");
        env::remove_var("SUPPORT_DESK__AI__TIMEOUT_SECS");
        env::remove_var("SUPPORT_DESK__SUPPORT__DEFAULT_LANGUAGE");
    }

    #[test]
    fn loads_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.ai.provider, AiProvider::Anthropic);
        assert_eq!(config.support.default_language, "en");
    }

    #[test]
    fn reads_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SUPPORT_DESK__AI__PROVIDER", "mock");
        env::set_var("SUPPORT_DESK__AI__TIMEOUT_SECS", "5");
        env::set_var("SUPPORT_DESK__SUPPORT__DEFAULT_LANGUAGE", "ml");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.provider, AiProvider::Mock);
        assert_eq!(config.ai.timeout_secs, 5);
        assert_eq!(config.support.default_language, "ml");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_requires_key_for_selected_provider() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        // Default provider is Anthropic with no key configured.
        assert!(config.validate().is_err());
    }
}
