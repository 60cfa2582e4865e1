//! Support pipeline configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::language::Language;

/// Message pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SupportConfig {
    /// Default language code for detection and responses ("en" or "ml")
    #[serde(default = "default_language_code")]
    pub default_language: String,

    /// Context window size in messages (10 = 5 exchanges)
    #[serde(default = "default_window_messages")]
    pub context_window_messages: usize,

    /// Combined token budget for generative context plus current message
    #[serde(default = "default_token_budget")]
    pub context_token_budget: u32,
}

impl SupportConfig {
    /// The configured default language as a domain value.
    pub fn language(&self) -> Language {
        match self.default_language.as_str() {
            "ml" => Language::Malayalam,
            _ => Language::English,
        }
    }

    /// Validate support configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !matches!(self.default_language.as_str(), "en" | "ml") {
            return Err(ValidationError::UnsupportedLanguage(
                self.default_language.clone(),
            ));
        }
        if self.context_window_messages == 0 {
            return Err(ValidationError::InvalidContextWindow);
        }
        if self.context_token_budget == 0 {
            return Err(ValidationError::InvalidTokenBudget);
        }
        Ok(())
    }
}

impl Default for SupportConfig {
    fn default() -> Self {
        Self {
            default_language: default_language_code(),
            context_window_messages: default_window_messages(),
            context_token_budget: default_token_budget(),
        }
    }
}

fn default_language_code() -> String {
    "en".to_string()
}

fn default_window_messages() -> usize {
    10
}

fn default_token_budget() -> u32 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_english_ten_messages_500_tokens() {
        let config = SupportConfig::default();
        assert_eq!(config.language(), Language::English);
        assert_eq!(config.context_window_messages, 10);
        assert_eq!(config.context_token_budget, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malayalam_default_language() {
        let config = SupportConfig {
            default_language: "ml".to_string(),
            ..Default::default()
        };
        assert_eq!(config.language(), Language::Malayalam);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_language_code_is_rejected() {
        let config = SupportConfig {
            default_language: "fr".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnsupportedLanguage(_))
        ));
    }

    #[test]
    fn zero_window_is_rejected() {
        let config = SupportConfig {
            context_window_messages: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidContextWindow)
        ));
    }
}
