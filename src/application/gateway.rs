//! Generative response gateway.
//!
//! The only caller of the `AIProvider` port. Wraps every completion in a
//! hard timeout and a guaranteed template fallback, so the message pipeline
//! never sees a provider error and never waits longer than the configured
//! deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use tracing::warn;

use crate::domain::context::PromptWindow;
use crate::domain::intent::Intent;
use crate::domain::language::Language;
use crate::domain::templates::{self, TemplateContext};
use crate::ports::{AIProvider, CompletionRequest, FinishReason};

/// Confidence assigned to a fallback reply.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Confidence assigned when the model stopped before a natural end.
const PARTIAL_CONFIDENCE: f32 = 0.7;

const SYSTEM_PROMPT: &str = "You are a polite and helpful customer support \
assistant. Respond in a friendly, professional manner. Keep responses \
concise and helpful.";

/// Outcome of a generative call. Always produced, even when the provider
/// failed.
#[derive(Debug, Clone)]
pub struct GenerativeReply {
    pub text: String,
    pub confidence: f32,
    pub used_fallback: bool,
}

/// Timeout-and-fallback wrapper around an AI provider.
///
/// Configuration is fixed at construction; there is no runtime provider
/// switching.
pub struct GenerativeGateway {
    provider: Arc<dyn AIProvider>,
    timeout: Duration,
    max_tokens: u32,
}

impl GenerativeGateway {
    pub fn new(provider: Arc<dyn AIProvider>, timeout: Duration, max_tokens: u32) -> Self {
        Self {
            provider,
            timeout,
            max_tokens,
        }
    }

    /// Generates a reply to the prompt window in the given language.
    ///
    /// Never returns an error: on provider failure, timeout, or an empty
    /// completion, the reply is the general support template in the
    /// requested language with fixed low confidence.
    pub async fn generate(&self, window: &PromptWindow, language: Language) -> GenerativeReply {
        let request = CompletionRequest::new(
            system_prompt(language),
            window.message.clone(),
            language,
            self.max_tokens,
        )
        .with_history(window.history.clone());

        match timeout(self.timeout, self.provider.complete(request)).await {
            Ok(Ok(response)) if !response.content.trim().is_empty() => {
                let confidence = match response.finish_reason {
                    FinishReason::Stop => 1.0,
                    _ => PARTIAL_CONFIDENCE,
                };
                GenerativeReply {
                    text: response.content,
                    confidence: confidence.clamp(0.0, 1.0),
                    used_fallback: false,
                }
            }
            Ok(Ok(_)) => {
                warn!("provider returned empty completion, using fallback");
                self.fallback(language)
            }
            Ok(Err(error)) => {
                warn!(%error, "provider call failed, using fallback");
                self.fallback(language)
            }
            Err(_) => {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "provider call timed out, using fallback");
                self.fallback(language)
            }
        }
    }

    fn fallback(&self, language: Language) -> GenerativeReply {
        GenerativeReply {
            text: templates::render(Intent::General, language, &TemplateContext::default()),
            confidence: FALLBACK_CONFIDENCE,
            used_fallback: true,
        }
    }
}

fn system_prompt(language: Language) -> String {
    let instruction = match language {
        Language::Malayalam => "Respond in Malayalam language.",
        _ => "Respond in English language.",
    };
    format!("{} {}", SYSTEM_PROMPT, instruction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::TokenUsage;

    fn window(message: &str) -> PromptWindow {
        PromptWindow {
            history: String::new(),
            message: message.to_string(),
        }
    }

    fn gateway(provider: MockAIProvider) -> GenerativeGateway {
        GenerativeGateway::new(Arc::new(provider), Duration::from_secs(1), 150)
    }

    #[tokio::test]
    async fn successful_completion_has_full_confidence() {
        let provider = MockAIProvider::new().with_response("Happy to help with that.");

        let reply = gateway(provider)
            .generate(&window("Can you help me?"), Language::English)
            .await;

        assert_eq!(reply.text, "Happy to help with that.");
        assert_eq!(reply.confidence, 1.0);
        assert!(!reply.used_fallback);
    }

    #[tokio::test]
    async fn truncated_completion_has_reduced_confidence() {
        let provider = MockAIProvider::new().with_response_full(
            "A very long answer that got cut",
            TokenUsage::new(10, 150),
            FinishReason::Length,
        );

        let reply = gateway(provider)
            .generate(&window("Tell me everything"), Language::English)
            .await;

        assert_eq!(reply.confidence, 0.7);
        assert!(!reply.used_fallback);
    }

    #[tokio::test]
    async fn provider_error_falls_back_to_template() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "503".into(),
        });

        let reply = gateway(provider)
            .generate(&window("hello"), Language::English)
            .await;

        assert!(reply.used_fallback);
        assert_eq!(reply.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(
            reply.text,
            templates::render(Intent::General, Language::English, &TemplateContext::default())
        );
    }

    #[tokio::test]
    async fn timeout_falls_back_to_template() {
        let provider = MockAIProvider::new()
            .with_response("too slow")
            .with_delay(Duration::from_millis(200));
        let gateway =
            GenerativeGateway::new(Arc::new(provider), Duration::from_millis(20), 150);

        let reply = gateway.generate(&window("hello"), Language::English).await;

        assert!(reply.used_fallback);
        assert_eq!(reply.confidence, FALLBACK_CONFIDENCE);
    }

    #[tokio::test]
    async fn fallback_respects_requested_language() {
        let provider = MockAIProvider::new().with_error(MockError::AuthenticationFailed);

        let reply = gateway(provider)
            .generate(&window("ഹലോ"), Language::Malayalam)
            .await;

        assert!(reply.used_fallback);
        assert_eq!(
            reply.text,
            templates::render(Intent::General, Language::Malayalam, &TemplateContext::default())
        );
    }

    #[tokio::test]
    async fn empty_completion_falls_back() {
        let provider = MockAIProvider::new().with_response("   ");

        let reply = gateway(provider)
            .generate(&window("hello"), Language::English)
            .await;

        assert!(reply.used_fallback);
    }

    #[tokio::test]
    async fn system_prompt_pins_response_language() {
        let provider = MockAIProvider::new().with_response("ok");
        let provider_handle = provider.clone();

        gateway(provider)
            .generate(&window("hello"), Language::Malayalam)
            .await;

        let calls = provider_handle.get_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].system_prompt.contains("Respond in Malayalam language."));
    }

    #[tokio::test]
    async fn history_is_forwarded_to_the_provider() {
        let provider = MockAIProvider::new().with_response("ok");
        let provider_handle = provider.clone();
        let window = PromptWindow {
            history: "Customer: hi\nAssistant: hello".to_string(),
            message: "thanks".to_string(),
        };

        gateway(provider).generate(&window, Language::English).await;

        let calls = provider_handle.get_calls();
        assert_eq!(calls[0].history, "Customer: hi\nAssistant: hello");
        assert_eq!(calls[0].message, "thanks");
    }
}
