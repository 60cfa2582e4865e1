//! Message entity, exclusively owned by its conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MessageId, Timestamp};
use crate::domain::intent::Intent;
use crate::domain::language::Language;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The customer.
    User,
    /// Template engine output (deterministic path).
    AutomatedDeterministic,
    /// Generative model output (generative path).
    AutomatedGenerative,
    /// A human support agent.
    Agent,
}

impl Sender {
    /// True for either automated sender.
    pub fn is_automated(&self) -> bool {
        matches!(
            self,
            Sender::AutomatedDeterministic | Sender::AutomatedGenerative
        )
    }
}

/// A single message within a conversation.
///
/// Messages are append-only and totally ordered by `created_at` within
/// their conversation. `intent` is `None` for agent messages (which do not
/// re-run classification); automated responses carry the intent of the user
/// message that triggered them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
    pub detected_language: Language,
    pub intent: Option<Intent>,
    /// Confidence in [0,1]: 1.0 for deterministic/agent output,
    /// provider-reported for generative, fixed low value on fallback.
    pub confidence: f32,
    pub created_at: Timestamp,
}

impl Message {
    /// Creates a classified user message.
    pub fn user(text: impl Into<String>, detected_language: Language, intent: Intent) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::User,
            text: text.into(),
            detected_language,
            intent: Some(intent),
            confidence: 1.0,
            created_at: Timestamp::now(),
        }
    }

    /// Creates a deterministic template response.
    pub fn deterministic(text: impl Into<String>, language: Language, intent: Intent) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::AutomatedDeterministic,
            text: text.into(),
            detected_language: language,
            intent: Some(intent),
            confidence: 1.0,
            created_at: Timestamp::now(),
        }
    }

    /// Creates a generative model response with a provider-reported
    /// confidence, clamped into [0,1].
    pub fn generative(text: impl Into<String>, language: Language, confidence: f32) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::AutomatedGenerative,
            text: text.into(),
            detected_language: language,
            intent: Some(Intent::General),
            confidence: confidence.clamp(0.0, 1.0),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a human agent message. Agents do not re-run classification.
    pub fn agent(text: impl Into<String>, detected_language: Language) -> Self {
        Self {
            id: MessageId::new(),
            sender: Sender::Agent,
            text: text.into(),
            detected_language,
            intent: None,
            confidence: 1.0,
            created_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_classified_intent() {
        let msg = Message::user("where is my order", Language::English, Intent::OrderStatus);
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.intent, Some(Intent::OrderStatus));
        assert_eq!(msg.confidence, 1.0);
    }

    #[test]
    fn agent_message_has_no_intent() {
        let msg = Message::agent("Let me check that for you.", Language::English);
        assert_eq!(msg.sender, Sender::Agent);
        assert_eq!(msg.intent, None);
        assert_eq!(msg.confidence, 1.0);
    }

    #[test]
    fn generative_message_clamps_confidence() {
        let high = Message::generative("reply", Language::English, 1.7);
        assert_eq!(high.confidence, 1.0);

        let low = Message::generative("reply", Language::English, -0.2);
        assert_eq!(low.confidence, 0.0);
    }

    #[test]
    fn generative_message_is_general_intent() {
        let msg = Message::generative("reply", Language::English, 0.9);
        assert_eq!(msg.intent, Some(Intent::General));
        assert!(msg.sender.is_automated());
    }

    #[test]
    fn sender_automation_flags() {
        assert!(Sender::AutomatedDeterministic.is_automated());
        assert!(Sender::AutomatedGenerative.is_automated());
        assert!(!Sender::User.is_automated());
        assert!(!Sender::Agent.is_automated());
    }
}
