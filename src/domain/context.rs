//! Context window assembly for the generative path.
//!
//! The generative model only ever sees a bounded, filtered, PII-redacted
//! slice of the conversation: the most recent general-intent exchanges
//! between the customer and the generative responder. Deterministic
//! template output, escalation content and agent messages never leak into
//! generative context.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::conversation::{Conversation, Message, Sender};
use crate::domain::intent::Intent;

/// The redaction placeholder.
const REDACTED: &str = "[REDACTED]";

/// PII patterns stripped from any text bound for the generative provider.
static PII_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // Email addresses
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
        // Payment-card-like digit groups (optionally space/dash separated)
        Regex::new(r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b").unwrap(),
        // Generic long digit sequences (account/card identifiers)
        Regex::new(r"\b\d{12,19}\b").unwrap(),
        // Ten-digit phone numbers
        Regex::new(r"\b\d{10}\b").unwrap(),
    ]
});

/// Replaces every PII pattern match with a fixed placeholder.
pub fn redact_pii(input: &str) -> String {
    let mut result = input.to_string();
    for pattern in PII_PATTERNS.iter() {
        result = pattern.replace_all(&result, REDACTED).to_string();
    }
    result
}

/// Estimated token count, ~4 characters per token.
pub fn estimate_tokens(text: &str) -> u32 {
    (text.chars().count() as u32 + 3) / 4
}

/// The assembled, budget-checked input for a generative call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptWindow {
    /// Rendered prior turns, oldest first. Empty when there is no
    /// qualifying history or the current message consumed the budget.
    pub history: String,
    /// The redacted (and possibly truncated) current user message.
    pub message: String,
}

/// Builds bounded context windows from conversation history.
#[derive(Debug, Clone)]
pub struct ContextWindowBuilder {
    /// Maximum retained messages (default 10, i.e. 5 exchanges).
    max_messages: usize,
    /// Combined token budget for history plus current message.
    token_budget: u32,
}

impl ContextWindowBuilder {
    pub fn new(max_messages: usize, token_budget: u32) -> Self {
        Self {
            max_messages,
            token_budget,
        }
    }

    /// Assembles the prompt window for `current_message`.
    ///
    /// Retains the most recent `max_messages` general-intent turns between
    /// the customer and the generative responder, redacts PII everywhere,
    /// and evicts oldest turns first until the window fits the token
    /// budget. If the current message alone exceeds the budget, the history
    /// is emptied and the message is truncated to fit. Never fails.
    pub fn build(&self, conversation: Option<&Conversation>, current_message: &str) -> PromptWindow {
        let mut message = redact_pii(current_message);

        if estimate_tokens(&message) > self.token_budget {
            message = truncate_to_tokens(&message, self.token_budget);
            return PromptWindow {
                history: String::new(),
                message,
            };
        }

        let mut lines: Vec<String> = match conversation {
            Some(conv) => conv
                .messages()
                .iter()
                .filter(|m| Self::qualifies(m))
                .rev()
                .take(self.max_messages)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .map(Self::render_turn)
                .collect(),
            None => Vec::new(),
        };

        let message_tokens = estimate_tokens(&message);
        while !lines.is_empty()
            && estimate_tokens(&lines.join("\n")) + message_tokens > self.token_budget
        {
            lines.remove(0);
        }

        PromptWindow {
            history: lines.join("\n"),
            message,
        }
    }

    /// Only customer and generative-responder turns with general intent may
    /// feed the generative path.
    fn qualifies(message: &Message) -> bool {
        matches!(message.sender, Sender::User | Sender::AutomatedGenerative)
            && message.intent == Some(Intent::General)
    }

    fn render_turn(message: &Message) -> String {
        let label = match message.sender {
            Sender::User => "Customer",
            _ => "Assistant",
        };
        format!("{}: {}", label, redact_pii(&message.text))
    }
}

impl Default for ContextWindowBuilder {
    fn default() -> Self {
        Self::new(10, 500)
    }
}

fn truncate_to_tokens(text: &str, budget: u32) -> String {
    let max_chars = budget as usize * 4;
    text.chars().take(max_chars).collect()
}
