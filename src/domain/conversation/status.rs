//! Conversation lifecycle status.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a support conversation.
///
/// Status only ever advances forward through
/// Open → Escalated → Assigned → Resolved. Escalation is irreversible:
/// once status leaves `Open`, no automated responder may act again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversationStatus {
    Open,
    Escalated,
    Assigned,
    Resolved,
}

impl ConversationStatus {
    /// True while automated responders (deterministic or generative) may
    /// still act on the conversation.
    pub fn allows_automated_response(&self) -> bool {
        matches!(self, ConversationStatus::Open)
    }
}

impl StateMachine for ConversationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConversationStatus::*;
        matches!(
            (self, target),
            (Open, Escalated) | (Escalated, Assigned) | (Escalated, Resolved) | (Assigned, Resolved)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConversationStatus::*;
        match self {
            Open => vec![Escalated],
            Escalated => vec![Assigned, Resolved],
            Assigned => vec![Resolved],
            Resolved => vec![],
        }
    }
}

impl fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConversationStatus::Open => "open",
            ConversationStatus::Escalated => "escalated",
            ConversationStatus::Assigned => "assigned",
            ConversationStatus::Resolved => "resolved",
        };
        write!(f, "{}", s)
    }
}
