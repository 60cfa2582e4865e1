//! Response routing: the single decision point for automated output.
//!
//! Every inbound user message flows through [`route`]. The rule that no
//! automated response is produced once a conversation leaves `Open` is
//! enforced here rather than by guards at each call site.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::ConversationStatus;
use crate::domain::intent::Intent;

/// How a user message is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponsePath {
    /// Fixed template keyed by intent and language.
    Deterministic,
    /// Generative model via the context window and gateway.
    Generative,
    /// Escalate to human handling first; no automated response for this
    /// message (the escalation preempts response generation).
    Escalate,
    /// Record the message only; the conversation is in human hands.
    Suppressed,
}

impl ResponsePath {
    /// True when the path produces an automated response message.
    pub fn produces_response(&self) -> bool {
        matches!(self, ResponsePath::Deterministic | ResponsePath::Generative)
    }
}

/// Decides the response path for a message given the conversation status at
/// processing time and the classified intent.
///
/// Pure and deterministic: together with the classifier's determinism this
/// makes every blocking decision auditable after the fact.
pub fn route(status: ConversationStatus, intent: Intent) -> ResponsePath {
    if !status.allows_automated_response() {
        return ResponsePath::Suppressed;
    }
    match intent {
        Intent::Escalation => ResponsePath::Escalate,
        Intent::General => ResponsePath::Generative,
        Intent::OrderStatus | Intent::ReturnRefund | Intent::Policy => {
            ResponsePath::Deterministic
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL_STATUSES: [ConversationStatus; 4] = [
        ConversationStatus::Open,
        ConversationStatus::Escalated,
        ConversationStatus::Assigned,
        ConversationStatus::Resolved,
    ];

    const ALL_INTENTS: [Intent; 5] = [
        Intent::OrderStatus,
        Intent::ReturnRefund,
        Intent::Policy,
        Intent::Escalation,
        Intent::General,
    ];

    #[test]
    fn open_general_goes_generative() {
        assert_eq!(
            route(ConversationStatus::Open, Intent::General),
            ResponsePath::Generative
        );
    }

    #[test]
    fn open_specific_intents_go_deterministic() {
        for intent in [Intent::OrderStatus, Intent::ReturnRefund, Intent::Policy] {
            assert_eq!(
                route(ConversationStatus::Open, intent),
                ResponsePath::Deterministic
            );
        }
    }

    #[test]
    fn open_escalation_escalates_without_response() {
        let path = route(ConversationStatus::Open, Intent::Escalation);
        assert_eq!(path, ResponsePath::Escalate);
        assert!(!path.produces_response());
    }

    #[test]
    fn non_open_status_suppresses_every_intent() {
        for status in [
            ConversationStatus::Escalated,
            ConversationStatus::Assigned,
            ConversationStatus::Resolved,
        ] {
            for intent in ALL_INTENTS {
                assert_eq!(route(status, intent), ResponsePath::Suppressed);
            }
        }
    }

    proptest! {
        // The absolute guarantee: the generative path is only ever chosen
        // while the conversation is open.
        #[test]
        fn generative_path_requires_open(s in 0usize..4, i in 0usize..5) {
            let status = ALL_STATUSES[s];
            let intent = ALL_INTENTS[i];
            if route(status, intent) == ResponsePath::Generative {
                prop_assert_eq!(status, ConversationStatus::Open);
            }
        }

        #[test]
        fn routing_is_deterministic(s in 0usize..4, i in 0usize..5) {
            let status = ALL_STATUSES[s];
            let intent = ALL_INTENTS[i];
            prop_assert_eq!(route(status, intent), route(status, intent));
        }
    }
}
