//! Conversation aggregate root.
//!
//! Owns the message history and enforces every lifecycle invariant in one
//! place: status only advances forward, escalation happens exactly once,
//! automated output is only recorded while the conversation is open, and a
//! resolved conversation is read-only.

use crate::domain::conversation::{ConversationStatus, Message, Sender};
use crate::domain::foundation::{
    AgentId, ConversationId, DomainError, ErrorCode, StateMachine, Timestamp, UserId,
};
use crate::domain::language::Language;

/// A customer-support conversation and its messages.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: ConversationId,
    user_id: UserId,
    language: Option<Language>,
    status: ConversationStatus,
    assigned_agent: Option<AgentId>,
    escalation_reason: Option<String>,
    started_at: Timestamp,
    escalated_at: Option<Timestamp>,
    assigned_at: Option<Timestamp>,
    resolved_at: Option<Timestamp>,
    ended_at: Option<Timestamp>,
    message_count: u32,
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates a new open conversation for a user.
    ///
    /// Language stays unset until the first message is detected.
    pub fn new(user_id: UserId) -> Self {
        Self {
            id: ConversationId::new(),
            user_id,
            language: None,
            status: ConversationStatus::Open,
            assigned_agent: None,
            escalation_reason: None,
            started_at: Timestamp::now(),
            escalated_at: None,
            assigned_at: None,
            resolved_at: None,
            ended_at: None,
            message_count: 0,
            messages: Vec::new(),
        }
    }

    /// Reconstitutes a conversation from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ConversationId,
        user_id: UserId,
        language: Option<Language>,
        status: ConversationStatus,
        assigned_agent: Option<AgentId>,
        escalation_reason: Option<String>,
        started_at: Timestamp,
        escalated_at: Option<Timestamp>,
        assigned_at: Option<Timestamp>,
        resolved_at: Option<Timestamp>,
        ended_at: Option<Timestamp>,
        messages: Vec<Message>,
    ) -> Self {
        let message_count = messages.len() as u32;
        Self {
            id,
            user_id,
            language,
            status,
            assigned_agent,
            escalation_reason,
            started_at,
            escalated_at,
            assigned_at,
            resolved_at,
            ended_at,
            message_count,
            messages,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn status(&self) -> ConversationStatus {
        self.status
    }

    pub fn assigned_agent(&self) -> Option<&AgentId> {
        self.assigned_agent.as_ref()
    }

    pub fn escalation_reason(&self) -> Option<&str> {
        self.escalation_reason.as_deref()
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn escalated_at(&self) -> Option<Timestamp> {
        self.escalated_at
    }

    pub fn assigned_at(&self) -> Option<Timestamp> {
        self.assigned_at
    }

    pub fn resolved_at(&self) -> Option<Timestamp> {
        self.resolved_at
    }

    pub fn ended_at(&self) -> Option<Timestamp> {
        self.ended_at
    }

    pub fn message_count(&self) -> u32 {
        self.message_count
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// The language responses should be written in.
    pub fn response_language(&self, detected: Language, default: Language) -> Language {
        Language::response_language(detected, self.language, default)
    }

    // === Mutations ===

    /// Applies a per-message language detection result.
    ///
    /// A concrete detection overwrites the conversation language. `Mixed`
    /// retains the prior language; on the very first message it establishes
    /// the configured default instead, so the conversation always has a
    /// concrete language after one processing cycle.
    pub fn apply_language_detection(&mut self, detected: Language, default: Language) {
        match detected {
            Language::Mixed => {
                if self.language.is_none() {
                    self.language = Some(default);
                }
            }
            concrete => self.language = Some(concrete),
        }
    }

    /// Records a customer message.
    ///
    /// Allowed in every non-terminal status: once escalated or assigned the
    /// message is still kept for the human channel, only automated output
    /// stops.
    pub fn record_user_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_writable()?;
        debug_assert_eq!(message.sender, Sender::User);
        self.append(message);
        Ok(())
    }

    /// Records an automated response (deterministic or generative).
    ///
    /// Rejected unless the conversation is still open: an automated sender
    /// must never appear after status leaves `Open`.
    pub fn record_automated_response(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_writable()?;
        if !message.sender.is_automated() {
            return Err(DomainError::validation(
                "sender",
                "record_automated_response requires an automated sender",
            ));
        }
        if !self.status.allows_automated_response() {
            return Err(DomainError::invalid_transition(format!(
                "Automated responses are disabled once a conversation is {}",
                self.status
            )));
        }
        self.append(message);
        Ok(())
    }

    /// Records a human agent message.
    ///
    /// Agents may only act once a human channel exists (escalated or
    /// assigned); a resolved conversation is terminal for writes.
    pub fn record_agent_message(&mut self, message: Message) -> Result<(), DomainError> {
        self.ensure_writable()?;
        if self.status == ConversationStatus::Open {
            return Err(DomainError::invalid_transition(
                "Agent messages require an escalated or assigned conversation",
            ));
        }
        debug_assert_eq!(message.sender, Sender::Agent);
        self.append(message);
        Ok(())
    }

    /// Escalates the conversation to human handling.
    ///
    /// Only valid from `Open`. Sets `escalated_at` exactly once and stores
    /// the reason. Irreversible.
    pub fn escalate(&mut self, reason: Option<String>) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(ConversationStatus::Escalated)
            .map_err(|_| {
                DomainError::invalid_transition(format!(
                    "Cannot escalate a conversation that is {}",
                    self.status
                ))
            })?;
        self.escalated_at = Some(Timestamp::now());
        self.escalation_reason = reason;
        Ok(())
    }

    /// Assigns a human agent to an escalated conversation.
    pub fn assign(&mut self, agent_id: AgentId) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(ConversationStatus::Assigned)
            .map_err(|_| {
                DomainError::invalid_transition(format!(
                    "Cannot assign an agent to a conversation that is {}",
                    self.status
                ))
            })?;
        self.assigned_agent = Some(agent_id);
        self.assigned_at = Some(Timestamp::now());
        Ok(())
    }

    /// Resolves the conversation. Terminal: sets both `resolved_at` and
    /// `ended_at`; only reads are permitted afterwards.
    pub fn resolve(&mut self) -> Result<(), DomainError> {
        self.status = self
            .status
            .transition_to(ConversationStatus::Resolved)
            .map_err(|_| {
                DomainError::invalid_transition(format!(
                    "Cannot resolve a conversation that is {}",
                    self.status
                ))
            })?;
        let now = Timestamp::now();
        self.resolved_at = Some(now);
        self.ended_at = Some(now);
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), DomainError> {
        if self.status == ConversationStatus::Resolved {
            return Err(DomainError::new(
                ErrorCode::ConversationResolved,
                "Conversation is resolved and no longer accepts messages",
            ));
        }
        Ok(())
    }

    fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.message_count += 1;
    }
}
