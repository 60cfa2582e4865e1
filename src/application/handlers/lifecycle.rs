//! Lifecycle handlers: manual escalation, agent assignment, resolution.
//!
//! Each operation is load-validate-mutate-update under the conversation's
//! lock. A rejected transition leaves the conversation untouched.

use std::sync::Arc;

use tracing::info;

use crate::application::locks::ConversationLocks;
use crate::domain::conversation::Conversation;
use crate::domain::foundation::{AgentId, ConversationId, DomainError};
use crate::ports::ConversationRepository;

/// Command to escalate a conversation to human handling.
#[derive(Debug, Clone)]
pub struct EscalateCommand {
    pub conversation_id: ConversationId,
    pub reason: Option<String>,
}

/// Handler for manual escalation. Fails unless the conversation is Open.
pub struct EscalateHandler {
    repository: Arc<dyn ConversationRepository>,
    locks: ConversationLocks,
}

impl EscalateHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>, locks: ConversationLocks) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: EscalateCommand) -> Result<Conversation, DomainError> {
        let _guard = self.locks.acquire(cmd.conversation_id).await;

        let mut conversation = load(&*self.repository, cmd.conversation_id).await?;
        conversation.escalate(cmd.reason)?;
        self.repository.update(&conversation).await?;

        info!(conversation_id = %conversation.id(), "conversation escalated");
        Ok(conversation)
    }
}

/// Command to assign an agent to an escalated conversation.
#[derive(Debug, Clone)]
pub struct AssignAgentCommand {
    pub conversation_id: ConversationId,
    pub agent_id: AgentId,
}

/// Handler for agent assignment. Fails unless the conversation is Escalated.
pub struct AssignAgentHandler {
    repository: Arc<dyn ConversationRepository>,
    locks: ConversationLocks,
}

impl AssignAgentHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>, locks: ConversationLocks) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: AssignAgentCommand) -> Result<Conversation, DomainError> {
        let _guard = self.locks.acquire(cmd.conversation_id).await;

        let mut conversation = load(&*self.repository, cmd.conversation_id).await?;
        conversation.assign(cmd.agent_id.clone())?;
        self.repository.update(&conversation).await?;

        info!(
            conversation_id = %conversation.id(),
            agent_id = %cmd.agent_id,
            "agent assigned"
        );
        Ok(conversation)
    }
}

/// Command to resolve a conversation.
#[derive(Debug, Clone)]
pub struct ResolveCommand {
    pub conversation_id: ConversationId,
}

/// Handler for resolution. Fails if the conversation is already Resolved.
pub struct ResolveHandler {
    repository: Arc<dyn ConversationRepository>,
    locks: ConversationLocks,
}

impl ResolveHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>, locks: ConversationLocks) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: ResolveCommand) -> Result<Conversation, DomainError> {
        let _guard = self.locks.acquire(cmd.conversation_id).await;

        let mut conversation = load(&*self.repository, cmd.conversation_id).await?;
        conversation.resolve()?;
        self.repository.update(&conversation).await?;

        info!(conversation_id = %conversation.id(), "conversation resolved");
        Ok(conversation)
    }
}

async fn load(
    repository: &dyn ConversationRepository,
    id: ConversationId,
) -> Result<Conversation, DomainError> {
    repository
        .find_by_id(&id)
        .await?
        .ok_or_else(|| DomainError::conversation_not_found(id))
}
