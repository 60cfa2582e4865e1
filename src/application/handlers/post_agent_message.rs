//! PostAgentMessageHandler - records human agent replies.

use std::sync::Arc;

use tracing::info;

use crate::application::locks::ConversationLocks;
use crate::domain::conversation::Message;
use crate::domain::foundation::{ConversationId, DomainError, ValidationError};
use crate::domain::language::Language;
use crate::ports::ConversationRepository;

/// Command to post an agent message.
#[derive(Debug, Clone)]
pub struct PostAgentMessageCommand {
    pub conversation_id: ConversationId,
    pub text: String,
}

/// Handler for agent messages.
///
/// Agent messages skip classification and never trigger automated output;
/// the conversation status is unchanged.
pub struct PostAgentMessageHandler {
    repository: Arc<dyn ConversationRepository>,
    locks: ConversationLocks,
    default_language: Language,
}

impl PostAgentMessageHandler {
    pub fn new(
        repository: Arc<dyn ConversationRepository>,
        locks: ConversationLocks,
        default_language: Language,
    ) -> Self {
        Self {
            repository,
            locks,
            default_language,
        }
    }

    pub async fn handle(&self, cmd: PostAgentMessageCommand) -> Result<Message, DomainError> {
        if cmd.text.trim().is_empty() {
            return Err(ValidationError::empty_field("text").into());
        }

        let _guard = self.locks.acquire(cmd.conversation_id).await;

        let mut conversation = self
            .repository
            .find_by_id(&cmd.conversation_id)
            .await?
            .ok_or_else(|| DomainError::conversation_not_found(cmd.conversation_id))?;

        let detected = Language::detect(&cmd.text, self.default_language);
        let message = Message::agent(cmd.text, detected);
        conversation.record_agent_message(message.clone())?;
        self.repository.update(&conversation).await?;

        info!(conversation_id = %conversation.id(), "agent message recorded");
        Ok(message)
    }
}
