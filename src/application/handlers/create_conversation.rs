//! CreateConversationHandler - opens a new conversation for a user.

use std::sync::Arc;

use tracing::info;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::ConversationRepository;

/// Command to open a new conversation.
#[derive(Debug, Clone)]
pub struct CreateConversationCommand {
    pub user_id: UserId,
}

/// Handler for opening conversations.
pub struct CreateConversationHandler {
    repository: Arc<dyn ConversationRepository>,
}

impl CreateConversationHandler {
    pub fn new(repository: Arc<dyn ConversationRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateConversationCommand,
    ) -> Result<Conversation, DomainError> {
        let conversation = Conversation::new(cmd.user_id);
        self.repository.save(&conversation).await?;

        info!(
            conversation_id = %conversation.id(),
            user_id = %conversation.user_id(),
            "conversation opened"
        );
        Ok(conversation)
    }
}
