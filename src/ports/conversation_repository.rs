//! Conversation repository port.
//!
//! Persistence contract for the Conversation aggregate. The aggregate owns
//! its messages, and `save`/`update` persist the whole aggregate in one
//! call: each message-processing cycle is all-or-nothing, so a message is
//! never persisted with its state transition skipped.

use async_trait::async_trait;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, DomainError};

/// Repository port for Conversation aggregate persistence.
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Save a new conversation.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the id already exists or persistence fails
    async fn save(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Update an existing conversation, messages included, atomically.
    ///
    /// # Errors
    ///
    /// - `ConversationNotFound` if the conversation doesn't exist
    /// - `InternalError` on persistence failure
    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError>;

    /// Find a conversation by its ID, including all messages.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError>;
}
