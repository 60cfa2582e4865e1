//! In-Memory Conversation Repository
//!
//! Stores conversation aggregates in memory. Useful for testing and
//! development; swap in a database-backed implementation for production.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::conversation::Conversation;
use crate::domain::foundation::{ConversationId, DomainError, ErrorCode};
use crate::ports::ConversationRepository;

/// In-memory storage for conversation aggregates.
///
/// Each `save`/`update` replaces the whole aggregate under a single write
/// lock, so a message and its state transition land together or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationRepository {
    conversations: Arc<RwLock<HashMap<ConversationId, Conversation>>>,
}

impl InMemoryConversationRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored conversations (useful for tests).
    pub async fn clear(&self) {
        self.conversations.write().await.clear();
    }

    /// Get the number of stored conversations.
    pub async fn count(&self) -> usize {
        self.conversations.read().await.len()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn save(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut conversations = self.conversations.write().await;
        if conversations.contains_key(&conversation.id()) {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Conversation {} already exists", conversation.id()),
            ));
        }
        conversations.insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn update(&self, conversation: &Conversation) -> Result<(), DomainError> {
        let mut conversations = self.conversations.write().await;
        if !conversations.contains_key(&conversation.id()) {
            return Err(DomainError::conversation_not_found(conversation.id()));
        }
        conversations.insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ConversationId) -> Result<Option<Conversation>, DomainError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Message;
    use crate::domain::foundation::UserId;
    use crate::domain::intent::Intent;
    use crate::domain::language::Language;

    fn test_conversation() -> Conversation {
        Conversation::new(UserId::new("user-1").unwrap())
    }

    #[tokio::test]
    async fn save_and_find_round_trips_aggregate() {
        let repo = InMemoryConversationRepository::new();
        let conversation = test_conversation();
        let id = conversation.id();

        repo.save(&conversation).await.unwrap();

        let loaded = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(loaded.id(), id);
        assert_eq!(loaded.user_id(), conversation.user_id());
        assert_eq!(loaded.message_count(), 0);
    }

    #[tokio::test]
    async fn find_missing_conversation_returns_none() {
        let repo = InMemoryConversationRepository::new();
        let result = repo.find_by_id(&ConversationId::new()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn save_rejects_duplicate_id() {
        let repo = InMemoryConversationRepository::new();
        let conversation = test_conversation();

        repo.save(&conversation).await.unwrap();
        let err = repo.save(&conversation).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn update_requires_existing_conversation() {
        let repo = InMemoryConversationRepository::new();
        let conversation = test_conversation();

        let err = repo.update(&conversation).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConversationNotFound);
    }

    #[tokio::test]
    async fn update_persists_messages_with_the_aggregate() {
        let repo = InMemoryConversationRepository::new();
        let mut conversation = test_conversation();
        let id = conversation.id();

        repo.save(&conversation).await.unwrap();

        conversation
            .record_user_message(Message::user(
                "Where is my order?",
                Language::English,
                Intent::OrderStatus,
            ))
            .unwrap();
        repo.update(&conversation).await.unwrap();

        let loaded = repo.find_by_id(&id).await.unwrap().unwrap();
        assert_eq!(loaded.message_count(), 1);
        assert_eq!(loaded.messages()[0].text, "Where is my order?");
    }

    #[tokio::test]
    async fn concurrent_clones_share_storage() {
        let repo = InMemoryConversationRepository::new();
        let conversation = test_conversation();
        let id = conversation.id();

        let writer = repo.clone();
        tokio::spawn(async move {
            writer.save(&conversation).await.unwrap();
        })
        .await
        .unwrap();

        assert_eq!(repo.count().await, 1);
        assert!(repo.find_by_id(&id).await.unwrap().is_some());
    }
}
