//! Per-conversation serialization.
//!
//! Message handling for one conversation is a read-classify-route-mutate
//! unit of work. Handlers hold that conversation's lock for the whole unit,
//! so concurrent messages to the same conversation apply one at a time
//! while different conversations proceed in parallel.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::ConversationId;

/// Registry of per-conversation mutexes.
#[derive(Debug, Clone, Default)]
pub struct ConversationLocks {
    locks: Arc<Mutex<HashMap<ConversationId, Arc<AsyncMutex<()>>>>>,
}

impl ConversationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a conversation, creating it on first use.
    pub async fn acquire(&self, id: ConversationId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            Arc::clone(locks.entry(id).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of conversations with a registered lock.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.lock().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_conversation_is_serialized() {
        let locks = ConversationLocks::new();
        let id = ConversationId::new();
        let counter = Arc::new(Mutex::new(0u32));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let locks = locks.clone();
            let counter = Arc::clone(&counter);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(id).await;
                let before = *counter.lock().unwrap();
                tokio::time::sleep(Duration::from_millis(1)).await;
                *counter.lock().unwrap() = before + 1;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(*counter.lock().unwrap(), 8);
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn different_conversations_do_not_block_each_other() {
        let locks = ConversationLocks::new();
        let first = ConversationId::new();
        let second = ConversationId::new();

        let _guard = locks.acquire(first).await;

        // Acquiring a different conversation's lock must not wait.
        let acquired =
            tokio::time::timeout(Duration::from_millis(50), locks.acquire(second)).await;
        assert!(acquired.is_ok());
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn reacquire_after_release() {
        let locks = ConversationLocks::new();
        let id = ConversationId::new();

        drop(locks.acquire(id).await);
        let reacquired = tokio::time::timeout(Duration::from_millis(50), locks.acquire(id)).await;
        assert!(reacquired.is_ok());
    }
}
