//! In-process state storage. No external dependency, never fails on
//! connectivity grounds; contents are lost when the process restarts.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::key::StorageKey;
use crate::{ConversationState, StateStorage};

/// Ephemeral [`StateStorage`] backed by a process-local map.
#[derive(Default)]
pub struct MemoryStorage {
    states: RwLock<HashMap<StorageKey, ConversationState>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStorage for MemoryStorage {
    async fn get(&self, key: &StorageKey) -> Result<ConversationState> {
        let states = self.states.read().unwrap_or_else(|e| e.into_inner());
        Ok(states.get(key).cloned().unwrap_or_default())
    }

    async fn set(&self, key: &StorageKey, state: ConversationState) -> Result<()> {
        let mut states = self.states.write().unwrap_or_else(|e| e.into_inner());
        states.insert(*key, state);
        Ok(())
    }

    async fn clear(&self, key: &StorageKey) -> Result<()> {
        let mut states = self.states.write().unwrap_or_else(|e| e.into_inner());
        states.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(chat_id: i64, user_id: i64) -> StorageKey {
        StorageKey::new(1, chat_id, user_id)
    }

    /// **Test: get on an unknown key returns the default state.**
    #[tokio::test]
    async fn test_get_missing_returns_default() {
        let storage = MemoryStorage::new();
        let state = storage.get(&key(1, 1)).await.unwrap();
        assert_eq!(state, ConversationState::default());
        assert!(state.step.is_none());
    }

    /// **Test: get after set returns the exact value set.**
    #[tokio::test]
    async fn test_get_after_set_round_trips() {
        let storage = MemoryStorage::new();
        let mut state = ConversationState::at_step("asking_name");
        state
            .data
            .insert("attempts".to_string(), serde_json::json!(2));

        storage.set(&key(1, 1), state.clone()).await.unwrap();
        assert_eq!(storage.get(&key(1, 1)).await.unwrap(), state);
    }

    /// **Test: clear removes the record; a following get returns default.**
    #[tokio::test]
    async fn test_clear_resets_to_default() {
        let storage = MemoryStorage::new();
        storage
            .set(&key(1, 1), ConversationState::at_step("s"))
            .await
            .unwrap();
        storage.clear(&key(1, 1)).await.unwrap();
        assert_eq!(
            storage.get(&key(1, 1)).await.unwrap(),
            ConversationState::default()
        );
    }

    /// **Test: a fresh instance (simulated restart) does not see prior data.**
    #[tokio::test]
    async fn test_contents_do_not_survive_restart() {
        let storage = MemoryStorage::new();
        storage
            .set(&key(1, 1), ConversationState::at_step("s"))
            .await
            .unwrap();
        drop(storage);

        let restarted = MemoryStorage::new();
        assert_eq!(
            restarted.get(&key(1, 1)).await.unwrap(),
            ConversationState::default()
        );
    }

    /// **Test: concurrent sets on different keys both land.**
    #[tokio::test]
    async fn test_concurrent_sets_on_different_keys() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let a = {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .set(&key(1, 1), ConversationState::at_step("a"))
                    .await
            })
        };
        let b = {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .set(&key(2, 2), ConversationState::at_step("b"))
                    .await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(
            storage.get(&key(1, 1)).await.unwrap().step.as_deref(),
            Some("a")
        );
        assert_eq!(
            storage.get(&key(2, 2)).await.unwrap().step.as_deref(),
            Some("b")
        );
    }

    /// **Test: concurrent sets on the same key leave one of the two writes,
    /// never a merge.**
    #[tokio::test]
    async fn test_concurrent_sets_on_same_key_keep_one_write() {
        let storage = std::sync::Arc::new(MemoryStorage::new());
        let a = {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .set(&key(1, 1), ConversationState::at_step("first"))
                    .await
            })
        };
        let b = {
            let storage = storage.clone();
            tokio::spawn(async move {
                storage
                    .set(&key(1, 1), ConversationState::at_step("second"))
                    .await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let step = storage.get(&key(1, 1)).await.unwrap().step.unwrap();
        assert!(step == "first" || step == "second", "got {step}");
    }
}
