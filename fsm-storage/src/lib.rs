//! # fsm-storage
//!
//! Per-conversation FSM state persistence: the [`StateStorage`] trait and
//! its two implementations: [`MemoryStorage`] (in-process, lost on
//! restart) and [`RedisStorage`] (networked, survives restarts). Selection
//! happens once at startup; both sit behind the same interface.

pub mod error;
pub mod key;
pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{Result, StorageError};
pub use key::{KeyBuilder, StorageKey};
pub use memory::MemoryStorage;
pub use redis_store::RedisStorage;

/// The FSM record for one conversation: current step plus arbitrary data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Current FSM step, `None` when the conversation is at rest.
    pub step: Option<String>,
    /// Arbitrary step-scoped data set by handlers.
    #[serde(default)]
    pub data: serde_json::Map<String, serde_json::Value>,
}

impl ConversationState {
    /// State positioned at `step` with no data.
    pub fn at_step(step: impl Into<String>) -> Self {
        Self {
            step: Some(step.into()),
            data: serde_json::Map::new(),
        }
    }
}

/// Key-value persistence for conversation state.
///
/// `get` on an unknown key returns [`ConversationState::default`]; `set`
/// overwrites the whole record; `clear` removes it. Implementations must
/// not fall back to another backend on failure: connectivity problems
/// surface as [`StorageError::BackendUnavailable`].
#[async_trait]
pub trait StateStorage: Send + Sync {
    async fn get(&self, key: &StorageKey) -> Result<ConversationState>;
    async fn set(&self, key: &StorageKey, state: ConversationState) -> Result<()>;
    async fn clear(&self, key: &StorageKey) -> Result<()>;

    /// Releases backend resources. No-op for backends without connections.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
