//! Per-dispatch context: the mutable bag of attributes middleware builds
//! for exactly one update, plus the FSM handle scoped to its conversation.

use std::sync::Arc;

use fsm_storage::{ConversationState, StateStorage, StorageKey};

use crate::api::ApiClient;
use crate::bot::Bot;
use crate::config::Config;

/// State access scoped to one conversation key.
///
/// Thin wrapper pairing the process-wide storage with the key resolved for
/// the current update. The dispatcher holds the per-key lock for the whole
/// dispatch, so read-modify-write helpers here cannot race with another
/// dispatch on the same key.
#[derive(Clone)]
pub struct FsmContext {
    storage: Arc<dyn StateStorage>,
    key: StorageKey,
}

impl FsmContext {
    pub fn new(storage: Arc<dyn StateStorage>, key: StorageKey) -> Self {
        Self { storage, key }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub async fn get(&self) -> fsm_storage::Result<ConversationState> {
        self.storage.get(&self.key).await
    }

    pub async fn set(&self, state: ConversationState) -> fsm_storage::Result<()> {
        self.storage.set(&self.key, state).await
    }

    pub async fn clear(&self) -> fsm_storage::Result<()> {
        self.storage.clear(&self.key).await
    }

    /// Moves the FSM to `step`, keeping existing data.
    pub async fn set_step(&self, step: impl Into<String>) -> fsm_storage::Result<()> {
        let mut state = self.get().await?;
        state.step = Some(step.into());
        self.set(state).await
    }
}

/// Mutable per-dispatch attribute bag.
///
/// Built fresh for every update, filled by middleware on the way in,
/// discarded after the handler completes. Never shared across concurrent
/// dispatches.
pub struct Context {
    /// Outbound sender for the messaging platform.
    pub bot: Arc<dyn Bot>,
    /// Injected by ConfigMiddleware.
    pub config: Option<Arc<Config>>,
    /// Injected by ApiMiddleware when an API client is configured.
    pub api: Option<Arc<dyn ApiClient>>,
    /// Injected by LanguageMiddleware.
    pub locale: Option<String>,
    /// Present when the update has a conversation key.
    pub fsm: Option<FsmContext>,
}

impl Context {
    pub fn new(bot: Arc<dyn Bot>, fsm: Option<FsmContext>) -> Self {
        Self {
            bot,
            config: None,
            api: None,
            locale: None,
            fsm,
        }
    }
}
