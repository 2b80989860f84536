//! Redis-backed state storage. Keys are namespaced by the [`KeyBuilder`]
//! so multiple logical bot instances can share one Redis; values are JSON.

use async_trait::async_trait;
use redis::AsyncCommands;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Result, StorageError};
use crate::key::{KeyBuilder, StorageKey};
use crate::{ConversationState, StateStorage};

/// Networked [`StateStorage`] reached over a Redis connection string.
///
/// Connectivity errors surface as [`StorageError::BackendUnavailable`];
/// there is no fallback to the in-process variant.
pub struct RedisStorage {
    key_builder: KeyBuilder,
    connection: Mutex<redis::aio::ConnectionManager>,
}

impl RedisStorage {
    /// Connects to `url` (e.g. `redis://:pass@host:6379/0`).
    ///
    /// The connection manager reconnects on its own after transient drops;
    /// an unreachable backend at construction time is an error.
    pub async fn connect(url: &str, key_builder: KeyBuilder) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_err)?;
        let manager = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_err)?;
        debug!("Connected to Redis state backend");
        Ok(Self {
            key_builder,
            connection: Mutex::new(manager),
        })
    }

    fn storage_key(&self, key: &StorageKey) -> String {
        self.key_builder.build(key)
    }
}

#[async_trait]
impl StateStorage for RedisStorage {
    async fn get(&self, key: &StorageKey) -> Result<ConversationState> {
        let redis_key = self.storage_key(key);
        let mut conn = self.connection.lock().await;
        let payload: Option<String> = conn.get(&redis_key).await.map_err(map_redis_err)?;
        match payload {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(ConversationState::default()),
        }
    }

    async fn set(&self, key: &StorageKey, state: ConversationState) -> Result<()> {
        let redis_key = self.storage_key(key);
        let payload = serde_json::to_string(&state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let mut conn = self.connection.lock().await;
        let _: () = conn.set(&redis_key, payload).await.map_err(map_redis_err)?;
        Ok(())
    }

    async fn clear(&self, key: &StorageKey) -> Result<()> {
        let redis_key = self.storage_key(key);
        let mut conn = self.connection.lock().await;
        let _: () = conn.del(&redis_key).await.map_err(map_redis_err)?;
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        // ConnectionManager drops its sockets when released; taking the lock
        // here just makes sure no in-flight command is interrupted.
        let _conn = self.connection.lock().await;
        debug!("Redis state backend released");
        Ok(())
    }
}

fn map_redis_err(e: redis::RedisError) -> StorageError {
    if e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() || e.is_timeout() {
        StorageError::BackendUnavailable(e.to_string())
    } else {
        StorageError::Backend(e.to_string())
    }
}
