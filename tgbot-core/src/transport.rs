//! Update transport abstraction: long-polling fetch plus the startup
//! webhook clear. The Telegram implementation lives in `tgbot-telegram`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Update;

/// Source of inbound updates.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Removes any registered push-delivery endpoint and discards updates
    /// queued while the bot was offline. Idempotent; safe when no webhook
    /// exists.
    async fn clear_webhook(&self) -> Result<()>;

    /// Fetches the next batch of updates, waiting at most the configured
    /// poll timeout. Fetching a batch implicitly acknowledges the previous
    /// one by advancing the offset on the next request. May return an empty
    /// batch on timeout.
    async fn fetch_updates(&self) -> Result<Vec<Update>>;
}
