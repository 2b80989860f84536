//! Long-polling transport against the Telegram Bot API.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use teloxide::payloads::{DeleteWebhookSetters, GetUpdatesSetters};
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use tgbot_core::{GatewayError, Result, ToCoreUpdate, Transport, Update};
use tracing::{debug, info, instrument};

use crate::adapters::TelegramUpdateWrapper;

/// [`Transport`] implementation over teloxide's `getUpdates` long poll.
///
/// Keeps the acknowledgement offset internally: every fetch requests
/// updates past the last batch, which acknowledges that batch on the
/// Telegram side.
pub struct TelegramTransport {
    bot: teloxide::Bot,
    poll_timeout_secs: u32,
    offset: AtomicI32,
    bot_id: i64,
    bot_username: Option<String>,
}

impl TelegramTransport {
    /// Creates the bot session and validates the credential via `getMe`.
    /// A rejected token is a fatal [`GatewayError::TransportAuth`].
    #[instrument(skip(token))]
    pub async fn connect(token: &str, poll_timeout_secs: u32) -> Result<Self> {
        let bot = teloxide::Bot::new(token);
        let me = bot
            .get_me()
            .await
            .map_err(|e| GatewayError::TransportAuth(e.to_string()))?;

        let bot_id = me.user.id.0 as i64;
        let bot_username = me.user.username.clone();
        info!(
            bot_id,
            username = bot_username.as_deref().unwrap_or("unknown"),
            "Connected to Telegram"
        );

        Ok(Self {
            bot,
            poll_timeout_secs,
            offset: AtomicI32::new(0),
            bot_id,
            bot_username,
        })
    }

    /// Identity of the connected bot, used to namespace storage keys.
    pub fn bot_id(&self) -> i64 {
        self.bot_id
    }

    pub fn bot_username(&self) -> Option<&str> {
        self.bot_username.as_deref()
    }

    /// The underlying teloxide bot, for the outbound sender adapter.
    pub fn bot(&self) -> teloxide::Bot {
        self.bot.clone()
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn clear_webhook(&self) -> Result<()> {
        self.bot
            .delete_webhook()
            .drop_pending_updates(true)
            .await
            .map_err(map_request_err)?;
        info!("Webhook deleted before polling; pending updates dropped");
        Ok(())
    }

    async fn fetch_updates(&self) -> Result<Vec<Update>> {
        let offset = self.offset.load(Ordering::SeqCst);
        let mut request = self
            .bot
            .get_updates()
            .timeout(self.poll_timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery]);
        if offset > 0 {
            request = request.offset(offset);
        }

        let raw = request.await.map_err(map_request_err)?;

        // Advance past every received update, routed or not, so the next
        // fetch acknowledges the whole batch.
        if let Some(last) = raw.last() {
            self.offset.store(last.id.0 as i32 + 1, Ordering::SeqCst);
        }

        let batch: Vec<Update> = raw
            .iter()
            .filter_map(|u| TelegramUpdateWrapper(u).to_core())
            .collect();
        if !batch.is_empty() {
            debug!(count = batch.len(), "Fetched update batch");
        }
        Ok(batch)
    }
}

/// Maps teloxide request errors onto the gateway taxonomy: network-level
/// failures and rate limits are transient; a rejected credential is fatal.
fn map_request_err(e: teloxide::RequestError) -> GatewayError {
    use teloxide::RequestError;
    match &e {
        RequestError::Network(_) | RequestError::Io(_) | RequestError::RetryAfter(_) => {
            GatewayError::TransportTransient(e.to_string())
        }
        RequestError::Api(teloxide::ApiError::InvalidToken) => {
            GatewayError::TransportAuth(e.to_string())
        }
        _ => GatewayError::TransportTransient(e.to_string()),
    }
}
