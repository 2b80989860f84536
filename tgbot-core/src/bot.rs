//! Outbound message sending abstraction.
//!
//! Transport-agnostic; the Telegram implementation lives in
//! `tgbot-telegram`, tests substitute recording fakes.

use async_trait::async_trait;

use crate::error::Result;

/// Sends messages to chats. One shared instance per process.
#[async_trait]
pub trait Bot: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;
}
