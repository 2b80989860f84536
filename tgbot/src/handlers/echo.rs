//! Catch-all echo for text messages.
//!
//! Reads the conversation step to show FSM-aware behavior. When the state
//! backend is unreachable the handler proceeds statelessly rather than
//! failing the update.

use std::sync::Arc;

use async_trait::async_trait;
use dispatch::{filters, Router};
use fsm_storage::StorageError;
use tgbot_core::{Context, Handler, Result, Update};
use tracing::warn;

pub fn echo_router() -> Router {
    Router::new("echo", Arc::new(EchoHandler)).filter(filters::message())
}

struct EchoHandler;

#[async_trait]
impl Handler for EchoHandler {
    async fn handle(&self, ctx: &Context, update: &Update) -> Result<()> {
        let Some(text) = update.text() else {
            return Ok(());
        };
        let Some(chat_id) = update.chat_id() else {
            return Ok(());
        };

        let step = match &ctx.fsm {
            Some(fsm) => match fsm.get().await {
                Ok(state) => state.step,
                Err(StorageError::BackendUnavailable(reason)) => {
                    warn!(chat_id, reason = %reason, "State backend unavailable; echoing statelessly");
                    None
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        };

        let reply = match step {
            Some(step) => format!("[{}] {}", step, text),
            None => text.to_string(),
        };
        ctx.bot.send_message(chat_id, &reply).await?;
        Ok(())
    }
}
