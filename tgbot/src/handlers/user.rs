//! `/start` for everyone else. Greets and opens the conversation FSM.

use std::sync::Arc;

use async_trait::async_trait;
use dispatch::{filters, Router};
use tgbot_core::{Context, Handler, Result, Update};

pub fn user_router() -> Router {
    Router::new("user", Arc::new(UserStartHandler))
        .filter(filters::message())
        .filter(filters::command("start"))
}

struct UserStartHandler;

#[async_trait]
impl Handler for UserStartHandler {
    async fn handle(&self, ctx: &Context, update: &Update) -> Result<()> {
        if let Some(fsm) = &ctx.fsm {
            fsm.set_step("greeted").await?;
        }
        if let Some(chat_id) = update.chat_id() {
            ctx.bot.send_message(chat_id, "Hello! Send me anything.").await?;
        }
        Ok(())
    }
}
