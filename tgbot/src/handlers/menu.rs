//! Callback-button presses.

use std::sync::Arc;

use async_trait::async_trait;
use dispatch::{filters, Router};
use tgbot_core::{Context, Handler, Result, Update, UpdateKind};

pub fn menu_router() -> Router {
    Router::new("menu", Arc::new(MenuHandler)).filter(filters::callback())
}

struct MenuHandler;

#[async_trait]
impl Handler for MenuHandler {
    async fn handle(&self, ctx: &Context, update: &Update) -> Result<()> {
        let UpdateKind::Callback(callback) = &update.kind else {
            return Ok(());
        };
        let Some(chat_id) = update.chat_id() else {
            return Ok(());
        };
        let choice = callback.data.as_deref().unwrap_or("nothing");
        ctx.bot
            .send_message(chat_id, &format!("You chose: {}", choice))
            .await?;
        Ok(())
    }
}
