//! `/start` for administrators.

use std::sync::Arc;

use async_trait::async_trait;
use dispatch::{filters, Router};
use tgbot_core::{Context, Handler, Result, Update};

pub fn admin_router(admin_ids: Vec<i64>) -> Router {
    Router::new("admin", Arc::new(AdminStartHandler))
        .filter(filters::message())
        .filter(filters::command("start"))
        .filter(filters::from_user(admin_ids))
}

struct AdminStartHandler;

#[async_trait]
impl Handler for AdminStartHandler {
    async fn handle(&self, ctx: &Context, update: &Update) -> Result<()> {
        if let Some(chat_id) = update.chat_id() {
            ctx.bot.send_message(chat_id, "Hello, admin!").await?;
        }
        Ok(())
    }
}
