//! Unit test module
//!
//! Middleware unit tests live here, separate from source files.
//! Tests interact with middleware via public APIs only.

mod config_middleware_test;
mod language_middleware_test;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tgbot_core::{
    Bot, Config, Context, MessageUpdate, Result, Update, UpdateKind, User,
};

pub(crate) struct NullBot;

#[async_trait]
impl Bot for NullBot {
    async fn send_message(&self, _chat_id: i64, _text: &str) -> Result<()> {
        Ok(())
    }
}

pub(crate) fn empty_context() -> Context {
    Context::new(Arc::new(NullBot), None)
}

pub(crate) fn test_config() -> Arc<Config> {
    Arc::new(Config {
        bot_token: "test_token".to_string(),
        admin_ids: vec![111],
        use_redis: false,
        redis: None,
        api_base_url: None,
        poll_timeout_secs: 25,
        log_file: None,
    })
}

pub(crate) fn message_update(language_code: Option<&str>) -> Update {
    Update {
        id: 1,
        kind: UpdateKind::Message(MessageUpdate {
            chat_id: 100,
            from: Some(User {
                id: 200,
                username: Some("tester".to_string()),
                first_name: Some("Test".to_string()),
                language_code: language_code.map(str::to_string),
            }),
            text: Some("hi".to_string()),
        }),
        received_at: Utc::now(),
    }
}
