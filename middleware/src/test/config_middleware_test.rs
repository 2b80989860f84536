use std::sync::Arc;

use tgbot_core::Middleware;

use super::{empty_context, message_update, test_config};
use crate::ConfigMiddleware;

/// **Test: ConfigMiddleware injects the shared config and passes through.**
#[tokio::test]
async fn test_injects_config_and_continues() {
    let config = test_config();
    let middleware = ConfigMiddleware::new(config.clone());
    let mut ctx = empty_context();

    let should_continue = middleware
        .before(&mut ctx, &message_update(None))
        .await
        .unwrap();

    assert!(should_continue);
    let injected = ctx.config.expect("config injected");
    assert!(Arc::ptr_eq(&injected, &config));
}
