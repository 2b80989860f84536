//! Injects the process-wide config snapshot into every dispatch context.

use std::sync::Arc;

use async_trait::async_trait;
use tgbot_core::{Config, Context, Middleware, Result, Update};

/// Makes `Arc<Config>` available to downstream middleware and handlers.
/// Always first in the chain.
pub struct ConfigMiddleware {
    config: Arc<Config>,
}

impl ConfigMiddleware {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Middleware for ConfigMiddleware {
    async fn before(&self, ctx: &mut Context, _update: &Update) -> Result<bool> {
        ctx.config = Some(self.config.clone());
        Ok(true)
    }
}
