//! Injects the shared auxiliary API client handle into the dispatch
//! context. Registered only when the client was constructed successfully.

use std::sync::Arc;

use async_trait::async_trait;
use tgbot_core::{ApiClient, Context, Middleware, Result, Update};

pub struct ApiMiddleware {
    api: Arc<dyn ApiClient>,
}

impl ApiMiddleware {
    pub fn new(api: Arc<dyn ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Middleware for ApiMiddleware {
    async fn before(&self, ctx: &mut Context, _update: &Update) -> Result<bool> {
        ctx.api = Some(self.api.clone());
        Ok(true)
    }
}
