//! Resolves the locale for the current update and injects it into the
//! dispatch context.
//!
//! Must be registered after [`ApiMiddleware`](crate::ApiMiddleware): it
//! reads the API handle from the context to ask the backend for a per-user
//! locale override, falling back to the locale the update itself carries,
//! then to [`DEFAULT_LOCALE`].

use async_trait::async_trait;
use serde_json::json;
use tgbot_core::{Context, GatewayError, Middleware, Result, Update};
use tracing::debug;

pub const DEFAULT_LOCALE: &str = "en";

pub struct LanguageMiddleware;

impl LanguageMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LanguageMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Middleware for LanguageMiddleware {
    async fn before(&self, ctx: &mut Context, update: &Update) -> Result<bool> {
        let api = ctx.api.clone().ok_or_else(|| {
            GatewayError::Middleware(
                "LanguageMiddleware registered without ApiMiddleware before it".to_string(),
            )
        })?;

        let user = update.user();

        let mut locale = None;
        if let Some(user) = user {
            match api.request("profile/locale", json!({ "user_id": user.id })).await {
                Ok(value) => {
                    locale = value
                        .get("locale")
                        .and_then(|v| v.as_str())
                        .map(str::to_string);
                }
                Err(e) => {
                    debug!(user_id = user.id, error = %e, "locale lookup failed, using update locale");
                }
            }
        }

        let locale = locale
            .or_else(|| user.and_then(|u| u.language_code.clone()))
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        ctx.locale = Some(locale);
        Ok(true)
    }
}
