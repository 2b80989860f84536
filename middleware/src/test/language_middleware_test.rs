use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tgbot_core::{ApiClient, GatewayError, Middleware, Result};

use super::{empty_context, message_update};
use crate::{language::DEFAULT_LOCALE, LanguageMiddleware};

struct LocaleApi {
    locale: Option<&'static str>,
    fail: bool,
}

#[async_trait]
impl ApiClient for LocaleApi {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        assert_eq!(method, "profile/locale");
        assert!(params.get("user_id").is_some());
        if self.fail {
            return Err(GatewayError::Api("backend down".to_string()));
        }
        match self.locale {
            Some(locale) => Ok(json!({ "locale": locale })),
            None => Ok(json!({})),
        }
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

fn context_with_api(api: LocaleApi) -> tgbot_core::Context {
    let mut ctx = empty_context();
    ctx.api = Some(Arc::new(api));
    ctx
}

/// **Test: backend-provided locale wins over the update's language code.**
#[tokio::test]
async fn test_backend_locale_wins() {
    let middleware = LanguageMiddleware::new();
    let mut ctx = context_with_api(LocaleApi {
        locale: Some("uk"),
        fail: false,
    });

    middleware
        .before(&mut ctx, &message_update(Some("de")))
        .await
        .unwrap();

    assert_eq!(ctx.locale.as_deref(), Some("uk"));
}

/// **Test: on backend failure the update's language code is used.**
#[tokio::test]
async fn test_falls_back_to_update_language_code() {
    let middleware = LanguageMiddleware::new();
    let mut ctx = context_with_api(LocaleApi {
        locale: None,
        fail: true,
    });

    middleware
        .before(&mut ctx, &message_update(Some("de")))
        .await
        .unwrap();

    assert_eq!(ctx.locale.as_deref(), Some("de"));
}

/// **Test: with no backend locale and no language code the default is used.**
#[tokio::test]
async fn test_falls_back_to_default_locale() {
    let middleware = LanguageMiddleware::new();
    let mut ctx = context_with_api(LocaleApi {
        locale: None,
        fail: false,
    });

    middleware
        .before(&mut ctx, &message_update(None))
        .await
        .unwrap();

    assert_eq!(ctx.locale.as_deref(), Some(DEFAULT_LOCALE));
}

/// **Test: running without ApiMiddleware first is a middleware error, not a
/// short-circuit.**
#[tokio::test]
async fn test_missing_api_handle_is_an_error() {
    let middleware = LanguageMiddleware::new();
    let mut ctx = empty_context();

    let err = middleware
        .before(&mut ctx, &message_update(Some("de")))
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::Middleware(_)));
}
