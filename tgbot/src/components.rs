//! Component factory: builds the storage backend, the optional auxiliary
//! API client, the middleware list, and the dispatcher from config.
//! Isolates assembly logic from the lifecycle runner.

use std::sync::Arc;

use api_client::HttpApiClient;
use dispatch::Dispatcher;
use fsm_storage::{KeyBuilder, MemoryStorage, RedisStorage, StateStorage};
use middleware::{ApiMiddleware, ConfigMiddleware, LanguageMiddleware};
use tgbot_core::{ApiClient, Bot, Config, Middleware, Result};
use tracing::{info, instrument, warn};

use crate::handlers;

/// Selects the state storage backend from config, once, at startup.
///
/// An unreachable Redis here is fatal: the backend was explicitly
/// configured and silently degrading to the ephemeral store would change
/// persistence semantics.
#[instrument(skip(config))]
pub async fn get_storage(config: &Config) -> Result<Arc<dyn StateStorage>> {
    match &config.redis {
        Some(redis) => {
            let key_builder =
                KeyBuilder::new(redis.with_bot_id, redis.with_destiny, redis.destiny.clone());
            let storage = RedisStorage::connect(&redis.dsn(), key_builder).await?;
            info!(host = %redis.host, port = redis.port, "Using Redis state storage");
            Ok(Arc::new(storage))
        }
        None => {
            info!("Using in-memory state storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

/// Constructs the auxiliary API client when a base URL is configured.
/// Construction failure disables the API middleware pair instead of
/// aborting startup.
pub fn build_api_client(config: &Config) -> Option<Arc<dyn ApiClient>> {
    let base_url = config.api_base_url.as_deref()?;
    match HttpApiClient::new(base_url) {
        Ok(client) => {
            info!(base_url, "Auxiliary API client constructed");
            Some(Arc::new(client))
        }
        Err(e) => {
            warn!(error = %e, "API client construction failed; API middlewares disabled");
            None
        }
    }
}

/// The ordered global middleware list: ConfigMiddleware always, then
/// ApiMiddleware and LanguageMiddleware only when the API client exists.
/// LanguageMiddleware reads the handle ApiMiddleware injects, so the order
/// here is load-bearing.
pub fn build_middlewares(
    config: &Arc<Config>,
    api_client: Option<Arc<dyn ApiClient>>,
) -> Vec<Arc<dyn Middleware>> {
    let mut middlewares: Vec<Arc<dyn Middleware>> =
        vec![Arc::new(ConfigMiddleware::new(config.clone()))];

    if let Some(api) = api_client {
        middlewares.push(Arc::new(ApiMiddleware::new(api)));
        middlewares.push(Arc::new(LanguageMiddleware::new()));
    }

    middlewares
}

/// Assembles the dispatcher: global middlewares on both pipelines plus the
/// application routers, in registration order.
pub fn build_dispatcher(
    config: &Arc<Config>,
    storage: Arc<dyn StateStorage>,
    bot: Arc<dyn Bot>,
    api_client: Option<Arc<dyn ApiClient>>,
    bot_id: i64,
) -> Arc<Dispatcher> {
    let mut builder = Dispatcher::builder(storage, bot).bot_id(bot_id);
    for middleware in build_middlewares(config, api_client) {
        builder = builder.outer_middleware(middleware);
    }
    for router in handlers::routers_list(config) {
        builder = builder.router(router);
    }
    Arc::new(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgbot_core::Config;

    fn test_config(api_base_url: Option<&str>) -> Arc<Config> {
        Arc::new(Config {
            bot_token: "test_token".to_string(),
            admin_ids: vec![111, 222],
            use_redis: false,
            redis: None,
            api_base_url: api_base_url.map(str::to_string),
            poll_timeout_secs: 25,
            log_file: None,
        })
    }

    /// **Test: without an API client the chain is ConfigMiddleware only.**
    #[test]
    fn test_middlewares_without_api_client() {
        let config = test_config(None);
        let middlewares = build_middlewares(&config, None);

        let names: Vec<&str> = middlewares
            .iter()
            .map(|m| std::any::type_name_of_val(m.as_ref()))
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].contains("ConfigMiddleware"));
    }

    /// **Test: with an API client the chain is Config, Api, Language in
    /// that order.**
    #[test]
    fn test_middlewares_with_api_client() {
        let config = test_config(Some("http://localhost:9000/"));
        let api = build_api_client(&config).expect("client constructed");
        let middlewares = build_middlewares(&config, Some(api));

        let names: Vec<&str> = middlewares
            .iter()
            .map(|m| std::any::type_name_of_val(m.as_ref()))
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names[0].contains("ConfigMiddleware"));
        assert!(names[1].contains("ApiMiddleware"));
        assert!(names[2].contains("LanguageMiddleware"));
    }

    /// **Test: a bad API base URL yields no client instead of a panic or
    /// abort.**
    #[test]
    fn test_api_client_construction_failure_is_skipped() {
        let config = test_config(Some("not a url"));
        assert!(build_api_client(&config).is_none());
    }

    /// **Test: no configured base URL yields no client.**
    #[test]
    fn test_api_client_absent_without_base_url() {
        let config = test_config(None);
        assert!(build_api_client(&config).is_none());
    }
}
