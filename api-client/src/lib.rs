//! # api-client
//!
//! HTTP implementation of the core [`ApiClient`] seam: JSON-over-POST
//! requests against the auxiliary backend, plus an idempotent `close`.
//! The gateway injects one shared instance into every dispatch context.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tgbot_core::{ApiClient, GatewayError, Result};
use tracing::{debug, instrument};

/// Reqwest-backed client for the auxiliary backend service.
///
/// `request` sends `params` as a JSON body to `{base_url}/{method}` and
/// returns the decoded JSON response. After [`close`](ApiClient::close)
/// the client rejects further requests; closing again is a no-op.
pub struct HttpApiClient {
    base_url: reqwest::Url,
    client: reqwest::Client,
    closed: AtomicBool,
}

impl HttpApiClient {
    /// Builds a client for `base_url`. Fails on an unparseable URL; the
    /// caller decides whether to run without the API middleware pair.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .map_err(|e| GatewayError::Api(format!("invalid API base URL {}: {}", base_url, e)))?;
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            closed: AtomicBool::new(false),
        })
    }

    fn endpoint(&self, method: &str) -> Result<reqwest::Url> {
        self.base_url
            .join(method)
            .map_err(|e| GatewayError::Api(format!("invalid API method {}: {}", method, e)))
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    #[instrument(skip(self, params))]
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(GatewayError::Api("client is closed".to_string()));
        }

        let response = self
            .client
            .post(self.endpoint(method)?)
            .json(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Api(format!(
                "{} returned {}",
                method,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Api(e.to_string()))
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            debug!("API client already closed");
            return Ok(());
        }
        // reqwest pools are released when the last clone drops; flipping the
        // flag is what guarantees no new request is started.
        debug!("API client closed");
        Ok(())
    }
}
