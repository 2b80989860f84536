//! Auxiliary backend API abstraction.
//!
//! The gateway core depends only on construction succeeding or failing and
//! on `close` being safe to call at shutdown; the request surface is
//! opaque method-name/JSON pairs.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Client for the auxiliary backend service. One shared instance, created
/// at startup and closed exactly once at shutdown.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Performs one request against the backend.
    async fn request(&self, method: &str, params: Value) -> Result<Value>;

    /// Releases the client's connections. Idempotent; calling it again
    /// after a prior close is a no-op.
    async fn close(&self) -> Result<()>;
}
