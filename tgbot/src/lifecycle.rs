//! Gateway lifecycle: startup sequencing, the polling phase, and graceful
//! teardown.
//!
//! Phases move strictly forward: Uninitialized → Configuring → Connecting
//! → Polling → Draining → Closed, with Closed reached exactly once per
//! process. Failures while configuring or connecting are fatal; failures
//! on the shutdown path are logged and never prevent reaching Closed.

use std::fmt;
use std::sync::Arc;

use dispatch::{run_polling, Dispatcher};
use fsm_storage::StateStorage;
use tgbot_core::{ApiClient, Bot, Config, Result, Transport};
use tgbot_telegram::{TelegramBotAdapter, TelegramTransport};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::components;
use crate::services::broadcaster;

const STARTUP_NOTICE: &str = "Bot started";

/// The gateway's lifecycle phases, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecyclePhase {
    Uninitialized,
    Configuring,
    Connecting,
    Polling,
    Draining,
    Closed,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Uninitialized => "uninitialized",
            Self::Configuring => "configuring",
            Self::Connecting => "connecting",
            Self::Polling => "polling",
            Self::Draining => "draining",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Tracks the current phase and logs every transition.
pub struct Lifecycle {
    phase: LifecyclePhase,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: LifecyclePhase::Uninitialized,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Moves to `next`. Phases only advance; re-entry is not supported.
    pub fn advance(&mut self, next: LifecyclePhase) {
        debug_assert!(next > self.phase, "lifecycle moved backwards");
        info!(from = %self.phase, to = %next, "Lifecycle transition");
        self.phase = next;
    }
}

/// Everything the serving phase needs, assembled during Configuring and
/// Connecting. All shared handles are explicit: nothing is looked up
/// through ambient globals.
pub struct GatewayParts {
    pub config: Arc<Config>,
    pub storage: Arc<dyn StateStorage>,
    pub transport: Arc<dyn Transport>,
    pub bot: Arc<dyn Bot>,
    pub api_client: Option<Arc<dyn ApiClient>>,
    pub dispatcher: Arc<Dispatcher>,
}

/// Runs the whole lifecycle: build parts from config, then serve until
/// `shutdown` fires or a fatal error occurs.
#[instrument(skip_all)]
pub async fn run(config: Config, shutdown: CancellationToken) -> Result<()> {
    let mut lifecycle = Lifecycle::new();
    let parts = build_parts(&mut lifecycle, config).await?;
    serve(parts, &mut lifecycle, shutdown).await
}

/// Configuring and Connecting: storage selection, the bot session
/// (credential validation), the optional API client, and the dispatcher.
/// Any error here is fatal: there is no useful lifecycle without them.
pub async fn build_parts(lifecycle: &mut Lifecycle, config: Config) -> Result<GatewayParts> {
    lifecycle.advance(LifecyclePhase::Configuring);
    let config = Arc::new(config);
    let storage = components::get_storage(&config).await?;

    lifecycle.advance(LifecyclePhase::Connecting);
    let transport = TelegramTransport::connect(&config.bot_token, config.poll_timeout_secs).await?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(transport.bot()));
    let api_client = components::build_api_client(&config);
    let dispatcher = components::build_dispatcher(
        &config,
        storage.clone(),
        bot.clone(),
        api_client.clone(),
        transport.bot_id(),
    );

    Ok(GatewayParts {
        config,
        storage,
        transport: Arc::new(transport),
        bot,
        api_client,
        dispatcher,
    })
}

/// The serving half of the lifecycle, with parts already connected.
///
/// Startup order is fixed: webhook clear (discarding updates queued while
/// offline) strictly before the admin broadcast, strictly before the first
/// fetch. On the way out the API client is closed exactly once (a no-op
/// when it was never constructed) and the storage backend is released;
/// errors there are logged but Closed is always reached.
pub async fn serve(
    parts: GatewayParts,
    lifecycle: &mut Lifecycle,
    shutdown: CancellationToken,
) -> Result<()> {
    let startup_result = startup(&parts).await;

    let run_result = match startup_result {
        Ok(()) => {
            lifecycle.advance(LifecyclePhase::Polling);
            run_polling(
                parts.dispatcher.clone(),
                parts.transport.clone(),
                shutdown.clone(),
            )
            .await
        }
        Err(e) => Err(e),
    };

    // run_polling dispatches sequentially and returns only between
    // dispatches, so nothing is holding the API client or storage anymore.
    lifecycle.advance(LifecyclePhase::Draining);

    match &parts.api_client {
        Some(api) => match api.close().await {
            Ok(()) => info!("API client closed"),
            Err(e) => warn!(error = %e, "API client close failed"),
        },
        None => debug!("No API client was constructed; nothing to close"),
    }

    if let Err(e) = parts.storage.close().await {
        warn!(error = %e, "State storage release failed");
    }

    lifecycle.advance(LifecyclePhase::Closed);
    info!("Lifecycle closed");
    run_result
}

/// Connecting → Polling edge: clear the webhook (idempotent, drops pending
/// updates) and notify every administrator, best effort.
async fn startup(parts: &GatewayParts) -> Result<()> {
    parts.transport.clear_webhook().await?;

    let delivered = broadcaster::broadcast(
        parts.bot.as_ref(),
        &parts.config.admin_ids,
        STARTUP_NOTICE,
    )
    .await;
    info!(
        delivered,
        total = parts.config.admin_ids.len(),
        "Startup notice broadcast"
    );

    Ok(())
}
