//! The receive loop: bounded-wait fetches from the transport, sequential
//! dispatch, backoff on transient errors, prompt reaction to shutdown.

use std::sync::Arc;
use std::time::Duration;

use tgbot_core::{Result, Transport};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, instrument, warn};

use crate::dispatcher::Dispatcher;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Runs the long-poll receive loop until `shutdown` fires or the transport
/// reports a fatal error.
///
/// Transient transport errors are retried with exponential backoff;
/// per-update dispatch errors are logged and never stop the loop. Updates
/// within a batch dispatch sequentially, so when the loop returns no
/// dispatch is in flight and teardown may proceed.
#[instrument(skip_all)]
pub async fn run_polling(
    dispatcher: Arc<Dispatcher>,
    transport: Arc<dyn Transport>,
    shutdown: CancellationToken,
) -> Result<()> {
    info!("update polling started");
    let mut backoff = INITIAL_BACKOFF;

    loop {
        if shutdown.is_cancelled() {
            break;
        }

        let batch = tokio::select! {
            _ = shutdown.cancelled() => break,
            result = transport.fetch_updates() => match result {
                Ok(batch) => {
                    backoff = INITIAL_BACKOFF;
                    batch
                }
                Err(e) if e.is_fatal() => {
                    error!(error = %e, "unrecoverable transport error; stopping polling");
                    return Err(e);
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        backoff_secs = backoff.as_secs(),
                        "transport fetch failed; backing off"
                    );
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(backoff) => {}
                    }
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    continue;
                }
            }
        };

        for update in batch {
            if let Err(e) = dispatcher.dispatch(&update).await {
                error!(error = %e, update_id = update.id, "update dispatch failed");
            }
        }
    }

    info!("update polling stopped");
    Ok(())
}
