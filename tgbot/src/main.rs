//! Binary for the Telegram bot gateway.

use anyhow::Result;
use clap::Parser;
use tgbot::{Cli, Commands};
use tgbot_core::{init_tracing, Config};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = Config::from_env(token)?;
            init_tracing(config.log_file.as_deref())?;
            info!("Starting bot");

            let shutdown = CancellationToken::new();
            spawn_signal_listener(shutdown.clone());

            match tgbot::run(config, shutdown).await {
                Ok(()) => {
                    info!("Bot stopped");
                    Ok(())
                }
                Err(e) => {
                    error!(error = %e, "Bot terminated with a fatal error");
                    Err(e.into())
                }
            }
        }
    }
}

/// Cancels `shutdown` on SIGINT or (on unix) SIGTERM.
fn spawn_signal_listener(shutdown: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            tokio::signal::ctrl_c().await.ok();
        };

        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    sigterm.recv().await;
                }
                Err(_) => std::future::pending::<()>().await,
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
        info!("Termination signal received; shutting down");
        shutdown.cancel();
    });
}
