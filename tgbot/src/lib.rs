//! # tgbot
//!
//! Gateway application: wires state storage, the Telegram transport, the
//! global middlewares, and the application routers, then runs the
//! lifecycle (startup sequencing, long-poll loop, graceful teardown).

pub mod cli;
pub mod components;
pub mod handlers;
pub mod lifecycle;
pub mod services;

pub use cli::{Cli, Commands};
pub use components::{build_api_client, build_dispatcher, build_middlewares, get_storage};
pub use lifecycle::{run, serve, GatewayParts, Lifecycle, LifecyclePhase};
