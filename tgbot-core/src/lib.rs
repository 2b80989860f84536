//! # tgbot-core
//!
//! Core types and traits for the bot gateway: [`Update`], [`Context`],
//! the [`Middleware`]/[`Handler`]/[`Filter`] seams, the [`Transport`],
//! [`Bot`], and [`ApiClient`] abstractions, the error taxonomy, the
//! environment-loaded [`Config`], and tracing initialization.
//! Transport-agnostic; used by dispatch, middleware, and tgbot-telegram.

pub mod api;
pub mod bot;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod transport;
pub mod types;

pub use api::ApiClient;
pub use bot::Bot;
pub use config::{Config, RedisConfig};
pub use context::{Context, FsmContext};
pub use error::{GatewayError, Result};
pub use logger::init_tracing;
pub use transport::Transport;
pub use types::{
    CallbackUpdate, ConversationKey, DispatchOutcome, Filter, Handler, MessageUpdate, Middleware,
    ToCoreUpdate, Update, UpdateKind, User,
};
