//! # tgbot-telegram
//!
//! Telegram boundary layer: adapters from teloxide types to core types,
//! the long-polling [`TelegramTransport`], and the outbound
//! [`TelegramBotAdapter`]. Handles only Telegram connectivity; routing,
//! middleware, and state live elsewhere.

mod adapters;
mod bot_adapter;
mod transport;

pub use adapters::{TelegramUpdateWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use transport::TelegramTransport;
