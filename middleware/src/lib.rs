//! # middleware
//!
//! Global middlewares applied to every dispatched update. The reference
//! composition is [`ConfigMiddleware`] always, then [`ApiMiddleware`] and
//! [`LanguageMiddleware`] only when the auxiliary API client was
//! constructed: LanguageMiddleware reads the handle ApiMiddleware
//! injects, so registration order matters.

pub mod api;
pub mod config;
pub mod language;

#[cfg(test)]
mod test;

pub use api::ApiMiddleware;
pub use config::ConfigMiddleware;
pub use language::LanguageMiddleware;
