//! # dispatch
//!
//! Middleware pipeline and update routing: [`MiddlewareChain`] composes
//! interceptors around the routers (before-hooks in registration order,
//! after-hooks in exact reverse), [`Dispatcher`] matches each update to the
//! first router whose filters accept it under a per-conversation-key lock,
//! and [`run_polling`] drives the bounded-wait receive loop.

pub mod chain;
pub mod dispatcher;
pub mod locks;
pub mod polling;
pub mod router;

pub use chain::MiddlewareChain;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use locks::KeyLockTable;
pub use polling::run_polling;
pub use router::{filters, Router};
