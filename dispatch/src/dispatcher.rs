//! The dispatcher: owns the ordered routers and the two middleware chains
//! (message and callback), resolves the conversation key, and runs every
//! dispatch under the per-key lock.

use std::sync::Arc;

use fsm_storage::{StateStorage, StorageKey};
use tgbot_core::{Bot, Context, DispatchOutcome, FsmContext, Middleware, Result, Update, UpdateKind};
use tracing::instrument;

use crate::chain::MiddlewareChain;
use crate::locks::KeyLockTable;
use crate::router::Router;

/// Routes inbound updates through the middleware pipeline to the first
/// matching router. Built once at startup; the chains and router order are
/// fixed for the process lifetime.
pub struct Dispatcher {
    routers: Vec<Router>,
    message_chain: MiddlewareChain,
    callback_chain: MiddlewareChain,
    storage: Arc<dyn StateStorage>,
    bot: Arc<dyn Bot>,
    bot_id: i64,
    locks: KeyLockTable,
}

impl Dispatcher {
    pub fn builder(storage: Arc<dyn StateStorage>, bot: Arc<dyn Bot>) -> DispatcherBuilder {
        DispatcherBuilder {
            routers: Vec::new(),
            message_chain: MiddlewareChain::new(),
            callback_chain: MiddlewareChain::new(),
            storage,
            bot,
            bot_id: 0,
        }
    }

    pub fn message_middleware(&self) -> &MiddlewareChain {
        &self.message_chain
    }

    pub fn callback_middleware(&self) -> &MiddlewareChain {
        &self.callback_chain
    }

    /// Dispatches one update through the pipeline for its kind.
    ///
    /// Holds the conversation-key lock for the whole dispatch so no other
    /// dispatch mutates the same conversation's state concurrently.
    /// Updates without a conversation key run unlocked and without FSM
    /// context.
    #[instrument(skip(self, update), fields(update_id = update.id))]
    pub async fn dispatch(&self, update: &Update) -> Result<DispatchOutcome> {
        let key = update.conversation_key();
        let _guard = match key {
            Some(k) => Some(self.locks.acquire(k).await),
            None => None,
        };

        let fsm = key.map(|k| {
            FsmContext::new(
                self.storage.clone(),
                StorageKey::new(self.bot_id, k.chat_id, k.user_id),
            )
        });
        let mut ctx = Context::new(self.bot.clone(), fsm);

        let chain = match update.kind {
            UpdateKind::Message(_) => &self.message_chain,
            UpdateKind::Callback(_) => &self.callback_chain,
        };
        chain.run(&mut ctx, update, &self.routers).await
    }
}

/// Assembles the immutable dispatcher at startup. No runtime mutation of
/// the chains or router order afterwards.
pub struct DispatcherBuilder {
    routers: Vec<Router>,
    message_chain: MiddlewareChain,
    callback_chain: MiddlewareChain,
    storage: Arc<dyn StateStorage>,
    bot: Arc<dyn Bot>,
    bot_id: i64,
}

impl DispatcherBuilder {
    /// Registers a middleware on both pipelines. The same instance wraps
    /// message and callback dispatches in the same position.
    pub fn outer_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.message_chain.push(middleware.clone());
        self.callback_chain.push(middleware);
        self
    }

    /// Appends a router; registration order is match-evaluation order.
    pub fn router(mut self, router: Router) -> Self {
        self.routers.push(router);
        self
    }

    /// Bot identity used to namespace storage keys.
    pub fn bot_id(mut self, bot_id: i64) -> Self {
        self.bot_id = bot_id;
        self
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            routers: self.routers,
            message_chain: self.message_chain,
            callback_chain: self.callback_chain,
            storage: self.storage,
            bot: self.bot,
            bot_id: self.bot_id,
            locks: KeyLockTable::new(),
        }
    }
}
