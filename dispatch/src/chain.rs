//! Middleware chain: before-hooks in registration order, routing at the
//! innermost position, after-hooks in exact reverse order on the way out.

use std::sync::Arc;

use tgbot_core::{Context, DispatchOutcome, Middleware, Result, Update};
use tracing::{debug, info};

use crate::router::Router;

/// Ordered, immutable-after-startup sequence of middleware wrapping every
/// dispatch. Insertion order is outer-to-inner call order.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middleware: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, middleware: Arc<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    pub fn len(&self) -> usize {
        self.middleware.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middleware.is_empty()
    }

    /// Concrete type names of the registered middleware, in call order.
    pub fn names(&self) -> Vec<&'static str> {
        self.middleware
            .iter()
            .map(|mw| std::any::type_name_of_val(mw.as_ref()))
            .collect()
    }

    /// Runs the chain around the routers for one update.
    ///
    /// A before-hook returning `Ok(false)` short-circuits the dispatch -
    /// that is a control decision, reported as [`DispatchOutcome::Aborted`]
    /// and never logged as a failure. After-hooks run in reverse order for
    /// every middleware whose before-hook ran, aborted dispatches included.
    /// An error from any hook or from the handler aborts the chain with
    /// that error.
    pub async fn run(
        &self,
        ctx: &mut Context,
        update: &Update,
        routers: &[Router],
    ) -> Result<DispatchOutcome> {
        let mut entered = 0;
        let mut aborted = false;

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            entered += 1;
            if !mw.before(ctx, update).await? {
                info!(
                    update_id = update.id,
                    middleware = %mw_name,
                    "middleware short-circuited the dispatch"
                );
                aborted = true;
                break;
            }
        }

        let outcome = if aborted {
            DispatchOutcome::Aborted
        } else {
            route(ctx, update, routers).await?
        };

        for mw in self.middleware.iter().take(entered).rev() {
            mw.after(ctx, update, &outcome).await?;
        }

        Ok(outcome)
    }
}

/// Evaluates routers in registration order and dispatches to the first
/// whose filters all match. No match means the update is dropped.
async fn route(ctx: &Context, update: &Update, routers: &[Router]) -> Result<DispatchOutcome> {
    for router in routers {
        if router.matches(update) {
            debug!(
                update_id = update.id,
                router = router.name(),
                "dispatching update"
            );
            router.handle(ctx, update).await?;
            return Ok(DispatchOutcome::Handled);
        }
    }

    debug!(update_id = update.id, "no router matched; update dropped");
    Ok(DispatchOutcome::Dropped)
}
