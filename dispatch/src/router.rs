//! Routers: named handler groups gated by filter predicates, evaluated in
//! registration order with first-match-wins semantics.

use std::sync::Arc;

use tgbot_core::{Context, Filter, Handler, Result, Update};

/// A handler group: accepts an update when every filter matches.
pub struct Router {
    name: String,
    filters: Vec<Arc<dyn Filter>>,
    handler: Arc<dyn Handler>,
}

impl Router {
    pub fn new(name: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        Self {
            name: name.into(),
            filters: Vec::new(),
            handler,
        }
    }

    /// Appends a filter; all filters must match for the router to accept.
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, update: &Update) -> bool {
        self.filters.iter().all(|f| f.matches(update))
    }

    pub(crate) async fn handle(&self, ctx: &Context, update: &Update) -> Result<()> {
        self.handler.handle(ctx, update).await
    }
}

/// Common filter predicates.
pub mod filters {
    use tgbot_core::{Update, UpdateKind};

    /// Accepts message updates.
    pub fn message() -> impl Fn(&Update) -> bool + Send + Sync {
        |update: &Update| matches!(update.kind, UpdateKind::Message(_))
    }

    /// Accepts callback updates.
    pub fn callback() -> impl Fn(&Update) -> bool + Send + Sync {
        |update: &Update| matches!(update.kind, UpdateKind::Callback(_))
    }

    /// Accepts messages whose first token is `/cmd` (an optional `@bot`
    /// suffix is ignored).
    pub fn command(cmd: &str) -> impl Fn(&Update) -> bool + Send + Sync {
        let wanted = format!("/{}", cmd);
        move |update: &Update| {
            update
                .text()
                .and_then(|text| text.split_whitespace().next())
                .map(|token| token.split('@').next().unwrap_or(token) == wanted)
                .unwrap_or(false)
        }
    }

    /// Accepts updates originating from one of `ids`.
    pub fn from_user(ids: Vec<i64>) -> impl Fn(&Update) -> bool + Send + Sync {
        move |update: &Update| update.user().map(|u| ids.contains(&u.id)).unwrap_or(false)
    }
}
