//! Core types: inbound updates, conversation keys, dispatch outcomes, and
//! the [`Middleware`], [`Handler`], and [`Filter`] traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::error::Result;

/// Originating user of an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub language_code: Option<String>,
}

/// A text-bearing chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageUpdate {
    pub chat_id: i64,
    pub from: Option<User>,
    pub text: Option<String>,
}

/// A button press attached to a previously sent message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackUpdate {
    pub from: User,
    /// Chat the pressed button lives in, when still accessible.
    pub chat_id: Option<i64>,
    pub data: Option<String>,
}

/// The payload of one inbound update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UpdateKind {
    Message(MessageUpdate),
    Callback(CallbackUpdate),
}

/// One inbound event from the messaging platform. Immutable once received;
/// owned by the dispatcher for exactly one dispatch cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub id: i64,
    pub kind: UpdateKind,
    pub received_at: DateTime<Utc>,
}

impl Update {
    pub fn user(&self) -> Option<&User> {
        match &self.kind {
            UpdateKind::Message(m) => m.from.as_ref(),
            UpdateKind::Callback(c) => Some(&c.from),
        }
    }

    pub fn chat_id(&self) -> Option<i64> {
        match &self.kind {
            UpdateKind::Message(m) => Some(m.chat_id),
            UpdateKind::Callback(c) => c.chat_id,
        }
    }

    /// Text of a message update, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            UpdateKind::Message(m) => m.text.as_deref(),
            UpdateKind::Callback(_) => None,
        }
    }

    /// The chat/user pair used to scope conversation state. `None` when the
    /// update carries no identifiable user; such updates dispatch without
    /// FSM context.
    pub fn conversation_key(&self) -> Option<ConversationKey> {
        let user_id = self.user()?.id;
        let chat_id = self.chat_id().unwrap_or(user_id);
        Some(ConversationKey { chat_id, user_id })
    }
}

/// Identifier scoping persisted state to one chat/user pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub chat_id: i64,
    pub user_id: i64,
}

/// How one dispatch cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A router matched and its handler completed.
    Handled,
    /// No router matched; the update was dropped without error.
    Dropped,
    /// A middleware short-circuited before the routers.
    Aborted,
}

/// One interceptor in the dispatch pipeline.
///
/// `before` hooks run in registration order; returning `Ok(false)` stops
/// the chain before the routers (a control decision, not a failure).
/// `after` hooks run in exact reverse order for every middleware whose
/// `before` ran, with the dispatch outcome.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, ctx: &mut Context, update: &Update) -> Result<bool>;

    async fn after(
        &self,
        _ctx: &Context,
        _update: &Update,
        _outcome: &DispatchOutcome,
    ) -> Result<()> {
        Ok(())
    }
}

/// Terminal processing for one update, invoked inside the innermost
/// middleware scope.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, ctx: &Context, update: &Update) -> Result<()>;
}

/// Predicate deciding whether a router accepts an update.
pub trait Filter: Send + Sync {
    fn matches(&self, update: &Update) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&Update) -> bool + Send + Sync,
{
    fn matches(&self, update: &Update) -> bool {
        self(update)
    }
}

/// Converts a transport-specific update into the core [`Update`].
/// Returns `None` for update kinds the gateway does not route.
pub trait ToCoreUpdate: Send + Sync {
    fn to_core(&self) -> Option<Update>;
}
