//! Adapters from Telegram (teloxide) types to tgbot_core types.
//! Depends only on teloxide and tgbot_core type definitions.

use tgbot_core::{
    CallbackUpdate, MessageUpdate, ToCoreUpdate, Update, UpdateKind, User,
};
use teloxide::types::MaybeInaccessibleMessage;

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> TelegramUserWrapper<'a> {
    pub fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()),
            language_code: self.0.language_code.clone(),
        }
    }
}

/// Wraps a teloxide Update for conversion to core [`Update`].
pub struct TelegramUpdateWrapper<'a>(pub &'a teloxide::types::Update);

impl<'a> ToCoreUpdate for TelegramUpdateWrapper<'a> {
    fn to_core(&self) -> Option<Update> {
        let kind = match &self.0.kind {
            teloxide::types::UpdateKind::Message(msg) => UpdateKind::Message(MessageUpdate {
                chat_id: msg.chat.id.0,
                from: msg.from.as_ref().map(|u| TelegramUserWrapper(u).to_core()),
                text: msg.text().map(str::to_string),
            }),
            teloxide::types::UpdateKind::CallbackQuery(q) => UpdateKind::Callback(CallbackUpdate {
                from: TelegramUserWrapper(&q.from).to_core(),
                chat_id: q.message.as_ref().map(|m| match m {
                    MaybeInaccessibleMessage::Regular(msg) => msg.chat.id.0,
                    MaybeInaccessibleMessage::Inaccessible(msg) => msg.chat.id.0,
                }),
                data: q.data.clone(),
            }),
            // Everything else is outside the gateway's routing surface.
            _ => return None,
        };

        Some(Update {
            id: self.0.id.0 as i64,
            kind,
            received_at: chrono::Utc::now(),
        })
    }
}
