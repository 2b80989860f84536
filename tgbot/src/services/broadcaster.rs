//! Broadcasting to a list of chats, one recipient at a time.
//!
//! A failed send is logged and never stops the remaining recipients; used
//! for the startup notice to administrators.

use std::time::Duration;

use tgbot_core::Bot;
use tracing::{debug, warn};

/// Gap between sends; Telegram allows roughly 30 messages per second.
const SEND_PACING: Duration = Duration::from_millis(50);

/// Sends `text` to every chat in `recipients`. Returns how many sends
/// succeeded.
pub async fn broadcast(bot: &dyn Bot, recipients: &[i64], text: &str) -> usize {
    let mut delivered = 0;
    for &chat_id in recipients {
        match bot.send_message(chat_id, text).await {
            Ok(()) => {
                debug!(chat_id, "Broadcast delivered");
                delivered += 1;
            }
            Err(e) => {
                warn!(chat_id, error = %e, "Broadcast failed for recipient");
            }
        }
        tokio::time::sleep(SEND_PACING).await;
    }
    delivered
}
