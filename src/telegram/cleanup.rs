//! Best-effort removal of transient conversation messages

use teloxide::prelude::*;
use teloxide::types::MessageId;

/// Attempts to delete every message and returns how many were deleted.
///
/// Telegram refuses deletion of messages that are already gone or older than
/// 48 hours; such failures are logged and never abort the caller.
pub async fn delete_messages(bot: &Bot, chat_id: ChatId, message_ids: &[MessageId]) -> usize {
    let mut deleted = 0;

    for &message_id in message_ids {
        match bot.delete_message(chat_id, message_id).await {
            Ok(_) => deleted += 1,
            Err(error) => {
                log::debug!("Could not delete message {} in chat {}: {}", message_id.0, chat_id.0, error)
            }
        }
    }

    if deleted < message_ids.len() {
        log::debug!(
            "Deleted {}/{} conversation messages in chat {}",
            deleted,
            message_ids.len(),
            chat_id.0
        );
    }
    deleted
}
