//! Callback query handlers (mark menu buttons)

use teloxide::prelude::*;
use teloxide::types::ChatId;

use super::types::{HandlerDeps, HandlerError};
use crate::core::wishes::random_wish;
use crate::storage::db;
use crate::storage::get_connection;
use crate::telegram::keyboards::parse_mark_callback;
use crate::telegram::replies;

/// Handles a `mark_<id>` button press.
///
/// Admin rights are checked on the user who pressed the button, not on whoever
/// built the menu.
pub(super) async fn handle_mark_callback(bot: &Bot, q: &CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if !deps.is_admin(&q.from) {
        log::warn!("Non-admin user {} pressed a mark button", q.from.id.0);
        bot.answer_callback_query(q.id.clone())
            .text(replies::ACCESS_DENIED)
            .show_alert(true)
            .await?;
        return Ok(());
    }

    let updated = match q.data.as_deref().and_then(parse_mark_callback) {
        Some(student_id) => {
            let conn = get_connection(&deps.db_pool)?;
            db::increment_visits(&conn, student_id)?
        }
        None => None,
    };

    let Some(student) = updated else {
        bot.answer_callback_query(q.id.clone())
            .text(replies::STUDENT_NOT_FOUND)
            .show_alert(true)
            .await?;
        return Ok(());
    };

    let required = deps.settings.required_visits;
    log::info!(
        "Admin {} marked a visit for {} ({}/{})",
        q.from.id.0,
        student.telegram_id,
        student.visits,
        required
    );

    let notification = replies::visit_marked_notification(&student, required, random_wish());
    if let Err(e) = bot.send_message(ChatId(student.telegram_id), notification).await {
        log::warn!("Failed to notify student {} about a visit: {}", student.telegram_id, e);
    }

    if let Some(message) = q.message.as_ref() {
        let confirmation = replies::visit_marked_confirmation(&student, required);
        if let Err(e) = bot.edit_message_text(message.chat().id, message.id(), confirmation).await {
            log::warn!("Failed to update mark menu message: {}", e);
        }
    }

    bot.answer_callback_query(q.id.clone()).await?;
    Ok(())
}

/// Answers callbacks nobody handles so the client stops its loading indicator
pub(super) async fn handle_unknown_callback(bot: &Bot, q: &CallbackQuery) -> Result<(), HandlerError> {
    log::debug!("Ignoring callback with data {:?}", q.data);
    bot.answer_callback_query(q.id.clone()).await?;
    Ok(())
}
