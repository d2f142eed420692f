//! Command handler implementations (/start, /info, /list, /mark)

use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{telegram_id, HandlerDeps, HandlerError};
use crate::storage::db;
use crate::storage::get_connection;
use crate::telegram::keyboards::mark_keyboard;
use crate::telegram::replies;

/// Handle /start command
pub(super) async fn handle_start_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, replies::WELCOME).await?;

    if msg.from.as_ref().is_some_and(|user| deps.is_admin(user)) {
        bot.send_message(msg.chat.id, replies::ADMIN_HELP).await?;
    }
    Ok(())
}

/// Handle /info command
pub(super) async fn handle_info_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user_id) = msg.from.as_ref().and_then(telegram_id) else {
        return Ok(());
    };

    let student = {
        let conn = get_connection(&deps.db_pool)?;
        db::get_student(&conn, user_id)?
    };

    let text = match student {
        Some(student) => replies::attendance_summary(student.visits, deps.settings.required_visits),
        None => replies::NOT_REGISTERED.to_string(),
    };
    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

/// Handle /list command (admin only)
pub(super) async fn handle_list_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if !msg.from.as_ref().is_some_and(|user| deps.is_admin(user)) {
        log::warn!("Non-admin chat {} tried /list", msg.chat.id);
        bot.send_message(msg.chat.id, replies::ACCESS_DENIED).await?;
        return Ok(());
    }

    let students = {
        let conn = get_connection(&deps.db_pool)?;
        db::get_all_students(&conn)?
    };

    if students.is_empty() {
        bot.send_message(msg.chat.id, replies::EMPTY_LIST).await?;
        return Ok(());
    }

    for chunk in replies::student_list_messages(&students) {
        bot.send_message(msg.chat.id, chunk).await?;
    }
    Ok(())
}

/// Handle /mark command (admin only): shows the student selection menu
pub(super) async fn handle_mark_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    if !msg.from.as_ref().is_some_and(|user| deps.is_admin(user)) {
        log::warn!("Non-admin chat {} tried /mark", msg.chat.id);
        bot.send_message(msg.chat.id, replies::ACCESS_DENIED).await?;
        return Ok(());
    }

    let students = {
        let conn = get_connection(&deps.db_pool)?;
        db::get_all_students(&conn)?
    };

    if students.is_empty() {
        bot.send_message(msg.chat.id, replies::EMPTY_LIST).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, replies::MARK_PROMPT)
        .reply_markup(mark_keyboard(&students, deps.settings.required_visits))
        .await?;
    Ok(())
}
