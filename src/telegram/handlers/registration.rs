//! /register command and the name/flow conversation steps

use teloxide::prelude::*;
use teloxide::types::{KeyboardRemove, Message};

use super::types::{telegram_id, HandlerDeps, HandlerError};
use crate::storage::db::{self, RegisterOutcome};
use crate::storage::get_connection;
use crate::telegram::cleanup::delete_messages;
use crate::telegram::conversation::{Advance, Completed};
use crate::telegram::keyboards::flow_keyboard;
use crate::telegram::replies;

/// Handle /register command: starts the conversation unless already registered
pub(super) async fn handle_register_command(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    let Some(user_id) = telegram_id(user) else {
        return Ok(());
    };

    let existing = {
        let conn = get_connection(&deps.db_pool)?;
        db::get_student(&conn, user_id)?
    };
    if existing.is_some() {
        bot.send_message(msg.chat.id, replies::ALREADY_REGISTERED).await?;
        return Ok(());
    }

    if deps.conversations.step(user.id).is_some() {
        log::info!("User {} restarted registration", user_id);
    } else {
        log::info!("User {} started registration", user_id);
    }
    deps.conversations.begin(user.id, msg.id);

    let prompt = bot
        .send_message(msg.chat.id, replies::ASK_FULL_NAME)
        .reply_markup(KeyboardRemove::new())
        .await?;
    deps.conversations.remember(user.id, prompt.id);
    Ok(())
}

/// Feeds a non-command message into the user's active registration step.
///
/// Messages from users without an active registration are ignored.
pub(super) async fn handle_conversation_message(
    bot: &Bot,
    msg: &Message,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };

    let advance = deps
        .conversations
        .advance(user.id, msg.text(), msg.id, &deps.settings.flows);

    match advance {
        Advance::Idle => {}
        Advance::NameRejected => {
            let reply = bot.send_message(msg.chat.id, replies::FULL_NAME_FORMAT).await?;
            deps.conversations.remember(user.id, reply.id);
        }
        Advance::NameAccepted => {
            let reply = bot
                .send_message(msg.chat.id, replies::ASK_FLOW)
                .reply_markup(flow_keyboard(&deps.settings.flows))
                .await?;
            deps.conversations.remember(user.id, reply.id);
        }
        Advance::FlowRejected => {
            let reply = bot.send_message(msg.chat.id, replies::UNKNOWN_FLOW).await?;
            deps.conversations.remember(user.id, reply.id);
        }
        Advance::Completed(completed) => {
            if let Some(user_id) = telegram_id(user) {
                complete_registration(bot, msg.chat.id, user_id, completed, deps).await?;
            }
        }
    }
    Ok(())
}

/// Commits the registration, clears the conversation messages and reports the result
async fn complete_registration(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    completed: Completed,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    let outcome = {
        let conn = get_connection(&deps.db_pool)?;
        db::register_student(&conn, user_id, &completed.full_name, &completed.flow)?
    };

    delete_messages(bot, chat_id, &completed.pending).await;

    match outcome {
        RegisterOutcome::Registered => {
            log::info!("User {} registered in flow {}", user_id, completed.flow);
            bot.send_message(chat_id, replies::REGISTRATION_DONE)
                .reply_markup(KeyboardRemove::new())
                .await?;

            let visits = {
                let conn = get_connection(&deps.db_pool)?;
                db::get_student(&conn, user_id)?.map_or(0, |student| student.visits)
            };
            bot.send_message(
                chat_id,
                replies::attendance_summary(visits, deps.settings.required_visits),
            )
            .await?;
        }
        RegisterOutcome::AlreadyExists => {
            bot.send_message(chat_id, replies::REGISTRATION_FAILED)
                .reply_markup(KeyboardRemove::new())
                .await?;
        }
    }
    Ok(())
}
