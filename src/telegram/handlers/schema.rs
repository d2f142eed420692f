//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::callbacks::{handle_mark_callback, handle_unknown_callback};
use super::commands::{handle_info_command, handle_list_command, handle_mark_command, handle_start_command};
use super::registration::{handle_conversation_message, handle_register_command};
use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::Command;
use crate::telegram::keyboards::is_mark_callback;

/// Creates the main dispatcher schema for the bot.
///
/// The same schema is used in production and in integration tests.
///
/// Commands are matched before conversation text, so a command sent in the
/// middle of a registration runs normally and leaves the conversation as is.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry()
        .branch(command_handler(deps.clone()))
        .branch(conversation_handler(deps.clone()))
        .branch(mark_callback_handler(deps))
        .branch(unknown_callback_handler())
}

/// Handler for bot commands (/start, /register, /info, /list, /mark)
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);

                match cmd {
                    Command::Start => handle_start_command(&bot, &msg, &deps).await,
                    Command::Register => handle_register_command(&bot, &msg, &deps).await,
                    Command::Info => handle_info_command(&bot, &msg, &deps).await,
                    Command::List => handle_list_command(&bot, &msg, &deps).await,
                    Command::Mark => handle_mark_command(&bot, &msg, &deps).await,
                }
            }
        },
    ))
}

/// Handler for free text, interpreted by the active registration step.
///
/// Unknown slash commands never reach the conversation.
fn conversation_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.from.is_some() && !msg.text().is_some_and(|text| text.starts_with('/')))
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move { handle_conversation_message(&bot, &msg, &deps).await }
        })
}

/// Handler for `mark_<id>` callback queries from the /mark menu
fn mark_callback_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .filter(|q: CallbackQuery| q.data.as_deref().is_some_and(is_mark_callback))
        .endpoint(move |bot: Bot, q: CallbackQuery| {
            let deps = deps.clone();
            async move { handle_mark_callback(&bot, &q, &deps).await }
        })
}

/// Handler for any other callback query
fn unknown_callback_handler() -> UpdateHandler<HandlerError> {
    Update::filter_callback_query()
        .endpoint(|bot: Bot, q: CallbackQuery| async move { handle_unknown_callback(&bot, &q).await })
}
