use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;

use poseshenie::cli::{Cli, Commands};
use poseshenie::core::{config, init_logger, log_settings, Settings};
use poseshenie::storage::db;
use poseshenie::storage::{create_pool, get_connection};
use poseshenie::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the attendance bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env before any config static is read
    let _ = dotenv();

    let cli = Cli::parse_args();

    // Log panics from the dispatcher instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) => run_bot().await,
        Some(Commands::Migrate) => run_migrate(),
        Some(Commands::Students) => print_students(),
        None => {
            log::info!("No command specified, running bot in default mode");
            run_bot().await
        }
    }
}

/// Apply migrations to the configured database and exit
fn run_migrate() -> Result<()> {
    create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to migrate database: {}", e))?;
    log::info!("Database {} is up to date", config::DATABASE_PATH.as_str());
    Ok(())
}

/// Print the student table to stdout
fn print_students() -> Result<()> {
    let pool = create_pool(&config::DATABASE_PATH)?;
    let conn = get_connection(&pool)?;
    let students = db::get_all_students(&conn)?;

    if students.is_empty() {
        println!("No students registered");
        return Ok(());
    }

    println!("{:<14} {:<40} {:<12} {:>6}  registered_at", "telegram_id", "full_name", "flow", "visits");
    for student in &students {
        println!(
            "{:<14} {:<40} {:<12} {:>6}  {}",
            student.telegram_id, student.full_name, student.flow, student.visits, student.registered_at
        );
    }
    println!("Total: {}", students.len());
    Ok(())
}

/// Start the bot in long polling mode
async fn run_bot() -> Result<()> {
    log::info!("Starting attendance bot");

    let settings = Arc::new(Settings::from_env());
    log_settings(&settings);

    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH).map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );

    let bot = create_bot()?;

    // Retry while the Bot API is unreachable at startup
    let bot_info = {
        let startup_max_retries = 12;
        let mut startup_retry = 0;
        loop {
            match bot.get_me().await {
                Ok(info) => break info,
                Err(e) => {
                    startup_retry += 1;
                    if startup_retry >= startup_max_retries {
                        return Err(anyhow::anyhow!(
                            "Failed to connect to Bot API after {} retries: {}",
                            startup_retry,
                            e
                        ));
                    }
                    log::warn!(
                        "Bot API not ready (attempt {}/{}): {}. Retrying in 5 seconds...",
                        startup_retry,
                        startup_max_retries,
                        e
                    );
                    sleep(Duration::from_secs(5)).await;
                }
            }
        }
    };
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username.as_deref(), bot_info.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let deps = HandlerDeps::new(db_pool, settings);

    log::info!("📡 Ready to receive updates!");
    Dispatcher::builder(bot, schema(deps))
        .default_handler(|upd| async move {
            log::debug!("Unhandled update: {:?}", upd.kind);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("An error has occurred in the dispatcher"))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shutdown gracefully");
    Ok(())
}
