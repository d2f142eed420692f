use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "poseshenie")]
#[command(author, version, about = "Telegram bot for tracking physical education attendance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot in long polling mode
    Run,

    /// Apply database migrations and exit
    Migrate,

    /// Print all registered students
    Students,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
