//! classqueue CLI - page-scoped waitlists
//!
//! - `serve`: run the HTTP API (Postgres or in-memory storage)
//! - `page`: create and list pages
//! - `guest`: join, list and leave a page's queue

use anyhow::Result;
use clap::{Parser, Subcommand};

mod client;
mod commands;
mod tracing_setup;
mod ui;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "classqueue",
    author,
    version,
    about = "Page-scoped waitlists: run the API server or talk to it",
    long_about = "Run the classqueue HTTP API, or use it from the terminal: create pages \
                  (classes), join their queues, and remove entries."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress progress spinners (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Page operations (create, list)
    Page(commands::page::PageArgs),
    /// Queue operations (list, add, remove)
    Guest(commands::guest::GuestArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env may supply DATABASE_URL and friends before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();
    ui::init_quiet_mode(cli.quiet);

    match cli.command {
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Page(args) => commands::run_page(args).await,
        Commands::Guest(args) => commands::run_guest(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn guest_add_parses() {
        let cli = Cli::parse_from([
            "classqueue",
            "guest",
            "add",
            "--page",
            "Room 101",
            "--name",
            "Al",
            "--email",
            "al@example.com",
        ]);
        match cli.command {
            Commands::Guest(args) => match args.command {
                commands::guest::GuestCommands::Add(add) => {
                    assert_eq!(add.page, "Room 101");
                    assert_eq!(add.email, "al@example.com");
                }
                other => panic!("unexpected subcommand: {:?}", other),
            },
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
