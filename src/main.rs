use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use expense_tracker::cli::{
    handle_add, handle_config, handle_delete, handle_init, handle_list, handle_reset,
    handle_summary, handle_warnings, AddArgs, InitArgs,
};
use expense_tracker::config::{ExpensePaths, Session};
use expense_tracker::storage::{open_default_store, FileExpenseStore};

#[derive(Parser)]
#[command(
    name = "expense",
    version,
    about = "Track daily expenses against a monthly budget",
    long_about = "A small expense tracker. Record what you spend by category, \
                  see where the money went, and get warned before a category \
                  budget runs out."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up the user and budget
    Init(InitArgs),

    /// Record a new expense
    Add(AddArgs),

    /// List all expenses, newest first
    #[command(alias = "ls")]
    List,

    /// Delete an expense by ID (or unique ID prefix)
    #[command(alias = "rm")]
    Delete {
        /// Expense ID
        id: String,
    },

    /// Show totals per category and overall
    Summary,

    /// Show categories that are running low
    Warnings,

    /// Forget the saved user and budget (expenses are kept)
    Reset,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let paths = ExpensePaths::new()?;

    let command = match cli.command {
        Some(command) => command,
        None => {
            println!("expense - track daily expenses against a monthly budget");
            println!();
            println!("Run 'expense --help' for usage information.");
            println!("Run 'expense init' to get started.");
            return Ok(());
        }
    };

    match command {
        Commands::Init(args) => handle_init(&paths, args)?,
        Commands::Reset => handle_reset(&paths)?,
        Commands::Config => handle_config(&paths)?,
        Commands::Add(args) => {
            let (session, store) = open_session(&paths)?;
            handle_add(&store, &session, args)?;
        }
        Commands::List => {
            let (session, store) = open_session(&paths)?;
            handle_list(&store, &session)?;
        }
        Commands::Delete { id } => {
            let (session, store) = open_session(&paths)?;
            handle_delete(&store, &session, &id)?;
        }
        Commands::Summary => {
            let (session, store) = open_session(&paths)?;
            handle_summary(&store, &session)?;
        }
        Commands::Warnings => {
            let (session, store) = open_session(&paths)?;
            handle_warnings(&store, &session)?;
        }
    }

    Ok(())
}

/// Load the saved session and open the expense store next to it
fn open_session(paths: &ExpensePaths) -> Result<(Session, FileExpenseStore)> {
    let session = Session::require(paths)?;
    let store = open_default_store(paths)?;
    Ok((session, store))
}
