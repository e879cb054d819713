//! Campus Coffee CLI - Database migrations and POS maintenance.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! cc-cli migrate
//!
//! # Seed the bundled demo POS entries
//! cc-cli pos seed
//!
//! # Replace all POS entries with the contents of a file
//! cc-cli pos seed --file my_pos.yaml --clear
//!
//! # Delete all POS entries
//! cc-cli pos clear
//!
//! # List all POS entries
//! cc-cli pos list
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `pos seed` - Insert POS entries from YAML
//! - `pos clear` - Delete all POS entries
//! - `pos list` - List POS entries

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "Campus Coffee CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage points of sale
    Pos {
        #[command(subcommand)]
        action: PosAction,
    },
}

#[derive(Subcommand)]
enum PosAction {
    /// Insert POS entries from a YAML file (defaults to bundled demo data)
    Seed {
        /// Path to the YAML seed file
        #[arg(short, long)]
        file: Option<String>,

        /// Delete all existing POS entries first
        #[arg(long)]
        clear: bool,
    },
    /// Delete all POS entries
    Clear,
    /// List all POS entries
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Pos { action } => match action {
            PosAction::Seed { file, clear } => {
                commands::seed::run(file.as_deref(), clear).await?;
            }
            PosAction::Clear => {
                commands::pos::clear().await?;
            }
            PosAction::List => commands::pos::list().await?,
        },
    }
    Ok(())
}
