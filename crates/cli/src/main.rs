//! Bistro CLI - Schema setup and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Create the database schema (one-shot, idempotent)
//! bistro-cli init
//!
//! # Seed the catalog from JSON files
//! bistro-cli seed menu --file data/menu.json
//! bistro-cli seed reviews --file data/reviews.json
//!
//! # Grant the admin role
//! bistro-cli admin grant -e chef@example.com
//! ```
//!
//! # Commands
//!
//! - `init` - Create tables and indexes
//! - `seed` - Load menu or review data
//! - `admin grant` - Grant the admin role to a registered user

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bistro-cli")]
#[command(author, version, about = "Bistro CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database schema
    Init,
    /// Seed catalog data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load menu items from a JSON file
    Menu {
        /// Path to the JSON file
        #[arg(short, long)]
        file: String,
    },
    /// Load reviews from a JSON file
    Reviews {
        /// Path to the JSON file
        #[arg(short, long)]
        file: String,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant the admin role to a registered user
    Grant {
        /// User's email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Init => commands::init::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Menu { file } => commands::seed::menu(&file).await?,
            SeedTarget::Reviews { file } => commands::seed::reviews(&file).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => {
                commands::admin::grant(&email).await?;
            }
        },
    }
    Ok(())
}
