//! Tally CLI - Transaction classification and budgeting tips
//!
//! Usage:
//!   tally init                          Initialize database
//!   tally classify "NETFLIX.COM"        Classify one description
//!   tally batch --file export.csv       Classify a transaction export
//!   tally correct "NETFLIX.COM" dining  Learn from a manual correction
//!   tally advise --income 4000 -f m.csv Budgeting tips for a month

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;
use tally_core::AIClient;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Classify {
            description,
            amount,
            json,
        } => {
            let db = commands::open_db(&cli.db)?;
            let ai = AIClient::resolve();
            commands::cmd_classify(&db, ai.as_ref(), &cli.user, &description, amount, json).await
        }
        Commands::Batch { file, json } => {
            let db = commands::open_db(&cli.db)?;
            let ai = AIClient::resolve();
            commands::cmd_classify_batch(&db, ai.as_ref(), &cli.user, &file, json).await
        }
        Commands::Correct {
            description,
            category,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_correct(&db, &cli.user, &description, &category)
        }
        Commands::Rules { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_rules_list(&db, &cli.user),
                Some(RulesAction::Add {
                    pattern,
                    category,
                    kind,
                    priority,
                }) => commands::cmd_rules_add(&db, &cli.user, &pattern, &category, &kind, priority),
                Some(RulesAction::Delete { id }) => commands::cmd_rules_delete(&db, id),
                Some(RulesAction::Test { description }) => {
                    commands::cmd_rules_test(&db, &cli.user, &description)
                }
            }
        }
        Commands::Patterns => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_patterns_list(&db)
        }
        Commands::Advise { income, file } => commands::cmd_advise(income, &file),
        Commands::Status => {
            let ai = AIClient::resolve();
            commands::cmd_status(&cli.db, ai.as_ref()).await
        }
    }
}
