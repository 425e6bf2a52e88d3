//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Categorize transactions and keep your budget honest
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Transaction classification and budgeting tips", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// User the command acts on behalf of
    #[arg(long, default_value = "local", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and seed the known-pattern library
    Init,

    /// Classify a single transaction description
    Classify {
        /// Transaction description, as exported by the bank
        description: String,

        /// Transaction amount (negative = expense)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<f64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify a CSV of transactions (description[,amount] columns)
    Batch {
        /// CSV file to classify
        #[arg(short, long)]
        file: PathBuf,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Record a manual correction so the merchant classifies right next time
    Correct {
        /// Transaction description to learn from
        description: String,

        /// The category it should have been
        category: String,
    },

    /// Manage classification rules (list, add, delete, test)
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,
    },

    /// List the known-pattern library
    Patterns,

    /// Budgeting tips from a monthly spending summary
    Advise {
        /// Monthly take-home income
        #[arg(long)]
        income: f64,

        /// CSV file of category,amount spending totals
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show database and provider status
    Status,
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Add a classification rule
    Add {
        /// Pattern to match (pipe-separated alternatives for contains)
        pattern: String,

        /// Category to assign on match
        category: String,

        /// Match kind: contains, exact, regex
        #[arg(long, default_value = "contains")]
        kind: String,

        /// Rule priority (higher wins)
        #[arg(long, default_value = "0")]
        priority: i32,
    },

    /// Delete a rule by id
    Delete {
        /// Rule id
        id: i64,
    },

    /// Show which rules match a description
    Test {
        /// Description to test
        description: String,
    },
}
