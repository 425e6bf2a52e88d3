//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database and provider status

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::ai::AIBackend;
use tally_core::{AIClient, Database};

/// Open the rule/pattern database
pub fn open_db(db_path: &Path) -> Result<Database> {
    tracing::debug!(path = %db_path.display(), "Opening database");
    let path_str = db_path.to_string_lossy();
    Database::new(&path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let patterns = db.list_known_patterns()?;
    println!("   Seeded known-pattern library ({} patterns)", patterns.len());

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Classify something: tally classify \"NETFLIX.COM\"");
    println!("  2. Classify an export: tally batch --file transactions.csv");
    println!("  3. Set TALLY_AI_HOST (and TALLY_AI_KEY) for AI fallback");

    Ok(())
}

pub async fn cmd_status(db_path: &Path, ai: Option<&AIClient>) -> Result<()> {
    let db = open_db(db_path)?;

    println!();
    println!("📊 Tally status");
    println!("   Database: {}", db.path());
    println!("   Rules: {}", db.count_rules()?);
    println!("   Known patterns: {}", db.list_known_patterns()?.len());

    match ai {
        Some(client) => {
            let healthy = client.health_check().await;
            println!(
                "   AI provider: {} (model {}) - {}",
                client.host(),
                client.model(),
                if healthy { "reachable" } else { "UNREACHABLE" }
            );
        }
        None => {
            println!("   AI provider: not configured (set TALLY_AI_HOST)");
        }
    }

    Ok(())
}
