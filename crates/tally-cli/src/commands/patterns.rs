//! Known-pattern library commands

use anyhow::Result;
use tally_core::Database;

use super::truncate;

pub fn cmd_patterns_list(db: &Database) -> Result<()> {
    let patterns = db.list_known_patterns()?;

    if patterns.is_empty() {
        println!("Known-pattern library is empty. Run 'tally init' to seed it.");
        return Ok(());
    }

    println!();
    println!("📚 Known patterns ({})", patterns.len());
    println!("   ─────────────────────────────────────────────────────────────");
    for pattern in patterns {
        println!(
            "   {:<52} → {}",
            truncate(&pattern.pattern, 52),
            pattern.category
        );
    }

    Ok(())
}
