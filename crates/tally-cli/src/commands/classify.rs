//! Single and batch classification commands

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::import::read_transaction_records;
use tally_core::{AIClient, Classifier, Database};

use super::truncate;

pub async fn cmd_classify(
    db: &Database,
    ai: Option<&AIClient>,
    user: &str,
    description: &str,
    amount: Option<f64>,
    json: bool,
) -> Result<()> {
    let classifier = Classifier::new(db, ai);
    let result = classifier.classify(user, description, amount).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!("🏷️  {}", description);
    println!(
        "   {} (source: {}, confidence: {:.2})",
        result.category, result.source, result.confidence
    );

    Ok(())
}

pub async fn cmd_classify_batch(
    db: &Database,
    ai: Option<&AIClient>,
    user: &str,
    file: &Path,
    json: bool,
) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let records = read_transaction_records(reader)?;

    if records.is_empty() {
        println!("No transactions found in {}", file.display());
        return Ok(());
    }

    let classifier = Classifier::new(db, ai);
    let batch = classifier.classify_batch(user, &records).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&batch.results)?);
        return Ok(());
    }

    println!();
    println!("🏷️  Classified {} transactions", batch.processed);
    println!("   ─────────────────────────────────────────────────────────────");
    for (record, result) in records.iter().zip(&batch.results) {
        println!(
            "   {:<40} {:<14} {} ({:.2})",
            truncate(&record.description, 40),
            result.category.to_string(),
            result.source,
            result.confidence
        );
    }
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   user rules: {}  patterns: {}  ai: {} (+{} cached)  uncategorized: {}",
        batch.by_user_rule,
        batch.by_known_pattern,
        batch.by_ai,
        batch.by_ai_cached,
        batch.uncategorized
    );
    if batch.uncategorized > 0 {
        println!("   💡 Tip: fix uncategorized merchants with 'tally correct \"<description>\" <category>'");
    }

    Ok(())
}
