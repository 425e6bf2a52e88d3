//! Budget advisor command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::import::read_spending_summary;
use tally_core::{AdvisorEngine, Severity, SpendingSummary};

pub fn cmd_advise(income: f64, file: &Path) -> Result<()> {
    let reader = File::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let totals = read_spending_summary(reader)?;
    let summary = SpendingSummary::from_totals(income, &totals);

    let engine = AdvisorEngine::new();
    let tips = engine.advise(&summary);

    println!();
    println!(
        "💰 Income ${:.0}, spent ${:.0} across {} categories",
        income,
        summary.total_spent(),
        totals.len()
    );

    if tips.is_empty() {
        println!("✅ No tips this month - spending is within the 50/30/20 guideline.");
        return Ok(());
    }

    for tip in tips {
        let icon = match tip.severity {
            Severity::Warning => "🔴",
            Severity::Attention => "🟡",
            Severity::Info => "💡",
        };
        println!();
        println!("{} {}", icon, tip.title);
        println!("   {}", tip.message);
    }

    Ok(())
}
