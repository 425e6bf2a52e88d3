//! Rule management and correction commands

use anyhow::{anyhow, Result};
use tally_core::{matching_rules, Category, Classifier, Database, MatchKind};

use super::truncate;

pub fn cmd_rules_list(db: &Database, user: &str) -> Result<()> {
    let rules = db.list_rules(user)?;

    if rules.is_empty() {
        println!("No rules for user '{}'. Add one with 'tally rules add'.", user);
        return Ok(());
    }

    println!();
    println!("📏 Rules for {}", user);
    println!("   ─────────────────────────────────────────────────────────────");
    for rule in rules {
        println!(
            "   #{:<4} [{}] {:<30} → {} (priority {})",
            rule.id,
            rule.match_kind,
            truncate(&rule.pattern, 30),
            rule.category,
            rule.priority
        );
    }

    Ok(())
}

pub fn cmd_rules_add(
    db: &Database,
    user: &str,
    pattern: &str,
    category: &str,
    kind: &str,
    priority: i32,
) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;
    let kind: MatchKind = kind.parse().map_err(|e: String| anyhow!(e))?;

    let id = db.create_rule(user, pattern, kind, category, priority)?;
    println!("✅ Created rule #{}: [{}] {} → {}", id, kind, pattern, category);

    Ok(())
}

pub fn cmd_rules_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_rule(id)?;
    println!("✅ Deleted rule #{}", id);

    Ok(())
}

pub fn cmd_rules_test(db: &Database, user: &str, description: &str) -> Result<()> {
    let matches = matching_rules(db, user, description)?;

    if matches.is_empty() {
        println!("No rules match '{}'", description);
        return Ok(());
    }

    println!();
    println!("🔎 Rules matching '{}'", description);
    for rule in matches {
        println!(
            "   #{} [{}] {} → {} (priority {})",
            rule.id, rule.match_kind, rule.pattern, rule.category, rule.priority
        );
    }

    Ok(())
}

pub fn cmd_correct(db: &Database, user: &str, description: &str, category: &str) -> Result<()> {
    let category: Category = category.parse().map_err(|e: String| anyhow!(e))?;

    let classifier = Classifier::new(db, None);
    let id = classifier.learn_rule(user, description, category)?;

    println!(
        "✅ Learned rule #{}: '{}' → {} (future matches classify as user-rule)",
        id, description, category
    );

    Ok(())
}
