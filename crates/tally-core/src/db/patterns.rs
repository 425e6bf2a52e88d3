//! Known-pattern library reads and seeding
//!
//! The library is curated and shared across all users. It is seeded once at
//! migration time and treated as read-only during classification.

use rusqlite::params;
use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::{Category, KnownPattern, MatchKind};

/// Built-in description→category library
///
/// Pipe-separated alternatives within a pattern keep the table short; each
/// entry is a `contains` match against the normalized description.
const BUILTIN_PATTERNS: &[(&str, Category)] = &[
    ("NETFLIX|HULU|DISNEY|HBO MAX|PARAMOUNT|PEACOCK", Category::Subscriptions),
    ("SPOTIFY|APPLE MUSIC|PANDORA|TIDAL", Category::Subscriptions),
    ("ICLOUD|GOOGLE ONE|GOOGLE STORAGE|DROPBOX", Category::Subscriptions),
    ("UBER EATS|DOORDASH|GRUBHUB|POSTMATES", Category::Dining),
    ("STARBUCKS|MCDONALD|CHIPOTLE|DUNKIN", Category::Dining),
    ("UBER|LYFT", Category::Transport),
    ("SHELL|CHEVRON|EXXON|ARCO|76 GAS", Category::Transport),
    ("PARKING|TOLL|TRANSIT|METRO CARD", Category::Transport),
    ("WHOLE FOODS|WHOLEFDS|TRADER JOE|SAFEWAY|KROGER|ALDI", Category::Groceries),
    ("COSTCO|TARGET|WALMART", Category::Shopping),
    ("AMAZON|AMZN", Category::Shopping),
    ("CVS|WALGREENS|RITE AID|PHARMACY", Category::Healthcare),
    ("AIRBNB|MARRIOTT|HILTON|DELTA AIR|UNITED AIR|SOUTHWES", Category::Travel),
    ("COMCAST|XFINITY|VERIZON|T MOBILE|PG E|ELECTRIC|WATER BILL", Category::Utilities),
    ("RENT PAYMENT|MORTGAGE|HOA DUES", Category::Housing),
    ("PETCO|PETSMART|CHEWY|VETERINARY", Category::Pets),
    ("PELOTON|PLANET FITNESS|24 HOUR FITNESS|EQUINOX", Category::Personal),
    ("UDEMY|COURSERA|TUITION", Category::Education),
    ("PAYROLL|DIRECT DEPOSIT|SALARY", Category::Income),
    ("INTEREST CHARGE|ANNUAL FEE|LATE FEE|ATM FEE", Category::Financial),
    ("STEAM GAMES|PLAYSTATION|NINTENDO|AMC THEATRES|TICKETMASTER", Category::Entertainment),
];

impl Database {
    /// Seed the built-in known-pattern library (idempotent - skips existing patterns)
    pub fn seed_known_patterns(&self) -> Result<()> {
        let conn = self.conn()?;

        let mut inserted = 0;
        for (pattern, category) in BUILTIN_PATTERNS {
            let affected = conn.execute(
                r#"
                INSERT OR IGNORE INTO known_patterns (pattern, match_kind, category)
                VALUES (?, ?, ?)
                "#,
                params![pattern, MatchKind::Contains.as_str(), category.as_str()],
            )?;
            inserted += affected;
        }

        if inserted > 0 {
            info!(count = inserted, "Seeded known-pattern library");
        }
        Ok(())
    }

    /// List the known-pattern library in insertion order
    pub fn list_known_patterns(&self) -> Result<Vec<KnownPattern>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, pattern, match_kind, category
            FROM known_patterns
            ORDER BY id
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            let match_kind_str: String = row.get(2)?;
            let category_str: String = row.get(3)?;
            Ok(KnownPattern {
                id: row.get(0)?,
                pattern: row.get(1)?,
                match_kind: match_kind_str.parse().unwrap_or(MatchKind::Contains),
                category: category_str.parse().unwrap_or(Category::Uncategorized),
            })
        })?;

        let mut patterns = Vec::new();
        for row in rows {
            patterns.push(row?);
        }
        Ok(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_idempotent() {
        let db = Database::in_memory().unwrap();

        let first = db.list_known_patterns().unwrap();
        assert_eq!(first.len(), BUILTIN_PATTERNS.len());

        // Seeding again must not duplicate
        db.seed_known_patterns().unwrap();
        let second = db.list_known_patterns().unwrap();
        assert_eq!(second.len(), first.len());
    }

    #[test]
    fn test_seeded_patterns_parse_cleanly() {
        let db = Database::in_memory().unwrap();
        for p in db.list_known_patterns().unwrap() {
            assert_eq!(p.match_kind, MatchKind::Contains);
            assert_ne!(p.category, Category::Uncategorized);
        }
    }
}
