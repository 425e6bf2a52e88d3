//! Per-user classification rule operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, ClassificationRule, MatchKind};

impl Database {
    /// Create a classification rule for a user
    pub fn create_rule(
        &self,
        user_id: &str,
        pattern: &str,
        match_kind: MatchKind,
        category: Category,
        priority: i32,
    ) -> Result<i64> {
        if user_id.trim().is_empty() {
            return Err(Error::InvalidArgument("user_id must not be empty".into()));
        }
        if pattern.trim().is_empty() {
            return Err(Error::InvalidArgument("pattern must not be empty".into()));
        }
        // Reject unusable regex patterns up front so classification never
        // trips over a stored rule later
        if match_kind == MatchKind::Regex {
            regex::Regex::new(pattern)?;
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO classification_rules (user_id, pattern, match_kind, category, priority)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                pattern,
                match_kind.as_str(),
                category.as_str(),
                priority
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Delete a classification rule by id
    pub fn delete_rule(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM classification_rules WHERE id = ?", params![id])?;
        if affected == 0 {
            return Err(Error::NotFound(format!("rule {}", id)));
        }
        Ok(())
    }

    /// List a user's rules, highest priority first, newest first within a priority
    pub fn list_rules(&self, user_id: &str) -> Result<Vec<ClassificationRule>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, pattern, match_kind, category, priority, created_at
            FROM classification_rules
            WHERE user_id = ?
            ORDER BY priority DESC, id DESC
            "#,
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            let match_kind_str: String = row.get(3)?;
            let category_str: String = row.get(4)?;
            let created_at_str: String = row.get(6)?;
            Ok(ClassificationRule {
                id: row.get(0)?,
                user_id: row.get(1)?,
                pattern: row.get(2)?,
                match_kind: match_kind_str.parse().unwrap_or(MatchKind::Contains),
                category: category_str.parse().unwrap_or(Category::Uncategorized),
                priority: row.get(5)?,
                created_at: parse_datetime(&created_at_str),
            })
        })?;

        let mut rules = Vec::new();
        for row in rows {
            rules.push(row?);
        }
        Ok(rules)
    }

    /// Count rules across all users
    pub fn count_rules(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM classification_rules", [], |row| {
                row.get(0)
            })?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_list_rules() {
        let db = Database::in_memory().unwrap();

        db.create_rule("alice", "NETFLIX", MatchKind::Contains, Category::Subscriptions, 0)
            .unwrap();
        db.create_rule("alice", "WHOLE FOODS", MatchKind::Contains, Category::Groceries, 10)
            .unwrap();
        db.create_rule("bob", "NETFLIX", MatchKind::Contains, Category::Entertainment, 0)
            .unwrap();

        let alice = db.list_rules("alice").unwrap();
        assert_eq!(alice.len(), 2);
        // Highest priority first
        assert_eq!(alice[0].pattern, "WHOLE FOODS");
        assert_eq!(alice[0].category, Category::Groceries);

        let bob = db.list_rules("bob").unwrap();
        assert_eq!(bob.len(), 1);
        assert_eq!(bob[0].category, Category::Entertainment);

        assert_eq!(db.count_rules().unwrap(), 3);
    }

    #[test]
    fn test_rules_ordered_newest_first_within_priority() {
        let db = Database::in_memory().unwrap();

        db.create_rule("alice", "UBER", MatchKind::Contains, Category::Transport, 0)
            .unwrap();
        db.create_rule("alice", "UBER EATS", MatchKind::Contains, Category::Dining, 0)
            .unwrap();

        let rules = db.list_rules("alice").unwrap();
        assert_eq!(rules[0].pattern, "UBER EATS");
    }

    #[test]
    fn test_create_rule_rejects_empty_user() {
        let db = Database::in_memory().unwrap();
        let err = db
            .create_rule("  ", "NETFLIX", MatchKind::Contains, Category::Subscriptions, 0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_create_rule_rejects_empty_pattern() {
        let db = Database::in_memory().unwrap();
        let err = db
            .create_rule("alice", "", MatchKind::Contains, Category::Subscriptions, 0)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_create_rule_rejects_invalid_regex() {
        let db = Database::in_memory().unwrap();
        let err = db
            .create_rule("alice", "(", MatchKind::Regex, Category::Subscriptions, 0)
            .unwrap_err();
        assert!(matches!(err, Error::Regex(_)));

        // The same pattern is fine as a contains rule
        db.create_rule("alice", "(", MatchKind::Contains, Category::Subscriptions, 0)
            .unwrap();
    }

    #[test]
    fn test_delete_rule() {
        let db = Database::in_memory().unwrap();
        let id = db
            .create_rule("alice", "NETFLIX", MatchKind::Contains, Category::Subscriptions, 0)
            .unwrap();

        db.delete_rule(id).unwrap();
        assert!(db.list_rules("alice").unwrap().is_empty());

        let err = db.delete_rule(id).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
