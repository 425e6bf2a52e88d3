//! Rule and pattern store with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `rules` - Per-user classification rule CRUD
//! - `patterns` - Known-pattern library reads and seeding
//!
//! The classifier only ever reads through this layer during a request;
//! writes happen through explicit calls (`create_rule`, rule deletion) from
//! the review workflow.

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod patterns;
mod rules;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Runs migrations and seeds the known-pattern library on first open.
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;
        db.seed_known_patterns()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because each
    /// pooled connection would otherwise see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("tally_test_{}_{}.db", std::process::id(), id));
        let path = path.to_string_lossy().to_string();

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block writers during imports
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- Per-user learned rules (created from manual corrections)
            CREATE TABLE IF NOT EXISTS classification_rules (
                id INTEGER PRIMARY KEY,
                user_id TEXT NOT NULL,
                pattern TEXT NOT NULL,
                match_kind TEXT NOT NULL DEFAULT 'contains',
                category TEXT NOT NULL,
                priority INTEGER NOT NULL DEFAULT 0,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_rules_user ON classification_rules(user_id);

            -- Curated global patterns, shared by all users, read-only at runtime
            CREATE TABLE IF NOT EXISTS known_patterns (
                id INTEGER PRIMARY KEY,
                pattern TEXT NOT NULL UNIQUE,
                match_kind TEXT NOT NULL DEFAULT 'contains',
                category TEXT NOT NULL
            );
            "#,
        )?;

        info!("Database migrations complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_creates_schema() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('classification_rules', 'known_patterns')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_parse_datetime() {
        let dt = parse_datetime("2024-03-01 12:30:00");
        assert_eq!(dt.to_rfc3339(), "2024-03-01T12:30:00+00:00");
    }
}
