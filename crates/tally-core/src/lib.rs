//! Tally Core Library
//!
//! Shared functionality for the Tally transaction classification engine:
//! - Three-tier classification cascade (user rules → known patterns → AI)
//! - SQLite rule/pattern store with migrations and seeding
//! - Pluggable AI backends (OpenAI-compatible providers, mock)
//! - Description normalization and pattern matching
//! - Rule-based budget advisor (50/30/20 tips)
//! - CSV input for batch classification and spending summaries

pub mod advisor;
pub mod ai;
pub mod classifier;
pub mod config;
pub mod db;
pub mod error;
pub mod import;
pub mod models;
pub mod normalize;

/// Test utilities including the mock provider server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use advisor::{AdviceRule, AdvisorEngine, Severity, SpendingSummary, Tip};
pub use ai::{AIBackend, AIClient, CategoryGuess, MockBackend, OpenAICompatibleBackend};
pub use classifier::{matching_rules, BatchResult, Classifier};
pub use config::ProviderConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use models::{
    Category, ClassificationResult, ClassificationRule, ClassificationSource, KnownPattern,
    MatchKind, TransactionRecord,
};
