//! Rule-based budget advisor
//!
//! Evaluates a month of categorized spending against 50/30/20-style
//! financial rules and produces severity-ranked tips. Purely local: no
//! database reads, no AI calls.

mod engine;
mod rules;
mod types;

pub use engine::{AdviceRule, AdvisorEngine, SpendingSummary};
pub use rules::{CategoryConcentrationRule, FiftyThirtyTwentyRule, OverspendRule};
pub use types::{BudgetBucket, Severity, Tip};
