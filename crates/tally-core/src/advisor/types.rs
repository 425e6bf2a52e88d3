//! Advisor output types

use serde::{Deserialize, Serialize};

use crate::models::Category;

/// How urgently a tip deserves attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Attention,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Attention => "attention",
            Self::Warning => "warning",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single budgeting tip produced by an advice rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Tip {
    pub fn new(severity: Severity, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// The 50/30/20 buckets a spending category falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BudgetBucket {
    /// Essentials: target at most 50% of income
    Needs,
    /// Discretionary: target at most 30% of income
    Wants,
}

impl BudgetBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Needs => "needs",
            Self::Wants => "wants",
        }
    }

    /// Target share of income for this bucket
    pub fn target_share(&self) -> f64 {
        match self {
            Self::Needs => 0.5,
            Self::Wants => 0.3,
        }
    }

    /// Which bucket a category belongs to
    ///
    /// Income is not spending; uncategorized spending counts toward the
    /// overall total but belongs to no bucket.
    pub fn for_category(category: Category) -> Option<BudgetBucket> {
        match category {
            Category::Housing
            | Category::Utilities
            | Category::Groceries
            | Category::Transport
            | Category::Healthcare
            | Category::Education
            | Category::Financial => Some(Self::Needs),
            Category::Dining
            | Category::Shopping
            | Category::Entertainment
            | Category::Subscriptions
            | Category::Travel
            | Category::Personal
            | Category::Pets
            | Category::Gifts => Some(Self::Wants),
            Category::Income | Category::Uncategorized => None,
        }
    }
}

impl std::fmt::Display for BudgetBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning > Severity::Attention);
        assert!(Severity::Attention > Severity::Info);
    }

    #[test]
    fn test_every_spending_category_has_a_bucket() {
        for cat in Category::allowed() {
            if *cat == Category::Income {
                continue;
            }
            assert!(
                BudgetBucket::for_category(*cat).is_some(),
                "no bucket for {}",
                cat
            );
        }
        assert!(BudgetBucket::for_category(Category::Income).is_none());
        assert!(BudgetBucket::for_category(Category::Uncategorized).is_none());
    }
}
