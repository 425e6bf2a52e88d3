//! Advisor engine - orchestrates advice rule evaluation

use std::collections::HashMap;

use crate::models::Category;

use super::rules::{CategoryConcentrationRule, FiftyThirtyTwentyRule, OverspendRule};
use super::types::{BudgetBucket, Tip};

/// A month of categorized spending, as supplied by the host application
#[derive(Debug, Clone, Default)]
pub struct SpendingSummary {
    /// Monthly take-home income
    pub monthly_income: f64,
    /// Spending per category, as positive amounts
    totals: HashMap<Category, f64>,
}

impl SpendingSummary {
    pub fn new(monthly_income: f64) -> Self {
        Self {
            monthly_income,
            totals: HashMap::new(),
        }
    }

    /// Add spending to a category; amounts are stored as positive values
    /// so both signed exports (-15.49) and plain totals work.
    pub fn add(&mut self, category: Category, amount: f64) {
        if category == Category::Income {
            return;
        }
        *self.totals.entry(category).or_insert(0.0) += amount.abs();
    }

    /// Build a summary from `(category, amount)` pairs
    pub fn from_totals(monthly_income: f64, totals: &[(Category, f64)]) -> Self {
        let mut summary = Self::new(monthly_income);
        for (category, amount) in totals {
            summary.add(*category, *amount);
        }
        summary
    }

    /// Spending in one category
    pub fn spent_in(&self, category: Category) -> f64 {
        self.totals.get(&category).copied().unwrap_or(0.0)
    }

    /// Total spending across all categories
    pub fn total_spent(&self) -> f64 {
        self.totals.values().sum()
    }

    /// Total spending in a 50/30/20 bucket
    pub fn spent_in_bucket(&self, bucket: BudgetBucket) -> f64 {
        self.totals
            .iter()
            .filter(|(cat, _)| BudgetBucket::for_category(**cat) == Some(bucket))
            .map(|(_, amount)| amount)
            .sum()
    }
}

/// Trait for advice rules
pub trait AdviceRule: Send + Sync {
    /// Stable identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the summary and produce zero or more tips
    ///
    /// Rules that cannot apply (e.g. zero income) produce no tips rather
    /// than erroring.
    fn evaluate(&self, summary: &SpendingSummary) -> Vec<Tip>;
}

/// The advisor engine that runs all registered rules
pub struct AdvisorEngine {
    rules: Vec<Box<dyn AdviceRule>>,
}

impl Default for AdvisorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisorEngine {
    /// Create an engine with the built-in rules registered
    pub fn new() -> Self {
        let mut engine = Self { rules: vec![] };

        engine.register(Box::new(FiftyThirtyTwentyRule));
        engine.register(Box::new(CategoryConcentrationRule));
        engine.register(Box::new(OverspendRule));

        engine
    }

    /// Register an additional advice rule
    pub fn register(&mut self, rule: Box<dyn AdviceRule>) {
        self.rules.push(rule);
    }

    /// Run every rule and collect tips, most severe first
    pub fn advise(&self, summary: &SpendingSummary) -> Vec<Tip> {
        let mut tips = Vec::new();

        for rule in &self.rules {
            let found = rule.evaluate(summary);
            tracing::debug!(rule = rule.id(), count = found.len(), "Advice rule evaluated");
            tips.extend(found);
        }

        tips.sort_by(|a, b| b.severity.cmp(&a.severity));
        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::types::Severity;

    #[test]
    fn test_summary_accumulates_absolute_amounts() {
        let mut summary = SpendingSummary::new(5000.0);
        summary.add(Category::Dining, -120.0);
        summary.add(Category::Dining, 80.0);
        assert_eq!(summary.spent_in(Category::Dining), 200.0);
    }

    #[test]
    fn test_summary_ignores_income_category() {
        let mut summary = SpendingSummary::new(5000.0);
        summary.add(Category::Income, 5000.0);
        assert_eq!(summary.total_spent(), 0.0);
    }

    #[test]
    fn test_bucket_totals() {
        let summary = SpendingSummary::from_totals(
            5000.0,
            &[
                (Category::Housing, 1500.0),
                (Category::Groceries, 500.0),
                (Category::Dining, 300.0),
                (Category::Uncategorized, 100.0),
            ],
        );
        assert_eq!(summary.spent_in_bucket(BudgetBucket::Needs), 2000.0);
        assert_eq!(summary.spent_in_bucket(BudgetBucket::Wants), 300.0);
        assert_eq!(summary.total_spent(), 2400.0);
    }

    #[test]
    fn test_advise_sorts_most_severe_first() {
        // Overspending and a blown wants bucket at once
        let summary = SpendingSummary::from_totals(
            2000.0,
            &[(Category::Shopping, 1500.0), (Category::Housing, 900.0)],
        );

        let engine = AdvisorEngine::new();
        let tips = engine.advise(&summary);
        assert!(!tips.is_empty());
        for pair in tips.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
    }

    #[test]
    fn test_zero_income_produces_no_tips() {
        let summary =
            SpendingSummary::from_totals(0.0, &[(Category::Dining, 300.0)]);

        let engine = AdvisorEngine::new();
        assert!(engine.advise(&summary).is_empty());
    }

    struct AlwaysTip;
    impl AdviceRule for AlwaysTip {
        fn id(&self) -> &'static str {
            "always"
        }
        fn name(&self) -> &'static str {
            "Always"
        }
        fn evaluate(&self, _summary: &SpendingSummary) -> Vec<Tip> {
            vec![Tip::new(Severity::Info, "Hello", "world")]
        }
    }

    #[test]
    fn test_custom_rules_can_be_registered() {
        let mut engine = AdvisorEngine::new();
        engine.register(Box::new(AlwaysTip));

        let tips = engine.advise(&SpendingSummary::new(0.0));
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].title, "Hello");
    }
}
