//! Built-in advice rules
//!
//! All thresholds follow the 50/30/20 budgeting guideline: at most 50% of
//! take-home income on needs, 30% on wants, at least 20% saved.

use crate::models::Category;

use super::engine::{AdviceRule, SpendingSummary};
use super::types::{BudgetBucket, Severity, Tip};

/// Minimum savings rate before the savings tip fires
const SAVINGS_TARGET: f64 = 0.2;

/// Discretionary categories that get an individual concentration check,
/// with the share of income above which they are flagged
const CONCENTRATION_LIMITS: &[(Category, f64)] = &[
    (Category::Dining, 0.15),
    (Category::Subscriptions, 0.10),
];

/// Flags 50/30/20 bucket overruns and a low savings rate
pub struct FiftyThirtyTwentyRule;

impl AdviceRule for FiftyThirtyTwentyRule {
    fn id(&self) -> &'static str {
        "fifty-thirty-twenty"
    }

    fn name(&self) -> &'static str {
        "50/30/20 split"
    }

    fn evaluate(&self, summary: &SpendingSummary) -> Vec<Tip> {
        let income = summary.monthly_income;
        if income <= 0.0 {
            return vec![];
        }

        let mut tips = Vec::new();

        for bucket in [BudgetBucket::Needs, BudgetBucket::Wants] {
            let spent = summary.spent_in_bucket(bucket);
            let share = spent / income;
            let target = bucket.target_share();
            if share <= target {
                continue;
            }

            // 10 points over target escalates to a warning
            let severity = if share > target + 0.1 {
                Severity::Warning
            } else {
                Severity::Attention
            };

            tips.push(Tip::new(
                severity,
                format!("Over budget on {}", bucket),
                format!(
                    "You spent ${:.0} ({:.0}% of income) on {} this month; the 50/30/20 guideline suggests at most {:.0}%.",
                    spent,
                    share * 100.0,
                    bucket,
                    target * 100.0
                ),
            ));
        }

        let savings = income - summary.total_spent();
        let savings_rate = savings / income;
        if savings_rate < SAVINGS_TARGET && savings >= 0.0 {
            tips.push(Tip::new(
                Severity::Attention,
                "Savings below target",
                format!(
                    "You saved {:.0}% of income this month; the 50/30/20 guideline suggests at least {:.0}%.",
                    savings_rate * 100.0,
                    SAVINGS_TARGET * 100.0
                ),
            ));
        }

        tips
    }
}

/// Flags a single discretionary category eating a large share of income
pub struct CategoryConcentrationRule;

impl AdviceRule for CategoryConcentrationRule {
    fn id(&self) -> &'static str {
        "category-concentration"
    }

    fn name(&self) -> &'static str {
        "Category concentration"
    }

    fn evaluate(&self, summary: &SpendingSummary) -> Vec<Tip> {
        let income = summary.monthly_income;
        if income <= 0.0 {
            return vec![];
        }

        let mut tips = Vec::new();

        for (category, limit) in CONCENTRATION_LIMITS {
            let spent = summary.spent_in(*category);
            let share = spent / income;
            if share <= *limit {
                continue;
            }

            tips.push(Tip::new(
                Severity::Attention,
                format!("High {} spending", category),
                format!(
                    "{} took {:.0}% of income (${:.0}); keeping it under {:.0}% leaves more room to save.",
                    category,
                    share * 100.0,
                    spent,
                    limit * 100.0
                ),
            ));
        }

        tips
    }
}

/// Flags a month where spending reached or exceeded income
pub struct OverspendRule;

impl AdviceRule for OverspendRule {
    fn id(&self) -> &'static str {
        "overspend"
    }

    fn name(&self) -> &'static str {
        "Overspend"
    }

    fn evaluate(&self, summary: &SpendingSummary) -> Vec<Tip> {
        let income = summary.monthly_income;
        if income <= 0.0 {
            return vec![];
        }

        let total = summary.total_spent();
        if total < income {
            return vec![];
        }

        vec![Tip::new(
            Severity::Warning,
            "Spending exceeded income",
            format!(
                "You spent ${:.0} against ${:.0} of income (${:.0} over).",
                total,
                income,
                total - income
            ),
        )]
    }
}
