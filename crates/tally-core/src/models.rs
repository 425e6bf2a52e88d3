//! Domain models for Tally

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The closed set of spending categories a transaction can be assigned to.
///
/// `Uncategorized` is the terminal fallback and is never offered to the AI
/// provider as a target label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Income,
    Housing,
    Utilities,
    Groceries,
    Dining,
    Transport,
    Healthcare,
    Shopping,
    Entertainment,
    Subscriptions,
    Travel,
    Personal,
    Education,
    Pets,
    Gifts,
    Financial,
    Uncategorized,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Housing => "housing",
            Self::Utilities => "utilities",
            Self::Groceries => "groceries",
            Self::Dining => "dining",
            Self::Transport => "transport",
            Self::Healthcare => "healthcare",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Subscriptions => "subscriptions",
            Self::Travel => "travel",
            Self::Personal => "personal",
            Self::Education => "education",
            Self::Pets => "pets",
            Self::Gifts => "gifts",
            Self::Financial => "financial",
            Self::Uncategorized => "uncategorized",
        }
    }

    /// All categories the AI provider may choose from (excludes the fallback)
    pub fn allowed() -> &'static [Category] {
        &[
            Self::Income,
            Self::Housing,
            Self::Utilities,
            Self::Groceries,
            Self::Dining,
            Self::Transport,
            Self::Healthcare,
            Self::Shopping,
            Self::Entertainment,
            Self::Subscriptions,
            Self::Travel,
            Self::Personal,
            Self::Education,
            Self::Pets,
            Self::Gifts,
            Self::Financial,
        ]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "housing" => Ok(Self::Housing),
            "utilities" => Ok(Self::Utilities),
            "groceries" => Ok(Self::Groceries),
            "dining" => Ok(Self::Dining),
            "transport" => Ok(Self::Transport),
            "healthcare" => Ok(Self::Healthcare),
            "shopping" => Ok(Self::Shopping),
            "entertainment" => Ok(Self::Entertainment),
            "subscriptions" => Ok(Self::Subscriptions),
            "travel" => Ok(Self::Travel),
            "personal" => Ok(Self::Personal),
            "education" => Ok(Self::Education),
            "pets" => Ok(Self::Pets),
            "gifts" => Ok(Self::Gifts),
            "financial" => Ok(Self::Financial),
            "uncategorized" => Ok(Self::Uncategorized),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which classification tier produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationSource {
    /// A per-user learned rule matched (authoritative)
    UserRule,
    /// A curated global pattern matched
    KnownPattern,
    /// The remote AI provider was consulted
    AiFallback,
}

impl ClassificationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UserRule => "user-rule",
            Self::KnownPattern => "known-pattern",
            Self::AiFallback => "ai-fallback",
        }
    }
}

impl std::str::FromStr for ClassificationSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user-rule" => Ok(Self::UserRule),
            "known-pattern" => Ok(Self::KnownPattern),
            "ai-fallback" => Ok(Self::AiFallback),
            _ => Err(format!("Unknown classification source: {}", s)),
        }
    }
}

impl std::fmt::Display for ClassificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a rule or pattern matches against a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Case-insensitive substring match; supports pipe-separated OR patterns
    Contains,
    /// Whole-string match against the normalized description
    Exact,
    /// Regular expression applied to raw and normalized text
    Regex,
}

impl MatchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Exact => "exact",
            Self::Regex => "regex",
        }
    }
}

impl std::str::FromStr for MatchKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(Self::Contains),
            "exact" => Ok(Self::Exact),
            "regex" => Ok(Self::Regex),
            _ => Err(format!("Unknown match kind: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A per-user learned classification rule
///
/// Created when a user manually corrects or confirms a category. Rules are
/// owned by their user and supersede the global known-pattern library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub id: i64,
    pub user_id: String,
    pub pattern: String,
    pub match_kind: MatchKind,
    pub category: Category,
    /// Higher priority rules are tested first
    pub priority: i32,
    pub created_at: DateTime<Utc>,
}

/// A curated global description→category mapping shared by all users
///
/// Read-only at runtime; seeded from the built-in library at migration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnownPattern {
    pub id: i64,
    pub pattern: String,
    pub match_kind: MatchKind,
    pub category: Category,
}

/// The outcome of classifying a single transaction description
///
/// Transient: produced per call and never persisted by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub source: ClassificationSource,
    /// Certainty of the assigned category, in [0, 1]
    pub confidence: f64,
}

/// A transaction row supplied by the host application's import flow
///
/// The classifier reads it and never mutates or stores it.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub description: String,
    #[serde(default)]
    pub amount: Option<f64>,
}
