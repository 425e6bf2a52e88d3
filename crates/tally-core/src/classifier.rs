//! Transaction classification engine
//!
//! Classification consults three tiers in strict priority order: per-user
//! learned rules, the global known-pattern library, then a single AI
//! provider call. The first tier that matches wins; lower tiers are never
//! consulted after a match.
//!
//! AI results are cached per-session to avoid repeated provider calls for
//! the same merchant description within a single import batch.

use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::ai::{AIBackend, AIClient};
use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::{
    Category, ClassificationResult, ClassificationRule, ClassificationSource, MatchKind,
    TransactionRecord,
};
use crate::normalize::{normalize, pattern_matches};

/// Confidence reported for a user-rule match (authoritative)
pub const USER_RULE_CONFIDENCE: f64 = 1.0;
/// Confidence reported for a known-pattern match
pub const KNOWN_PATTERN_CONFIDENCE: f64 = 0.8;
/// Confidence used when the provider does not report one
pub const AI_DEFAULT_CONFIDENCE: f64 = 0.5;

/// Priority assigned to rules learned from manual corrections, so they beat
/// rules created with the default priority
const LEARNED_RULE_PRIORITY: i32 = 100;

/// Result of classifying a batch of imported transactions
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// One result per input record, in input order
    pub results: Vec<ClassificationResult>,
    pub processed: i64,
    pub by_user_rule: i64,
    pub by_known_pattern: i64,
    pub by_ai: i64,
    pub by_ai_cached: i64,
    /// Records that ended `uncategorized` (subset of the AI counts)
    pub uncategorized: i64,
}

/// Transaction classification engine with per-session AI caching
pub struct Classifier<'a> {
    db: &'a Database,
    ai: Option<&'a AIClient>,
    /// Per-session cache for AI classifications (normalized description -> result)
    /// Uses Mutex for thread-safety in async contexts
    ai_cache: Mutex<HashMap<String, ClassificationResult>>,
}

impl<'a> Classifier<'a> {
    /// Create a new classifier with an optional AI client
    ///
    /// Without a client, tier 3 is treated as a permanently failing provider:
    /// unmatched descriptions come back `uncategorized`.
    pub fn new(db: &'a Database, ai: Option<&'a AIClient>) -> Self {
        Self {
            db,
            ai,
            ai_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Classify a transaction description for a user
    ///
    /// Priority: user rules → known patterns → AI fallback. Always produces
    /// a result for a well-formed call; provider failures are downgraded to
    /// `uncategorized` rather than raised. An empty `user_id` is a caller
    /// contract violation and the only error path.
    ///
    /// The amount participates in the AI prompt only; rules and patterns
    /// match on the description alone.
    pub async fn classify(
        &self,
        user_id: &str,
        description: &str,
        amount: Option<f64>,
    ) -> Result<ClassificationResult> {
        if user_id.trim().is_empty() {
            return Err(Error::InvalidArgument("user_id must not be empty".into()));
        }

        let normalized = normalize(description);
        if normalized.is_empty() {
            // Nothing to match on: both local tiers were consulted trivially,
            // and the provider would only see an empty string.
            debug!("Empty description, returning uncategorized");
            return Ok(ClassificationResult {
                category: Category::Uncategorized,
                source: ClassificationSource::KnownPattern,
                confidence: 0.0,
            });
        }

        // 1. Per-user learned rules - user corrections always win
        if let Some(result) = self.apply_user_rules(user_id, &normalized)? {
            debug!(
                "User rule matched for '{}': {}",
                description, result.category
            );
            return Ok(result);
        }

        // 2. Global known-pattern library
        if let Some(result) = self.apply_known_patterns(&normalized)? {
            debug!(
                "Known pattern matched for '{}': {}",
                description, result.category
            );
            return Ok(result);
        }

        // 3. AI fallback (never raises - failures downgrade to uncategorized)
        Ok(self.classify_with_ai(&normalized, amount).await)
    }

    /// Apply the user's rules, highest priority first
    fn apply_user_rules(
        &self,
        user_id: &str,
        normalized: &str,
    ) -> Result<Option<ClassificationResult>> {
        let rules = self.db.list_rules(user_id)?;

        for rule in rules {
            if pattern_matches(normalized, &rule.pattern, rule.match_kind)? {
                return Ok(Some(ClassificationResult {
                    category: rule.category,
                    source: ClassificationSource::UserRule,
                    confidence: USER_RULE_CONFIDENCE,
                }));
            }
        }

        Ok(None)
    }

    /// Apply the global known-pattern library in library order
    fn apply_known_patterns(&self, normalized: &str) -> Result<Option<ClassificationResult>> {
        let patterns = self.db.list_known_patterns()?;

        for pattern in patterns {
            if pattern_matches(normalized, &pattern.pattern, pattern.match_kind)? {
                return Ok(Some(ClassificationResult {
                    category: pattern.category,
                    source: ClassificationSource::KnownPattern,
                    confidence: KNOWN_PATTERN_CONFIDENCE,
                }));
            }
        }

        Ok(None)
    }

    /// Check if a description is already in the AI cache (for batch stats)
    fn is_ai_cached(&self, normalized: &str) -> bool {
        self.ai_cache.lock().unwrap().contains_key(normalized)
    }

    /// Classify via the AI provider, downgrading every failure locally
    ///
    /// Timeouts, non-2xx responses, unparseable bodies and labels outside
    /// the allowed set all produce the `uncategorized` result so that a
    /// failed classification never blocks the surrounding import flow.
    async fn classify_with_ai(&self, normalized: &str, amount: Option<f64>) -> ClassificationResult {
        let failed = ClassificationResult {
            category: Category::Uncategorized,
            source: ClassificationSource::AiFallback,
            confidence: 0.0,
        };

        let ai = match self.ai {
            Some(client) => client,
            None => {
                debug!("No AI provider configured, returning uncategorized");
                return failed;
            }
        };

        // Check cache first
        {
            let cache = self.ai_cache.lock().unwrap();
            if let Some(cached) = cache.get(normalized) {
                debug!("AI cache hit for '{}'", normalized);
                return cached.clone();
            }
        }

        let result = match ai
            .classify_description(normalized, amount, Category::allowed())
            .await
        {
            Ok(guess) => match guess.category.parse::<Category>() {
                Ok(category) if Category::allowed().contains(&category) => {
                    let confidence = guess
                        .confidence
                        .unwrap_or(AI_DEFAULT_CONFIDENCE)
                        .clamp(0.0, 1.0);
                    ClassificationResult {
                        category,
                        source: ClassificationSource::AiFallback,
                        confidence,
                    }
                }
                _ => {
                    warn!(
                        "Provider returned label outside the allowed set for '{}': {}",
                        normalized, guess.category
                    );
                    failed
                }
            },
            Err(e) => {
                warn!("AI classification failed for '{}': {}", normalized, e);
                failed
            }
        };

        // Cache the result (failures included, so a flaky provider is asked
        // at most once per description per session)
        self.ai_cache
            .lock()
            .unwrap()
            .insert(normalized.to_string(), result.clone());

        result
    }

    /// Record a manual correction as a learned rule
    ///
    /// The normalized description becomes a `contains` rule at elevated
    /// priority, so future occurrences of the merchant resolve in tier 1.
    pub fn learn_rule(&self, user_id: &str, description: &str, category: Category) -> Result<i64> {
        let normalized = normalize(description);
        if normalized.is_empty() {
            return Err(Error::InvalidArgument(
                "description has no matchable content".into(),
            ));
        }

        self.db.create_rule(
            user_id,
            &normalized,
            MatchKind::Contains,
            category,
            LEARNED_RULE_PRIORITY,
        )
    }

    /// Classify a batch of imported transactions with per-source statistics
    pub async fn classify_batch(
        &self,
        user_id: &str,
        records: &[TransactionRecord],
    ) -> Result<BatchResult> {
        let mut batch = BatchResult {
            results: Vec::with_capacity(records.len()),
            processed: records.len() as i64,
            by_user_rule: 0,
            by_known_pattern: 0,
            by_ai: 0,
            by_ai_cached: 0,
            uncategorized: 0,
        };

        for record in records {
            let was_cached = self.is_ai_cached(&normalize(&record.description));

            let result = self
                .classify(user_id, &record.description, record.amount)
                .await?;

            match result.source {
                ClassificationSource::UserRule => batch.by_user_rule += 1,
                ClassificationSource::KnownPattern => batch.by_known_pattern += 1,
                ClassificationSource::AiFallback => {
                    if was_cached {
                        batch.by_ai_cached += 1;
                    } else {
                        batch.by_ai += 1;
                    }
                }
            }
            if result.category == Category::Uncategorized {
                batch.uncategorized += 1;
            }

            batch.results.push(result);
        }

        Ok(batch)
    }
}

/// Return every rule of a user that matches a description
///
/// Used by the review workflow to explain why a description classifies the
/// way it does. Rules with invalid regex patterns are skipped.
pub fn matching_rules(
    db: &Database,
    user_id: &str,
    description: &str,
) -> Result<Vec<ClassificationRule>> {
    let normalized = normalize(description);
    let mut matches = Vec::new();

    for rule in db.list_rules(user_id)? {
        if pattern_matches(&normalized, &rule.pattern, rule.match_kind).unwrap_or(false) {
            matches.push(rule);
        }
    }

    Ok(matches)
}
