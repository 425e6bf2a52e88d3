//! Description normalization and pattern matching
//!
//! Bank descriptions arrive as noisy uppercase strings with store numbers,
//! processor prefixes and punctuation ("SQ *COFFEE  SHOP #1234"). All rule
//! and pattern matching runs against a normalized form: uppercased, trimmed,
//! punctuation replaced by spaces, whitespace collapsed.

use regex::Regex;

use crate::error::Result;
use crate::models::MatchKind;

/// Normalize a transaction description for matching
///
/// Uppercases, replaces every non-alphanumeric character with a space, and
/// collapses runs of whitespace. Returns an empty string for descriptions
/// with no matchable content.
pub fn normalize(description: &str) -> String {
    let upper = description.to_uppercase();
    let cleaned: String = upper
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check whether a normalized description matches a pattern
///
/// `Contains` patterns support pipe-separated OR alternatives; each
/// alternative is itself normalized before the substring test so that
/// "netflix.com" and "NETFLIX COM" behave the same. `Exact` compares whole
/// normalized strings. `Regex` patterns are applied verbatim to the
/// normalized description (which is always uppercase).
pub fn pattern_matches(normalized: &str, pattern: &str, kind: MatchKind) -> Result<bool> {
    match kind {
        MatchKind::Contains => {
            for alt in pattern.split('|') {
                let alt = normalize(alt);
                if !alt.is_empty() && normalized.contains(&alt) {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        MatchKind::Exact => Ok(!normalized.is_empty() && normalized == normalize(pattern)),
        MatchKind::Regex => {
            let re = Regex::new(pattern)?;
            Ok(re.is_match(normalized))
        }
    }
}
