//! AI backend response types
//!
//! These types are backend-agnostic and used across all AI implementations.

use serde::{Deserialize, Serialize};

/// Raw category guess returned by a provider, before validation
///
/// The category is still a free string at this point; the classifier maps
/// it into the closed `Category` set and downgrades anything it cannot map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGuess {
    /// Provider's chosen label (expected to be one of the allowed set)
    pub category: String,
    /// Provider-reported confidence, if any
    #[serde(default)]
    pub confidence: Option<f64>,
}
