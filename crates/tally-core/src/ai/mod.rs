//! Pluggable AI backend abstraction
//!
//! This module provides a backend-agnostic interface for the classifier's
//! tier-3 fallback call.
//!
//! # Architecture
//!
//! - `AIBackend` trait: defines the classification interface
//! - `AIClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `OpenAICompatibleBackend`, `MockBackend`
//!
//! # Configuration
//!
//! Backends are built from an explicit [`ProviderConfig`] value. At the
//! application boundary `AIClient::resolve()` reads `TALLY_AI_*` environment
//! variables and the provider config file; the library itself never touches
//! ambient state.

mod mock;
mod openai_compatible;
pub mod parsing;
pub mod types;

pub use mock::MockBackend;
pub use openai_compatible::OpenAICompatibleBackend;
pub use types::CategoryGuess;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::Result;
use crate::models::Category;

/// Trait defining the interface for AI classification backends
///
/// Backends must be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AIBackend: Send + Sync {
    /// Classify a transaction description into one of the allowed categories
    ///
    /// The returned guess is unvalidated; callers map it into the closed
    /// category set and treat anything unmappable as a failure.
    async fn classify_description(
        &self,
        description: &str,
        amount: Option<f64>,
        allowed: &[Category],
    ) -> Result<CategoryGuess>;

    /// Check if the backend is reachable
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AIClient {
    /// OpenAI-compatible backend (hosted APIs, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AIClient {
    /// Create a backend from explicit provider settings
    pub fn openai(config: &ProviderConfig) -> Result<Self> {
        Ok(AIClient::OpenAICompatible(OpenAICompatibleBackend::new(
            config,
        )?))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AIClient::Mock(MockBackend::new())
    }

    /// Resolve a client from environment variables or the config file
    ///
    /// `TALLY_AI_BACKEND=mock` selects the mock backend; otherwise provider
    /// settings come from [`ProviderConfig::resolve`]. Returns None when no
    /// provider is configured - classification then runs local tiers only.
    pub fn resolve() -> Option<Self> {
        let backend =
            std::env::var("TALLY_AI_BACKEND").unwrap_or_else(|_| "openai".to_string());

        match backend.to_lowercase().as_str() {
            "mock" => Some(AIClient::mock()),
            "openai" | "openai_compatible" => {
                let config = ProviderConfig::resolve()?;
                match Self::openai(&config) {
                    Ok(client) => Some(client),
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to build provider client");
                        None
                    }
                }
            }
            _ => {
                tracing::warn!(backend = %backend, "Unknown TALLY_AI_BACKEND, ignoring");
                None
            }
        }
    }
}

// Implement AIBackend for AIClient by delegating to the inner backend
#[async_trait]
impl AIBackend for AIClient {
    async fn classify_description(
        &self,
        description: &str,
        amount: Option<f64>,
        allowed: &[Category],
    ) -> Result<CategoryGuess> {
        match self {
            AIClient::OpenAICompatible(b) => {
                b.classify_description(description, amount, allowed).await
            }
            AIClient::Mock(b) => b.classify_description(description, amount, allowed).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AIClient::OpenAICompatible(b) => b.health_check().await,
            AIClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.model(),
            AIClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AIClient::OpenAICompatible(b) => b.host(),
            AIClient::Mock(b) => b.host(),
        }
    }
}
