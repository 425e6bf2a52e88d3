//! Mock backend for testing
//!
//! Provides predictable responses for classification without a running
//! provider. Useful for unit tests and offline development.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::Category;

use super::types::CategoryGuess;
use super::AIBackend;

/// Mock AI backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// When set, every classification fails with this message
    pub fail_with: Option<String>,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            fail_with: None,
        }
    }

    /// Create a mock backend whose classification calls always fail
    pub fn failing(message: &str) -> Self {
        Self {
            healthy: false,
            fail_with: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn classify_description(
        &self,
        description: &str,
        _amount: Option<f64>,
        allowed: &[Category],
    ) -> Result<CategoryGuess> {
        if let Some(ref message) = self.fail_with {
            return Err(Error::InvalidData(message.clone()));
        }

        // Simple keyword table covering well-known merchants
        let upper = description.to_uppercase();
        let category = if upper.contains("NETFLIX") || upper.contains("SPOTIFY") {
            Category::Subscriptions
        } else if upper.contains("UBER EATS") || upper.contains("STARBUCKS") {
            Category::Dining
        } else if upper.contains("UBER") || upper.contains("LYFT") {
            Category::Transport
        } else if upper.contains("WHOLE FOODS") || upper.contains("SAFEWAY") {
            Category::Groceries
        } else if upper.contains("AMAZON") || upper.contains("TARGET") {
            Category::Shopping
        } else if upper.contains("PELOTON") || upper.contains("FITNESS") {
            Category::Personal
        } else {
            Category::Shopping
        };

        // Stay inside whatever set the caller allowed
        let category = if allowed.contains(&category) {
            category
        } else {
            *allowed.first().unwrap_or(&Category::Uncategorized)
        };

        Ok(CategoryGuess {
            category: category.as_str().to_string(),
            confidence: Some(0.9),
        })
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_classifies_known_merchant() {
        let mock = MockBackend::new();
        let guess = mock
            .classify_description("NETFLIX.COM", None, Category::allowed())
            .await
            .unwrap();
        assert_eq!(guess.category, "subscriptions");
    }

    #[tokio::test]
    async fn test_failing_mock_errors() {
        let mock = MockBackend::failing("connection refused");
        let result = mock
            .classify_description("NETFLIX.COM", None, Category::allowed())
            .await;
        assert!(result.is_err());
        assert!(!mock.health_check().await);
    }
}
