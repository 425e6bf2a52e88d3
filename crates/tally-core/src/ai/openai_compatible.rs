//! OpenAI-compatible backend implementation
//!
//! Works with any server that implements the OpenAI chat completions API,
//! hosted or local (vLLM, LocalAI, llama-server, etc.). The provider is
//! treated as an untrusted, fallible remote dependency: every request runs
//! under a bounded timeout and all failures surface as errors the classifier
//! downgrades locally.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};
use crate::models::Category;

use super::parsing::parse_category_guess;
use super::types::CategoryGuess;
use super::AIBackend;

/// OpenAI-compatible backend
///
/// Sends a single `/v1/chat/completions` request per classification with an
/// optional `Authorization: Bearer` header.
#[derive(Clone)]
pub struct OpenAICompatibleBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAICompatibleBackend {
    /// Create a backend from explicit provider settings
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Build the classification prompt
    ///
    /// The allowed label set is embedded so the model answers from the
    /// closed vocabulary, and the response format is pinned to JSON.
    fn build_prompt(description: &str, amount: Option<f64>, allowed: &[Category]) -> String {
        let labels = allowed
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        let amount_line = amount
            .map(|a| format!("Amount: {:.2}\n", a))
            .unwrap_or_default();

        format!(
            "Classify this bank transaction into exactly one category.\n\
             Description: \"{}\"\n\
             {}Allowed categories: {}\n\
             Respond with only a JSON object: {{\"category\": \"<label>\", \"confidence\": <0.0-1.0>}}",
            description, amount_line, labels
        )
    }

    /// Make a chat completion request
    async fn chat_completion(&self, prompt: &str) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(0.0),
            stream: false,
        };

        let mut req_builder = self
            .http_client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&request);

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::InvalidData(format!(
                "Provider API error {}: {}",
                status, body
            )));
        }

        let chat_response: ChatCompletionResponse = response.json().await?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| Error::InvalidData("No choices in provider response".into()))
    }
}

/// Request to the chat completions API
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl AIBackend for OpenAICompatibleBackend {
    async fn classify_description(
        &self,
        description: &str,
        amount: Option<f64>,
        allowed: &[Category],
    ) -> Result<CategoryGuess> {
        let prompt = Self::build_prompt(description, amount, allowed);
        let response = self.chat_completion(&prompt).await?;
        debug!("Provider response: {}", response);

        parse_category_guess(&response)
    }

    async fn health_check(&self) -> bool {
        let mut req_builder = self
            .http_client
            .get(format!("{}/v1/models", self.base_url));

        if let Some(ref api_key) = self.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        match req_builder.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_includes_labels_and_amount() {
        let prompt = OpenAICompatibleBackend::build_prompt(
            "UBER TRIP",
            Some(-25.5),
            Category::allowed(),
        );
        assert!(prompt.contains("UBER TRIP"));
        assert!(prompt.contains("Amount: -25.50"));
        assert!(prompt.contains("transport"));
        assert!(!prompt.contains("uncategorized"));
    }

    #[test]
    fn test_build_prompt_omits_amount_line_when_absent() {
        let prompt = OpenAICompatibleBackend::build_prompt("UBER TRIP", None, Category::allowed());
        assert!(!prompt.contains("Amount:"));
    }

    #[test]
    fn test_backend_reports_model_and_host() {
        let mut config = ProviderConfig::new("http://localhost:8000/");
        config.model = "small-classifier".to_string();
        let backend = OpenAICompatibleBackend::new(&config).unwrap();
        assert_eq!(backend.model(), "small-classifier");
        assert_eq!(backend.host(), "http://localhost:8000");
    }
}
