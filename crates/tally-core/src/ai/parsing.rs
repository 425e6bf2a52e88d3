//! JSON parsing helpers for AI backend responses
//!
//! These functions extract JSON from AI model responses, which often include
//! extra text before/after the JSON payload.

use crate::error::{Error, Result};

use super::types::CategoryGuess;

/// Parse a category guess from an AI response
pub fn parse_category_guess(response: &str) -> Result<CategoryGuess> {
    // Try to find JSON in the response
    let response = response.trim();

    // Look for JSON object
    let start = response.find('{');
    let end = response.rfind('}');

    match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                // Truncate long responses for the error message
                let truncated = if json_str.len() > 200 {
                    format!("{}...", &json_str[..200])
                } else {
                    json_str.to_string()
                };
                Error::InvalidData(format!("Invalid JSON from AI: {} | Raw: {}", e, truncated))
            })
        }
        _ => Err(Error::InvalidData(format!(
            "No JSON found in AI response | Raw: {}",
            if response.len() > 200 {
                format!("{}...", &response[..200])
            } else {
                response.to_string()
            }
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_json() {
        let guess =
            parse_category_guess(r#"{"category": "groceries", "confidence": 0.8}"#).unwrap();
        assert_eq!(guess.category, "groceries");
        assert_eq!(guess.confidence, Some(0.8));
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let guess = parse_category_guess(
            "Sure! Here's the classification:\n{\"category\": \"transport\"}\nHope that helps.",
        )
        .unwrap();
        assert_eq!(guess.category, "transport");
        assert_eq!(guess.confidence, None);
    }

    #[test]
    fn test_parse_missing_json_is_error() {
        assert!(parse_category_guess("I could not classify that.").is_err());
    }

    #[test]
    fn test_parse_malformed_json_is_error() {
        assert!(parse_category_guess(r#"{"category": groceries"#).is_err());
    }
}
