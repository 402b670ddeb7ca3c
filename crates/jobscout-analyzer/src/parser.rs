//! Parse LLM output into typed answers

use crate::error::AnalyzerError;
use jobscout_domain::{Category, TextualSignal};
use serde_json::{Map, Value};

/// Classifier answer as returned by the LLM
#[derive(Debug, Clone, PartialEq)]
pub struct LlmClassification {
    /// Category; unknown names map to `Other`
    pub category: Category,
    /// Entry-level verdict, if the model gave one
    pub is_entry_level: Option<bool>,
    /// Free-text justification
    pub reasoning: String,
}

/// Sponsorship answer as returned by the LLM
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSponsorship {
    /// Signal; unrecognized levels map to `None`
    pub signal: TextualSignal,
    /// Free-text justification
    pub reasoning: String,
}

/// Parse a classification response
pub fn parse_classification(response: &str) -> Result<LlmClassification, AnalyzerError> {
    let obj = parse_object(response)?;

    let category = obj
        .get("category")
        .and_then(Value::as_str)
        .map(Category::parse)
        .ok_or_else(|| AnalyzerError::InvalidFormat("Missing or invalid 'category'".to_string()))?;

    let is_entry_level = match obj.get("is_entry_level") {
        Some(Value::Bool(b)) => Some(*b),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" => Some(true),
            "false" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };

    Ok(LlmClassification {
        category,
        is_entry_level,
        reasoning: string_field(&obj, "reasoning"),
    })
}

/// Parse a sponsorship response
pub fn parse_sponsorship(response: &str) -> Result<LlmSponsorship, AnalyzerError> {
    let obj = parse_object(response)?;

    let signal = obj
        .get("signal")
        .and_then(Value::as_str)
        .map(TextualSignal::from_level)
        .ok_or_else(|| AnalyzerError::InvalidFormat("Missing or invalid 'signal'".to_string()))?;

    Ok(LlmSponsorship {
        signal,
        reasoning: string_field(&obj, "reasoning"),
    })
}

fn string_field(obj: &Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn parse_object(response: &str) -> Result<Map<String, Value>, AnalyzerError> {
    let json_str = extract_json(response)?;
    let json: Value = serde_json::from_str(json_str)?;
    match json {
        Value::Object(obj) => Ok(obj),
        _ => Err(AnalyzerError::InvalidFormat("Expected JSON object".to_string())),
    }
}

/// Extract the JSON object from a response
///
/// Handles markdown code fences and prose around the object by taking the
/// span from the first `{` to the last `}`.
fn extract_json(response: &str) -> Result<&str, AnalyzerError> {
    let trimmed = response.trim();
    let start = trimmed.find('{');
    let end = trimmed.rfind('}');

    match (start, end) {
        (Some(start), Some(end)) if start < end => Ok(&trimmed[start..=end]),
        _ => Err(AnalyzerError::InvalidFormat("No JSON object in response".to_string())),
    }
}
