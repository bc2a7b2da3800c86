use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error payload as the backend sends it. Handlers answer with `message` or
/// `error`, the framework with `detail`, and serializer validation with a map
/// of field name to messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }

    /// The message a user should see, if the body carries one.
    pub fn user_message(&self) -> Option<String> {
        [&self.message, &self.detail, &self.error]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.first_field_message())
    }

    fn first_field_message(&self) -> Option<String> {
        if let Some(msg) = self.fields.get("non_field_errors").and_then(first_text) {
            return Some(msg);
        }
        self.fields
            .iter()
            .filter(|(field, _)| field.as_str() != "non_field_errors")
            .find_map(|(field, value)| first_text(value).map(|msg| format!("{field}: {msg}")))
    }
}

fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => items.iter().find_map(first_text),
        _ => None,
    }
}

/// Extracts a user-facing message from a raw response body.
pub fn message_from_body(raw: &str) -> Option<String> {
    ErrorBody::parse(raw).and_then(|body| body.user_message())
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
