//! Wire types for the subdomain API

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Uniform response wrapper: `{ "success": bool, "result": ... }`
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,
    /// Payload on success, error message on failure
    #[serde(default)]
    pub result: Value,
}

impl Envelope {
    /// Server message carried in `result`, rendered as plain text
    pub fn message(&self) -> String {
        match &self.result {
            Value::String(s) => s.clone(),
            Value::Null => "request failed".to_string(),
            other => other.to_string(),
        }
    }
}

/// Body of `subdomain/list`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub subdomains: Vec<SubdomainRecord>,
}

/// A DNS record owned by the remote API
///
/// Fields are shown as the server sends them: numbers and booleans keep
/// their JSON text, `null` or a missing field becomes empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubdomainRecord {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "scalar_text")]
    pub record_type: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub value: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub created_at: String,
}

fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Parameters for creating or updating a subdomain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubdomainSpec {
    pub name: String,
    pub record_type: String,
    pub value: String,
}

impl SubdomainSpec {
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
        }
    }
}
