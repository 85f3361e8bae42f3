use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::Index;

use crate::{classify::classify, ClientError, Result};

pub const STATUS_SUCCESS: &str = "success";

static NULL: Value = Value::Null;

/// Decoded body of a successful lookup.
///
/// The service does not publish a schema, so every field is kept as returned.
/// The accessors cover the fields the service is known to send; anything else
/// is reachable through [`LookupResult::get`] or indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupResult {
    fields: Map<String, Value>,
}

impl LookupResult {
    /// Parse a raw response body, turning empty, malformed and non-success
    /// bodies into the matching [`ClientError`].
    pub fn from_body(body: &str) -> Result<LookupResult> {
        if body.is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        let fields = serde_json::from_str::<Map<String, Value>>(body)
            .map_err(|err| ClientError::MalformedResponse(err.to_string()))?;
        let result = LookupResult { fields };

        if result.status() != Some(STATUS_SUCCESS) {
            return Err(result.into_failure());
        }
        Ok(result)
    }

    /// A failure body without `message` is reported as a generic service
    /// error with an empty message.
    fn into_failure(self) -> ClientError {
        let message = match self.fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };
        let kind = classify(&message);
        tracing::debug!(
            status = ?self.fields.get("status"),
            kind = ?kind,
            "lookup rejected by service"
        );
        kind.into_error(message)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String value of `key`, `None` if it is missing or not a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.get_str("status")
    }

    pub fn sid(&self) -> Option<&str> {
        self.get_str("sid")
    }

    pub fn message(&self) -> Option<&str> {
        self.get_str("message")
    }

    pub fn code(&self) -> Option<&str> {
        self.get_str("code")
    }

    pub fn offset(&self) -> Option<&str> {
        self.get_str("offset")
    }

    pub fn results(&self) -> Option<&str> {
        self.get_str("results")
    }

    pub fn wireless(&self) -> Option<&str> {
        self.get_str("wireless")
    }

    /// Whether the service found the number on at least one list.
    pub fn is_blacklisted(&self) -> bool {
        match self.fields.get("results") {
            Some(Value::String(count)) => count.trim().parse::<u64>().map_or(false, |n| n > 0),
            Some(Value::Number(count)) => count.as_u64().map_or(false, |n| n > 0),
            _ => false,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}

impl Index<&str> for LookupResult {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&NULL)
    }
}

impl From<LookupResult> for Map<String, Value> {
    fn from(result: LookupResult) -> Self {
        result.fields
    }
}
