//! Inbound request types for the chat proxy.

use serde_json::{Map, Value};

use crate::error::{ProxyError, Result};

/// A validated chat query.
///
/// `query` is never empty. An empty `conversation_id` is normalised to `None`
/// so the remote service starts a fresh conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatQuery {
    pub query: String,
    pub conversation_id: Option<String>,
}

impl ChatQuery {
    /// Parse and validate a raw request body.
    ///
    /// Anything that does not yield a non-empty string `query` (an empty body,
    /// malformed JSON, a non-object, a non-string query) is reported as a
    /// missing query. A `conversation_id` that is not a non-empty string is
    /// dropped.
    pub fn from_body(body: &[u8]) -> Result<Self> {
        // Each field is read on its own so a bad one cannot hide the other.
        let mut fields = match serde_json::from_slice(body) {
            Ok(Value::Object(fields)) => fields,
            _ => return Err(ProxyError::MissingQuery),
        };

        let query = take_non_empty_string(&mut fields, "query").ok_or(ProxyError::MissingQuery)?;

        Ok(Self {
            query,
            conversation_id: take_non_empty_string(&mut fields, "conversation_id"),
        })
    }
}

fn take_non_empty_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}
