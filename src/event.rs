// src/event.rs

//! Invocation event decoding.
//!
//! The handler is reachable two ways: API Gateway proxy integrations wrap the
//! client JSON in a string-valued `body` field, while direct invocations pass
//! the client JSON as the event itself.

use serde_json::Value;

use crate::error::{AppError, Result};

/// The two accepted invocation shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Payload<'a> {
    /// `{"query": ...}` passed directly
    Direct(&'a Value),

    /// `{"body": "<JSON string>"}` from a proxy integration
    Wrapped(&'a Value),
}

impl<'a> Payload<'a> {
    /// Classify an event. `body` takes precedence when present.
    pub fn from_event(event: &'a Value) -> Self {
        match event.get("body") {
            Some(body) => Payload::Wrapped(body),
            None => Payload::Direct(event),
        }
    }

    /// Extract the query text, `None` when absent or falsy.
    pub fn query(&self) -> Result<Option<String>> {
        match self {
            Payload::Direct(event) => query_field(event),
            Payload::Wrapped(body) => {
                let raw = body
                    .as_str()
                    .ok_or_else(|| AppError::invalid_event("body must be a JSON-encoded string"))?;
                let decoded: Value = serde_json::from_str(raw)?;
                query_field(&decoded)
            }
        }
    }
}

/// Extract the query from an event, treating absence as an empty string.
pub fn extract_query(event: &Value) -> Result<String> {
    Ok(Payload::from_event(event).query()?.unwrap_or_default())
}

fn query_field(object: &Value) -> Result<Option<String>> {
    let object = object
        .as_object()
        .ok_or_else(|| AppError::invalid_event("request payload must be a JSON object"))?;

    match object.get("query") {
        None => Ok(None),
        Some(value) if is_falsy(value) => Ok(None),
        Some(Value::String(query)) => Ok(Some(query.clone())),
        Some(other) => Err(AppError::invalid_event(format!(
            "query must be a string, got {other}"
        ))),
    }
}

/// `null`, `false`, zero, and empty strings, arrays or objects.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
