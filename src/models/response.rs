// src/models/response.rs

//! Client-facing response structures.
//!
//! Responses follow the API Gateway proxy integration shape: a status code,
//! a header map and a JSON document encoded as a string in `body`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::models::RetrievedReference;

/// Flattened representation of one retrieved snippet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceRecord {
    /// Snippet text (empty when the service returned none)
    pub content: String,

    /// Source location descriptor (empty object when absent)
    pub location: Value,

    /// Source document metadata (empty object when absent)
    pub metadata: Value,
}

impl From<&RetrievedReference> for SourceRecord {
    fn from(reference: &RetrievedReference) -> Self {
        Self {
            content: reference.content.clone().unwrap_or_default(),
            location: reference
                .location
                .clone()
                .unwrap_or_else(|| Value::Object(Map::new())),
            metadata: Value::Object(reference.metadata.clone().unwrap_or_default()),
        }
    }
}

/// Success body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueryAnswer {
    /// The query as received
    pub query: String,

    /// Generated answer text
    pub response: String,

    /// Total number of retrieved references, before truncation
    pub sources_count: usize,

    /// Leading source records, in citation order
    pub sources: Vec<SourceRecord>,
}

/// Failure body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// CORS headers attached to every response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CorsHeaders {
    #[serde(rename = "Content-Type")]
    pub content_type: &'static str,

    #[serde(rename = "Access-Control-Allow-Origin")]
    pub allow_origin: &'static str,

    #[serde(rename = "Access-Control-Allow-Headers")]
    pub allow_headers: &'static str,

    #[serde(rename = "Access-Control-Allow-Methods")]
    pub allow_methods: &'static str,
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            content_type: "application/json",
            allow_origin: "*",
            allow_headers: "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
            allow_methods: "POST,OPTIONS",
        }
    }
}

/// API Gateway proxy response.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProxyResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,

    pub headers: CorsHeaders,

    /// JSON-encoded body
    pub body: String,
}

impl ProxyResponse {
    /// 200 response carrying an answer.
    pub fn ok(answer: &QueryAnswer) -> Result<Self> {
        Ok(Self::with_body(200, serde_json::to_string(answer)?))
    }

    /// 400 response carrying an error message.
    pub fn bad_request(message: &str) -> Self {
        Self::error(400, message)
    }

    /// 500 response carrying an error message.
    pub fn internal_error(message: &str) -> Self {
        Self::error(500, message)
    }

    fn error(status_code: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message });
        Self::with_body(status_code, body.to_string())
    }

    fn with_body(status_code: u16, body: String) -> Self {
        Self {
            status_code,
            headers: CorsHeaders::default(),
            body,
        }
    }

    /// Decode the body as a success answer.
    pub fn answer(&self) -> Result<QueryAnswer> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// Decode the body as an error.
    pub fn error_body(&self) -> Result<ErrorBody> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
