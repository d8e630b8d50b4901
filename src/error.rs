// src/error.rs

//! Unified error handling for the query adapter.

use std::fmt;

use thiserror::Error;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[cfg(feature = "cli")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[cfg(feature = "cli")]
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Invocation event has an unusable shape
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Knowledge base reply lacks a required field
    #[error("Missing field in knowledge base response: {0}")]
    MissingField(&'static str),

    /// Knowledge base call failed
    #[error("Knowledge base error for {context}: {message}")]
    KnowledgeBase { context: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an invalid-event error.
    pub fn invalid_event(message: impl Into<String>) -> Self {
        Self::InvalidEvent(message.into())
    }

    /// Create a knowledge base error with context.
    pub fn knowledge_base(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::KnowledgeBase {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
