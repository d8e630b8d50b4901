// src/models/mod.rs

//! Domain models for the query adapter.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod response;
mod retrieval;

// Re-export all public types
pub use config::{
    Config, KnowledgeBaseConfig, MAX_SOURCES_LIMIT, ResponseConfig, SmokeTestConfig,
};
pub use response::{CorsHeaders, ErrorBody, ProxyResponse, QueryAnswer, SourceRecord};
pub use retrieval::{Citation, RetrievalResult, RetrievedReference};
