// src/services/mod.rs

//! Service layer for the query adapter.
//!
//! This module contains the knowledge base seam:
//! - The `KnowledgeBase` trait the handler depends on
//! - Amazon Bedrock Agent Runtime backend (`BedrockKnowledgeBase`)
//! - Canned backend for tests (`MockKnowledgeBase`)

#[cfg(feature = "lambda")]
mod bedrock;
mod knowledge_base;
#[cfg(test)]
mod mock;

#[cfg(feature = "lambda")]
pub use bedrock::BedrockKnowledgeBase;
pub use knowledge_base::KnowledgeBase;
#[cfg(test)]
pub use mock::MockKnowledgeBase;
