// src/services/knowledge_base.rs

//! Knowledge base abstraction.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::RetrievalResult;

/// A knowledge base that retrieves snippets for a query and generates an
/// answer from them.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Run a single retrieve-and-generate call for `query`.
    async fn retrieve_and_generate(&self, query: &str) -> Result<RetrievalResult>;
}
