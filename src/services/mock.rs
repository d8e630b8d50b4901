// src/services/mock.rs

//! In-memory knowledge base for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::RetrievalResult;
use crate::services::KnowledgeBase;

/// Knowledge base returning a canned reply and recording every query.
pub struct MockKnowledgeBase {
    reply: std::result::Result<RetrievalResult, String>,
    calls: Mutex<Vec<String>>,
}

impl MockKnowledgeBase {
    /// Answer every query with `result`.
    pub fn answering(result: RetrievalResult) -> Self {
        Self {
            reply: Ok(result),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail every query with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl KnowledgeBase for MockKnowledgeBase {
    async fn retrieve_and_generate(&self, query: &str) -> Result<RetrievalResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.to_string());
        }

        match &self.reply {
            Ok(result) => Ok(result.clone()),
            Err(message) => Err(AppError::knowledge_base("mock", message)),
        }
    }
}
