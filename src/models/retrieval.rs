// src/models/retrieval.rs

//! Knowledge base retrieve-and-generate results.

use serde_json::{Map, Value};

/// Reply of a single retrieve-and-generate call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievalResult {
    /// Generated answer; `None` when the service omitted the output block
    pub answer: Option<String>,

    /// Citations supporting parts of the answer
    pub citations: Vec<Citation>,
}

impl RetrievalResult {
    /// Create a result with an answer and no citations.
    pub fn answered(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            citations: Vec::new(),
        }
    }

    /// Attach a citation.
    pub fn with_citation(mut self, citation: Citation) -> Self {
        self.citations.push(citation);
        self
    }

    /// Total number of retrieved references across all citations.
    pub fn reference_count(&self) -> usize {
        self.citations.iter().map(|c| c.references.len()).sum()
    }
}

/// A group of retrieved references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Citation {
    pub references: Vec<RetrievedReference>,
}

impl Citation {
    pub fn new(references: Vec<RetrievedReference>) -> Self {
        Self { references }
    }
}

/// One retrieved snippet as reported by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedReference {
    /// Snippet text
    pub content: Option<String>,

    /// Where the snippet came from (S3 object, web page, ...)
    pub location: Option<Value>,

    /// Metadata attached to the source document
    pub metadata: Option<Map<String, Value>>,
}

impl RetrievedReference {
    /// Create a reference carrying only snippet text.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }
}
