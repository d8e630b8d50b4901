// src/handler.rs

//! Query handling: validate, ask the knowledge base, shape the answer.
//!
//! Every invocation ends in exactly one of three responses:
//! - 400 when the query is missing or empty (the knowledge base is not called)
//! - 200 with the answer and its leading sources
//! - 500 for any other failure, with the error message echoed to the caller

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::error::{AppError, Result};
use crate::event::extract_query;
use crate::models::{Citation, ProxyResponse, QueryAnswer, ResponseConfig, RetrievalResult, SourceRecord};
use crate::services::KnowledgeBase;

/// Message returned with a 400 response.
pub const QUERY_REQUIRED: &str = "Query parameter is required";

/// Turns invocation events into proxy responses.
#[derive(Clone)]
pub struct QueryHandler {
    knowledge_base: Arc<dyn KnowledgeBase>,
    max_sources: usize,
}

impl QueryHandler {
    /// Create a handler over a knowledge base.
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>, config: &ResponseConfig) -> Self {
        Self {
            knowledge_base,
            max_sources: config.max_sources,
        }
    }

    /// Handle one invocation. Never fails: errors become a 500 response.
    #[instrument(skip_all)]
    pub async fn handle(&self, event: &Value) -> ProxyResponse {
        match self.process(event).await {
            Ok(response) => response,
            Err(e) => {
                error!("Error processing request: {}", e);
                ProxyResponse::internal_error(&format!("Internal server error: {e}"))
            }
        }
    }

    async fn process(&self, event: &Value) -> Result<ProxyResponse> {
        let query = extract_query(event)?;
        if query.is_empty() {
            return Ok(ProxyResponse::bad_request(QUERY_REQUIRED));
        }

        info!("Processing query: {}", query);

        let result = self.knowledge_base.retrieve_and_generate(&query).await?;
        let answer = shape_answer(query, result, self.max_sources)?;

        info!(
            "Answered with {} of {} sources",
            answer.sources.len(),
            answer.sources_count
        );
        ProxyResponse::ok(&answer)
    }
}

/// Build the success body from a knowledge base reply.
pub fn shape_answer(
    query: String,
    result: RetrievalResult,
    max_sources: usize,
) -> Result<QueryAnswer> {
    let response = result.answer.ok_or(AppError::MissingField("output.text"))?;

    let mut sources = flatten_sources(&result.citations);
    let sources_count = sources.len();
    sources.truncate(max_sources);

    Ok(QueryAnswer {
        query,
        response,
        sources_count,
        sources,
    })
}

/// Flatten citations into source records, preserving order.
pub fn flatten_sources(citations: &[Citation]) -> Vec<SourceRecord> {
    citations
        .iter()
        .flat_map(|citation| citation.references.iter())
        .map(SourceRecord::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::RetrievedReference;
    use crate::services::MockKnowledgeBase;

    fn handler_with(kb: &Arc<MockKnowledgeBase>) -> QueryHandler {
        QueryHandler::new(kb.clone(), &ResponseConfig::default())
    }

    fn five_references() -> RetrievalResult {
        RetrievalResult::answered("Tenemos arroz, azúcar y aceite.")
            .with_citation(Citation::new(vec![
                RetrievedReference::text("ref-1"),
                RetrievedReference::text("ref-2"),
            ]))
            .with_citation(Citation::default())
            .with_citation(Citation::new(vec![
                RetrievedReference::text("ref-3"),
                RetrievedReference::text("ref-4"),
                RetrievedReference::text("ref-5"),
            ]))
    }

    #[tokio::test]
    async fn test_direct_query_success() {
        let kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::answered("hi")));
        let response = handler_with(&kb).handle(&json!({"query": "hello"})).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.body,
            r#"{"query":"hello","response":"hi","sources_count":0,"sources":[]}"#
        );
        assert_eq!(kb.calls(), vec!["hello".to_string()]);
    }

    #[tokio::test]
    async fn test_wrapped_query_calls_once_with_exact_text() {
        let kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::answered("ok")));
        let event = json!({"body": "{\"query\": \"  ¿Qué información tienen sobre delivery?\"}"});

        let response = handler_with(&kb).handle(&event).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(
            kb.calls(),
            vec!["  ¿Qué información tienen sobre delivery?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_empty_wrapped_query_rejected() {
        let kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::answered("unused")));
        let response = handler_with(&kb)
            .handle(&json!({"body": "{\"query\": \"\"}"}))
            .await;

        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, r#"{"error":"Query parameter is required"}"#);
        assert!(kb.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_rejected() {
        let kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::answered("unused")));
        let handler = handler_with(&kb);

        for event in [
            json!({}),
            json!({"query": ""}),
            json!({"query": null}),
            json!({"query": 0}),
            json!({"query": false}),
            json!({"query": []}),
        ] {
            let response = handler.handle(&event).await;
            assert_eq!(response.status_code, 400);
            assert_eq!(response.error_body().unwrap().error, QUERY_REQUIRED);
        }
        assert!(kb.calls().is_empty());
    }

    #[tokio::test]
    async fn test_sources_truncated_but_counted() {
        let kb = Arc::new(MockKnowledgeBase::answering(five_references()));
        let response = handler_with(&kb).handle(&json!({"query": "productos"})).await;

        let answer = response.answer().unwrap();
        assert_eq!(answer.sources_count, 5);
        let contents: Vec<_> = answer.sources.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["ref-1", "ref-2", "ref-3"]);
    }

    #[tokio::test]
    async fn test_few_sources_returned_in_full() {
        let result = RetrievalResult::answered("precios").with_citation(Citation::new(vec![
            RetrievedReference::text("a"),
            RetrievedReference {
                location: Some(json!({"type": "WEB", "webLocation": {"url": "https://aje.pe"}})),
                ..Default::default()
            },
        ]));
        let kb = Arc::new(MockKnowledgeBase::answering(result));
        let answer = handler_with(&kb)
            .handle(&json!({"query": "precios"}))
            .await
            .answer()
            .unwrap();

        assert_eq!(answer.sources_count, 2);
        assert_eq!(answer.sources[0].content, "a");
        assert_eq!(answer.sources[0].location, json!({}));
        assert_eq!(answer.sources[1].content, "");
        assert_eq!(answer.sources[1].location["webLocation"]["url"], "https://aje.pe");
        assert_eq!(answer.sources[1].metadata, json!({}));
    }

    #[tokio::test]
    async fn test_knowledge_base_failure_becomes_500() {
        let kb = Arc::new(MockKnowledgeBase::failing("ThrottlingException: slow down"));
        let response = handler_with(&kb).handle(&json!({"query": "pedido"})).await;

        assert_eq!(response.status_code, 500);
        let error = response.error_body().unwrap().error;
        assert!(error.starts_with("Internal server error: "));
        assert!(error.contains("ThrottlingException: slow down"));
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_500_without_call() {
        let kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::answered("unused")));
        let response = handler_with(&kb).handle(&json!({"body": "{oops"})).await;

        assert_eq!(response.status_code, 500);
        assert!(response.error_body().unwrap().error.contains("JSON error"));
        assert!(kb.calls().is_empty());
    }

    #[tokio::test]
    async fn test_missing_answer_becomes_500() {
        let kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::default()));
        let response = handler_with(&kb).handle(&json!({"query": "hola"})).await;

        assert_eq!(response.status_code, 500);
        assert!(response.error_body().unwrap().error.contains("output.text"));
        assert_eq!(kb.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_headers_identical_across_outcomes() {
        let ok_kb = Arc::new(MockKnowledgeBase::answering(RetrievalResult::answered("hi")));
        let failing_kb = Arc::new(MockKnowledgeBase::failing("boom"));

        let success = handler_with(&ok_kb).handle(&json!({"query": "a"})).await;
        let rejected = handler_with(&ok_kb).handle(&json!({})).await;
        let failed = handler_with(&failing_kb).handle(&json!({"query": "a"})).await;

        let headers = |r: &ProxyResponse| serde_json::to_string(&r.headers).unwrap();
        assert_eq!(headers(&success), headers(&rejected));
        assert_eq!(headers(&success), headers(&failed));
    }

    #[test]
    fn test_shape_answer_respects_max_sources() {
        let answer = shape_answer("q".to_string(), five_references(), 1).unwrap();
        assert_eq!(answer.sources_count, 5);
        assert_eq!(answer.sources.len(), 1);
    }
}
