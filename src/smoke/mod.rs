// src/smoke/mod.rs

//! Smoke test for a deployed query endpoint.
//!
//! Finds the endpoint URL in Terraform output, posts a fixed set of store
//! questions one after another and prints what came back. Results are for a
//! human to read; nothing here decides pass or fail.

use std::fmt;
use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SmokeTestConfig;
use crate::utils::{http, preview};

/// Sample questions covering availability, pricing, ordering and delivery.
pub const SAMPLE_QUERIES: [&str; 4] = [
    "¿Qué productos de abarrotes tienen disponibles?",
    "¿Cuáles son los precios de los productos?",
    "¿Cómo puedo hacer un pedido?",
    "¿Qué información tienen sobre delivery?",
];

/// Read the endpoint URL from `terraform output -raw <output_name>`.
pub fn discover_endpoint(terraform_dir: &Path, output_name: &str) -> Result<Url> {
    log::debug!(
        "Running terraform output -raw {} in {}",
        output_name,
        terraform_dir.display()
    );

    let output = Command::new("terraform")
        .args(["output", "-raw", output_name])
        .current_dir(terraform_dir)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::config(format!(
            "terraform output {} failed: {}",
            output_name,
            stderr.trim()
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if stdout.trim().is_empty() {
        return Err(AppError::config(format!(
            "terraform output {output_name} is empty"
        )));
    }

    parse_endpoint(&stdout)
}

/// Parse an endpoint URL, accepting only http and https.
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::config(format!(
            "endpoint must be http or https, got {other}"
        ))),
    }
}

/// What happened to one smoke-test query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// 200 with a readable answer
    Answered { preview: String, sources_count: usize },
    /// Any other status
    Rejected { status: u16, body: String },
    /// Request exceeded the client timeout
    TimedOut,
    /// Transport failure or unreadable 200 body
    Failed(String),
}

impl QueryOutcome {
    /// Classify a completed HTTP exchange.
    pub fn from_response(status: u16, body: &str, preview_chars: usize) -> Self {
        if status != 200 {
            return QueryOutcome::Rejected {
                status,
                body: body.to_string(),
            };
        }

        match serde_json::from_str::<AnswerSummary>(body) {
            Ok(answer) => QueryOutcome::Answered {
                preview: preview(&answer.response, preview_chars).to_string(),
                sources_count: answer.sources_count,
            },
            Err(e) => QueryOutcome::Failed(format!("unreadable response body: {e}")),
        }
    }

    fn from_transport(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            QueryOutcome::TimedOut
        } else {
            QueryOutcome::Failed(AppError::from(error).to_string())
        }
    }
}

impl fmt::Display for QueryOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryOutcome::Answered {
                preview,
                sources_count,
            } => {
                writeln!(f, "✅ Response: {preview}...")?;
                write!(f, "📊 Sources: {sources_count}")
            }
            QueryOutcome::Rejected { status, body } => write!(f, "❌ Error {status}: {body}"),
            QueryOutcome::TimedOut => write!(f, "⏰ Request timed out"),
            QueryOutcome::Failed(message) => write!(f, "❌ Error: {message}"),
        }
    }
}

/// Fields of the success body the smoke test reports on.
#[derive(Debug, Deserialize)]
struct AnswerSummary {
    response: String,
    sources_count: usize,
}

/// Client bound to one deployed endpoint.
pub struct SmokeTest {
    client: reqwest::Client,
    endpoint: Url,
    preview_chars: usize,
}

impl SmokeTest {
    /// Create a smoke test using the configured timeout and preview length.
    pub fn new(endpoint: Url, config: &SmokeTestConfig) -> Result<Self> {
        Ok(Self {
            client: http::create_async_client(config)?,
            endpoint,
            preview_chars: config.preview_chars,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// POST one query and classify the reply.
    pub async fn run_query(&self, query: &str) -> QueryOutcome {
        let sent = self
            .client
            .post(self.endpoint.clone())
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => return QueryOutcome::from_transport(e),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => QueryOutcome::from_response(status, &body, self.preview_chars),
            Err(e) => QueryOutcome::from_transport(e),
        }
    }

    /// Run every query in order, printing each outcome as it arrives.
    pub async fn run_all(&self, queries: &[&str]) -> Vec<QueryOutcome> {
        let mut outcomes = Vec::with_capacity(queries.len());
        for query in queries {
            println!("\n🔍 Query: {query}");
            let outcome = self.run_query(query).await;
            println!("{outcome}");
            outcomes.push(outcome);
        }

        let answered = outcomes
            .iter()
            .filter(|o| matches!(o, QueryOutcome::Answered { .. }))
            .count();
        log::debug!("{}/{} queries answered", answered, outcomes.len());

        outcomes
    }
}
