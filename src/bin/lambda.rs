// src/bin/lambda.rs

//! AWS Lambda entry point for the knowledge base query adapter.
//!
//! Deploy with `cargo lambda build --release --bin kb-query-lambda` behind an
//! API Gateway proxy integration.
//!
//! ## Environment Variables
//!
//! - `KNOWLEDGE_BASE_ID`: Bedrock knowledge base to query
//! - `MODEL_ARN`: foundation model used to generate answers
//! - `MAX_SOURCES`: number of sources returned to the client (default 3)
//! - `CONFIG_PATH`: optional TOML file loaded before the overrides above
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use kb_query::lambda::{self, App};
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    // Initialize tracing for Lambda
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    tracing::info!("kb-query Lambda starting...");

    let app = App::from_env().await?;
    let app = &app;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        lambda::handler(app, event).await
    }))
    .await
}
