// src/lambda/mod.rs

//! AWS Lambda handler for the query adapter.
//!
//! This module provides the Lambda function entry point that:
//! 1. Builds the Bedrock client once per execution environment (`App`)
//! 2. Hands each invocation event to `QueryHandler`
//! 3. Returns an API Gateway proxy response, even on failure

use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::load_lambda_config;
use crate::error::Result;
use crate::handler::QueryHandler;
use crate::models::{Config, ProxyResponse};
use crate::services::{BedrockKnowledgeBase, KnowledgeBase};

/// State shared by every invocation served by one execution environment.
#[derive(Clone)]
pub struct App {
    handler: QueryHandler,
}

impl App {
    /// Build the application around a knowledge base.
    pub fn new(knowledge_base: Arc<dyn KnowledgeBase>, config: &Config) -> Self {
        Self {
            handler: QueryHandler::new(knowledge_base, &config.response),
        }
    }

    /// Build the application from environment configuration.
    pub async fn from_env() -> Result<Self> {
        let config = load_lambda_config()?;
        info!(
            "Using knowledge base {} with model {}",
            config.knowledge_base.knowledge_base_id, config.knowledge_base.model_arn
        );

        let knowledge_base = BedrockKnowledgeBase::from_env(&config.knowledge_base).await;
        Ok(Self::new(Arc::new(knowledge_base), &config))
    }
}

/// Main Lambda handler function.
#[instrument(skip(app, event), fields(request_id = %event.context.request_id))]
pub async fn handler(
    app: &App,
    event: LambdaEvent<Value>,
) -> std::result::Result<ProxyResponse, LambdaError> {
    let (payload, _context) = event.into_parts();
    let response = app.handler.handle(&payload).await;
    info!("Responding with status {}", response.status_code);
    Ok(response)
}
