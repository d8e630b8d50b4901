// src/models/config.rs

//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Upper bound on source records returned to the client.
pub const MAX_SOURCES_LIMIT: usize = 3;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge base and foundation model selection
    #[serde(default)]
    pub knowledge_base: KnowledgeBaseConfig,

    /// Response shaping settings
    #[serde(default)]
    pub response: ResponseConfig,

    /// Smoke-test client settings
    #[serde(default)]
    pub smoke_test: SmokeTestConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.knowledge_base.knowledge_base_id.trim().is_empty() {
            return Err(AppError::validation(
                "knowledge_base.knowledge_base_id is empty",
            ));
        }
        if self.knowledge_base.model_arn.trim().is_empty() {
            return Err(AppError::validation("knowledge_base.model_arn is empty"));
        }
        if !(1..=MAX_SOURCES_LIMIT).contains(&self.response.max_sources) {
            return Err(AppError::validation(format!(
                "response.max_sources must be between 1 and {MAX_SOURCES_LIMIT}, got {}",
                self.response.max_sources
            )));
        }
        if self.smoke_test.timeout_secs == 0 {
            return Err(AppError::validation("smoke_test.timeout_secs must be > 0"));
        }
        if self.smoke_test.preview_chars == 0 {
            return Err(AppError::validation("smoke_test.preview_chars must be > 0"));
        }
        if self.smoke_test.terraform_output.trim().is_empty() {
            return Err(AppError::validation("smoke_test.terraform_output is empty"));
        }
        Ok(())
    }
}

/// Which knowledge base to query and which model generates the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseConfig {
    /// Bedrock knowledge base identifier
    #[serde(default = "defaults::knowledge_base_id")]
    pub knowledge_base_id: String,

    /// Foundation model ARN used for generation
    #[serde(default = "defaults::model_arn")]
    pub model_arn: String,
}

impl Default for KnowledgeBaseConfig {
    fn default() -> Self {
        Self {
            knowledge_base_id: defaults::knowledge_base_id(),
            model_arn: defaults::model_arn(),
        }
    }
}

/// Response shaping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Number of source records returned to the client, at most `MAX_SOURCES_LIMIT`
    #[serde(default = "defaults::max_sources")]
    pub max_sources: usize,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            max_sources: defaults::max_sources(),
        }
    }
}

/// Smoke-test client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmokeTestConfig {
    /// Per-request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Characters of the answer shown in the preview
    #[serde(default = "defaults::preview_chars")]
    pub preview_chars: usize,

    /// Terraform output holding the endpoint URL
    #[serde(default = "defaults::terraform_output")]
    pub terraform_output: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for SmokeTestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: defaults::timeout(),
            preview_chars: defaults::preview_chars(),
            terraform_output: defaults::terraform_output(),
            user_agent: defaults::user_agent(),
        }
    }
}

mod defaults {
    // Knowledge base defaults
    pub fn knowledge_base_id() -> String {
        "BO2ZUTK4JD".into()
    }
    pub fn model_arn() -> String {
        "arn:aws:bedrock:us-east-1::foundation-model/anthropic.claude-3-sonnet-20240229-v1:0"
            .into()
    }

    // Response defaults
    pub fn max_sources() -> usize {
        super::MAX_SOURCES_LIMIT
    }

    // Smoke-test defaults
    pub fn timeout() -> u64 {
        30
    }
    pub fn preview_chars() -> usize {
        200
    }
    pub fn terraform_output() -> String {
        "api_url".into()
    }
    pub fn user_agent() -> String {
        "kb-query-smoke-test/0.1".into()
    }
}
