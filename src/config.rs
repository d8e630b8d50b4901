// src/config.rs

//! Configuration loading utilities.
//!
//! Configuration comes from an optional TOML file followed by environment
//! overrides, so a Lambda deployment can be retargeted without a rebuild.
//!
//! ## Environment Variables
//!
//! - `CONFIG_PATH`: TOML file to load before applying overrides
//! - `KNOWLEDGE_BASE_ID`: Bedrock knowledge base identifier
//! - `MODEL_ARN`: foundation model ARN used for generation
//! - `MAX_SOURCES`: number of source records returned to the client (1 to 3)

use std::path::Path;

use tracing::{info, warn};

use crate::error::Result;
use crate::models::Config;

/// Load configuration for the Lambda environment.
pub fn load_lambda_config() -> Result<Config> {
    load_with(|key| std::env::var(key).ok())
}

/// Load configuration using `lookup` to resolve environment variables.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    let config = match lookup("CONFIG_PATH") {
        Some(path) => load_config(Path::new(&path))?,
        None => Config::default(),
    };

    let config = apply_env_overrides(config, &lookup);
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<Config> {
    info!("Loading config file: {}", path.display());
    Config::load(path)
}

/// Override configuration values from environment-style lookups.
pub fn apply_env_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(id) = lookup("KNOWLEDGE_BASE_ID") {
        config.knowledge_base.knowledge_base_id = id;
    }

    if let Some(arn) = lookup("MODEL_ARN") {
        config.knowledge_base.model_arn = arn;
    }

    if let Some(max) = lookup("MAX_SOURCES") {
        match max.parse() {
            Ok(n) => config.response.max_sources = n,
            Err(_) => warn!("Ignoring unparseable MAX_SOURCES={:?}", max),
        }
    }

    config
}
