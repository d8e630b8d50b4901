// src/services/bedrock.rs

//! Amazon Bedrock knowledge base backend.
//!
//! Issues one `RetrieveAndGenerate` call per query against a fixed knowledge
//! base and foundation model, and converts the SDK reply into plain
//! `RetrievalResult` values.

use aws_sdk_bedrockagentruntime::Client;
use aws_sdk_bedrockagentruntime::error::SdkError;
use aws_sdk_bedrockagentruntime::types::{
    Citation as SdkCitation, KnowledgeBaseRetrieveAndGenerateConfiguration,
    RetrievalResultLocation, RetrieveAndGenerateConfiguration, RetrieveAndGenerateInput,
    RetrieveAndGenerateType, RetrievedReference as SdkReference,
};
use aws_smithy_types::error::display::DisplayErrorContext;
use aws_smithy_types::{Document, Number};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::{info, instrument};

use crate::error::{AppError, Result};
use crate::models::{Citation, KnowledgeBaseConfig, RetrievalResult, RetrievedReference};
use crate::services::KnowledgeBase;

/// Bedrock Agent Runtime client bound to one knowledge base.
#[derive(Clone)]
pub struct BedrockKnowledgeBase {
    client: Client,
    knowledge_base_id: String,
    model_arn: String,
}

impl BedrockKnowledgeBase {
    /// Create a new backend around an existing client.
    pub fn new(client: Client, config: &KnowledgeBaseConfig) -> Self {
        Self {
            client,
            knowledge_base_id: config.knowledge_base_id.clone(),
            model_arn: config.model_arn.clone(),
        }
    }

    /// Create a backend using the default AWS credential and region chain.
    pub async fn from_env(config: &KnowledgeBaseConfig) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), config)
    }
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    #[instrument(skip(self), fields(knowledge_base_id = %self.knowledge_base_id))]
    async fn retrieve_and_generate(&self, query: &str) -> Result<RetrievalResult> {
        let response = self
            .client
            .retrieve_and_generate()
            .input(build_input(&self.knowledge_base_id, query)?)
            .retrieve_and_generate_configuration(build_configuration(
                &self.knowledge_base_id,
                &self.model_arn,
            )?)
            .send()
            .await
            .map_err(|err| sdk_error(&self.knowledge_base_id, &err))?;

        let result = RetrievalResult {
            answer: response.output().map(|output| output.text().to_string()),
            citations: response.citations().iter().map(convert_citation).collect(),
        };

        info!(
            "Knowledge base answered: {} chars, {} references",
            result.answer.as_deref().map_or(0, str::len),
            result.reference_count()
        );
        Ok(result)
    }
}

fn build_input(knowledge_base_id: &str, query: &str) -> Result<RetrieveAndGenerateInput> {
    RetrieveAndGenerateInput::builder()
        .text(query)
        .build()
        .map_err(|e| AppError::knowledge_base(knowledge_base_id, e))
}

/// Knowledge-base-backed generation with the given model.
fn build_configuration(
    knowledge_base_id: &str,
    model_arn: &str,
) -> Result<RetrieveAndGenerateConfiguration> {
    let knowledge_base = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
        .knowledge_base_id(knowledge_base_id)
        .model_arn(model_arn)
        .build()
        .map_err(|e| AppError::knowledge_base(knowledge_base_id, e))?;

    RetrieveAndGenerateConfiguration::builder()
        .r#type(RetrieveAndGenerateType::KnowledgeBase)
        .knowledge_base_configuration(knowledge_base)
        .build()
        .map_err(|e| AppError::knowledge_base(knowledge_base_id, e))
}

/// Keep the full source chain so timeouts and dispatch failures stay readable.
fn sdk_error<E, R>(knowledge_base_id: &str, err: &SdkError<E, R>) -> AppError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    AppError::knowledge_base(knowledge_base_id, DisplayErrorContext(err))
}

fn convert_citation(citation: &SdkCitation) -> Citation {
    Citation::new(
        citation
            .retrieved_references()
            .iter()
            .map(convert_reference)
            .collect(),
    )
}

fn convert_reference(reference: &SdkReference) -> RetrievedReference {
    RetrievedReference {
        content: reference.content().map(|content| content.text().to_string()),
        location: reference.location().map(location_to_json),
        metadata: reference.metadata().map(|metadata| {
            metadata
                .iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect()
        }),
    }
}

/// Render a location in the same camelCase shape the service uses on the wire.
fn location_to_json(location: &RetrievalResultLocation) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!(location.r#type().as_str()));

    if let Some(s3) = location.s3_location() {
        object.insert("s3Location".to_string(), json!({ "uri": s3.uri() }));
    }
    if let Some(web) = location.web_location() {
        object.insert("webLocation".to_string(), json!({ "url": web.url() }));
    }
    if let Some(confluence) = location.confluence_location() {
        object.insert(
            "confluenceLocation".to_string(),
            json!({ "url": confluence.url() }),
        );
    }
    if let Some(salesforce) = location.salesforce_location() {
        object.insert(
            "salesforceLocation".to_string(),
            json!({ "url": salesforce.url() }),
        );
    }
    if let Some(share_point) = location.share_point_location() {
        object.insert(
            "sharePointLocation".to_string(),
            json!({ "url": share_point.url() }),
        );
    }

    Value::Object(object)
}

/// Convert a Smithy document into JSON.
fn document_to_json(document: &Document) -> Value {
    match document {
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), document_to_json(value)))
                .collect(),
        ),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Number(Number::PosInt(n)) => Value::from(*n),
        Document::Number(Number::NegInt(n)) => Value::from(*n),
        // NaN and infinities have no JSON form
        Document::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Document::String(s) => Value::String(s.clone()),
        Document::Bool(b) => Value::Bool(*b),
        Document::Null => Value::Null,
    }
}
