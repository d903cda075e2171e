// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic-backed enrichment adapter for Curio.
//!
//! This crate implements [`EnrichmentAdapter`] on top of the Anthropic
//! Messages API. Every operation is one request that forces a single tool
//! call whose input schema is the operation's fixed output shape.

pub mod client;
pub mod schema;
pub mod types;

use async_trait::async_trait;
use curio_config::model::AnthropicConfig;
use curio_core::error::CurioError;
use curio_core::models::{
    DEFAULT_DISCOVERY_QUERY, ExtractedRecipe, MediaClassification, RestaurantDiscovery,
};
use curio_core::traits::{EnrichmentAdapter, PluginAdapter};
use curio_core::types::{AdapterType, HealthStatus};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::client::AnthropicClient;
use crate::schema::{CLASSIFY_MEDIA, DISCOVER_RESTAURANTS, EXTRACT_RECIPE, OutputSpec};
use crate::types::{ApiMessage, MessageRequest, MessageResponse, ResponseContentBlock, ToolChoice};

const SYSTEM_PROMPT: &str =
    "You turn free text and URLs into structured records. Answer only by calling the provided tool.";

/// Anthropic enrichment adapter implementing [`EnrichmentAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
pub struct AnthropicEnricher {
    client: AnthropicClient,
    max_tokens: u32,
}

impl AnthropicEnricher {
    /// Creates an enricher from the `[anthropic]` config section.
    pub fn new(config: &AnthropicConfig) -> Result<Self, CurioError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = AnthropicClient::new(
            api_key,
            config.api_version.clone(),
            config.default_model.clone(),
        )?;

        info!(
            model = config.default_model,
            "Anthropic enrichment initialized"
        );

        Ok(Self::with_client(client, config.max_tokens))
    }

    /// Creates an enricher around an existing client.
    pub fn with_client(client: AnthropicClient, max_tokens: u32) -> Self {
        Self { client, max_tokens }
    }

    fn to_message_request(&self, spec: &OutputSpec, input: &str) -> MessageRequest {
        MessageRequest {
            model: self.client.default_model().to_string(),
            messages: vec![ApiMessage::user(spec.prompt(input))],
            system: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.max_tokens,
            tools: Some(vec![spec.tool()]),
            tool_choice: Some(ToolChoice::tool(spec.tool_name)),
        }
    }

    /// Runs one operation and decodes its structured output.
    async fn structured<T: DeserializeOwned>(
        &self,
        spec: &OutputSpec,
        input: &str,
    ) -> Result<T, CurioError> {
        let request = self.to_message_request(spec, input);
        let response = self.client.complete_message(&request).await?;
        debug!(
            tool = spec.tool_name,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "enrichment response"
        );
        decode_output(spec, &response)
    }
}

/// Reads the forced tool call's input, or the first JSON object in the text
/// when the model answered in prose.
fn decode_output<T: DeserializeOwned>(
    spec: &OutputSpec,
    response: &MessageResponse,
) -> Result<T, CurioError> {
    let tool_input = response.content.iter().find_map(|block| match block {
        ResponseContentBlock::ToolUse { name, input, .. } if name == spec.tool_name => {
            Some(input.clone())
        }
        _ => None,
    });

    let value = match tool_input {
        Some(input) => input,
        None => {
            let text: String = response
                .content
                .iter()
                .filter_map(|block| match block {
                    ResponseContentBlock::Text { text } => Some(text.as_str()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("\n");
            warn!(tool = spec.tool_name, "no tool call in response, scanning text");
            let json = schema::first_json_object(&text).ok_or_else(|| CurioError::Enrichment {
                message: format!("response contained no {} output", spec.tool_name),
                source: None,
            })?;
            serde_json::from_str(json).map_err(|e| CurioError::Enrichment {
                message: format!("malformed JSON in response text: {e}"),
                source: Some(Box::new(e)),
            })?
        }
    };

    serde_json::from_value(value).map_err(|e| CurioError::Enrichment {
        message: format!("{} output did not match schema: {e}", spec.tool_name),
        source: Some(Box::new(e)),
    })
}

fn require_input(input: &str) -> Result<&str, CurioError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CurioError::InvalidInput("input is required".into()));
    }
    Ok(input)
}

#[async_trait]
impl PluginAdapter for AnthropicEnricher {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Enrichment
    }

    async fn health_check(&self) -> Result<HealthStatus, CurioError> {
        // No API call: a health probe should not consume tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CurioError> {
        debug!("Anthropic enrichment shutting down");
        Ok(())
    }
}

#[async_trait]
impl EnrichmentAdapter for AnthropicEnricher {
    async fn classify_media(&self, input: &str) -> Result<MediaClassification, CurioError> {
        let input = require_input(input)?;
        self.structured(&CLASSIFY_MEDIA, input).await
    }

    async fn extract_recipe(&self, input: &str) -> Result<ExtractedRecipe, CurioError> {
        let input = require_input(input)?;
        self.structured(&EXTRACT_RECIPE, input).await
    }

    async fn discover_restaurants(&self, query: &str) -> Result<RestaurantDiscovery, CurioError> {
        let query = match query.trim() {
            "" => DEFAULT_DISCOVERY_QUERY,
            q => q,
        };
        self.structured(&DISCOVER_RESTAURANTS, query).await
    }
}

/// Resolves the API key from config or environment.
pub fn resolve_api_key(config_key: &Option<String>) -> Result<String, CurioError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        CurioError::Config(
            "Anthropic API key not found. Set anthropic.api_key in config or ANTHROPIC_API_KEY environment variable.".into(),
        )
    })
}
