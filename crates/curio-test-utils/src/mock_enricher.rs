// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock enrichment adapter for deterministic testing.
//!
//! `MockEnricher` implements `EnrichmentAdapter` without network access.
//! Each operation answers with a value derived from its input, or with a
//! pre-configured response when one has been queued.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use curio_core::models::{
    DEFAULT_DISCOVERY_QUERY, Difficulty, ExtractedRecipe, Ingredient, MediaClassification,
    RestaurantDiscovery, RestaurantSuggestion,
};
use curio_core::{AdapterType, CurioError, EnrichmentAdapter, HealthStatus, PluginAdapter};

use crate::fixtures;

#[derive(Default)]
pub struct MockEnricher {
    classifications: Mutex<VecDeque<MediaClassification>>,
    queries: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MockEnricher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a classification to return before falling back to the default.
    pub async fn push_classification(&self, classification: MediaClassification) {
        self.classifications.lock().await.push_back(classification);
    }

    /// Makes every call fail with an enrichment error.
    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Inputs received so far, in call order.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    async fn record(&self, input: &str) -> Result<(), CurioError> {
        self.queries.lock().await.push(input.to_string());
        if self.failing.load(Ordering::SeqCst) {
            return Err(CurioError::Enrichment {
                message: "mock enrichment failure".to_string(),
                source: None,
            });
        }
        Ok(())
    }
}

fn require_input(input: &str) -> Result<&str, CurioError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CurioError::InvalidInput("input is required".to_string()));
    }
    Ok(input)
}

#[async_trait]
impl PluginAdapter for MockEnricher {
    fn name(&self) -> &str {
        "mock-enricher"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Enrichment
    }

    async fn health_check(&self) -> Result<HealthStatus, CurioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CurioError> {
        Ok(())
    }
}

#[async_trait]
impl EnrichmentAdapter for MockEnricher {
    async fn classify_media(&self, input: &str) -> Result<MediaClassification, CurioError> {
        let input = require_input(input)?;
        self.record(input).await?;
        let queued = self.classifications.lock().await.pop_front();
        Ok(queued.unwrap_or_else(|| fixtures::classification(input)))
    }

    async fn extract_recipe(&self, input: &str) -> Result<ExtractedRecipe, CurioError> {
        let input = require_input(input)?;
        self.record(input).await?;
        Ok(ExtractedRecipe {
            title: format!("Recipe from {input}"),
            ingredients: vec![Ingredient {
                item: "flour".to_string(),
                amount: Some("200g".to_string()),
            }],
            method: "1. Mix.\n2. Bake.".to_string(),
            difficulty: Difficulty::Easy,
            summary: "Simple.".to_string(),
        })
    }

    async fn discover_restaurants(&self, query: &str) -> Result<RestaurantDiscovery, CurioError> {
        let query = match query.trim() {
            "" => DEFAULT_DISCOVERY_QUERY,
            q => q,
        };
        self.record(query).await?;
        Ok(RestaurantDiscovery {
            restaurants: vec![RestaurantSuggestion {
                name: "Bao".to_string(),
                location: "Soho".to_string(),
                cuisine: "Taiwanese".to_string(),
                price_range: "$$".to_string(),
                reason: format!("Matches \"{query}\""),
                booking_url: None,
            }],
            summary: "One pick.".to_string(),
        })
    }
}
