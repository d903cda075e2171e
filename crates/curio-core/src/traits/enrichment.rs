// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Enrichment adapter trait for AI-assisted structuring of free text or URLs.

use async_trait::async_trait;

use crate::error::CurioError;
use crate::models::{ExtractedRecipe, MediaClassification, RestaurantDiscovery};
use crate::traits::adapter::PluginAdapter;

/// Adapter for the AI enrichment endpoint.
///
/// Every call is a single request/response against a fixed output schema.
/// Implementations do not retry.
#[async_trait]
pub trait EnrichmentAdapter: PluginAdapter {
    /// Classifies free text or a URL as a book, movie or TV show.
    async fn classify_media(&self, input: &str) -> Result<MediaClassification, CurioError>;

    /// Extracts a structured recipe from free text or a URL.
    async fn extract_recipe(&self, input: &str) -> Result<ExtractedRecipe, CurioError>;

    /// Suggests restaurants for a query. An empty query uses a default prompt.
    async fn discover_restaurants(&self, query: &str) -> Result<RestaurantDiscovery, CurioError>;
}
