// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! AI enrichment handlers.
//!
//! Missing input is a 400. Upstream failures are a 500 with an error body.
//! Without a configured enricher every route answers 503.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use curio_core::EnrichmentAdapter;
use curio_core::models::{
    ExtractedRecipe, MediaClassification, NewMediaItem, RestaurantDiscovery,
};

use crate::handlers::{ApiError, CreatedResponse, ErrorResponse};
use crate::server::GatewayState;

#[derive(Debug, Default, Deserialize)]
pub struct InputRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: String,
}

fn enricher(state: &GatewayState) -> Result<Arc<dyn EnrichmentAdapter>, Response> {
    state.enricher.clone().ok_or_else(|| {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "enrichment is not configured".to_string(),
            }),
        )
            .into_response()
    })
}

fn require_input(input: &str) -> Result<(), Response> {
    if input.trim().is_empty() {
        return Err(ApiError::bad_request("Missing input").into_response());
    }
    Ok(())
}

/// POST /api/classify
pub async fn classify(
    State(state): State<GatewayState>,
    Json(body): Json<InputRequest>,
) -> Result<Json<MediaClassification>, Response> {
    require_input(&body.input)?;
    let enricher = enricher(&state)?;
    enricher
        .classify_media(&body.input)
        .await
        .map(Json)
        .map_err(|e| ApiError(e).into_response())
}

/// POST /api/extract-recipe
pub async fn extract_recipe(
    State(state): State<GatewayState>,
    Json(body): Json<InputRequest>,
) -> Result<Json<ExtractedRecipe>, Response> {
    require_input(&body.input)?;
    let enricher = enricher(&state)?;
    enricher
        .extract_recipe(&body.input)
        .await
        .map(Json)
        .map_err(|e| ApiError(e).into_response())
}

/// POST /api/discover/restaurants
///
/// An empty query is allowed; the enricher substitutes its default.
pub async fn discover_restaurants(
    State(state): State<GatewayState>,
    Json(body): Json<QueryRequest>,
) -> Result<Json<RestaurantDiscovery>, Response> {
    let enricher = enricher(&state)?;
    enricher
        .discover_restaurants(&body.query)
        .await
        .map(Json)
        .map_err(|e| ApiError(e).into_response())
}

/// POST /v1/media/preview
///
/// Classifies the input and returns the library entry it would become.
/// Nothing is stored; the client posts the (possibly edited) entry to
/// `/v1/media`.
pub async fn preview_media(
    State(state): State<GatewayState>,
    Json(body): Json<InputRequest>,
) -> Result<Json<NewMediaItem>, Response> {
    require_input(&body.input)?;
    let enricher = enricher(&state)?;
    let classification = enricher
        .classify_media(&body.input)
        .await
        .map_err(|e| ApiError(e).into_response())?;
    Ok(Json(classification.into_new_media(&body.input)))
}

/// POST /v1/recipes/extract
///
/// Extracts a recipe from the input and stores it with the input as its
/// source.
pub async fn save_extracted_recipe(
    State(state): State<GatewayState>,
    Json(body): Json<InputRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), Response> {
    require_input(&body.input)?;
    let enricher = enricher(&state)?;
    let source = body.input.trim().to_string();
    let recipe = enricher
        .extract_recipe(&source)
        .await
        .map_err(|e| ApiError(e).into_response())?
        .into_new_recipe(Some(source));
    let id = state
        .store
        .insert_recipe(&recipe)
        .await
        .map_err(|e| ApiError(e).into_response())?;
    tracing::info!(recipe_id = %id, title = %recipe.title, "extracted recipe saved");
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}
