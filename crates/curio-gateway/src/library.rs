// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media, restaurant and recipe handlers.
//!
//! These lists have no optimistic layer: each request is a direct store
//! call and the response reflects the stored result.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use curio_core::models::{
    MediaItem, MediaStatus, NewMediaItem, NewRecipe, NewRestaurant, Recipe, Restaurant,
    RestaurantStatus, RestaurantSuggestion,
};

use crate::handlers::{ApiError, CreatedResponse};
use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

fn require_name(value: &str, field: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} is required")));
    }
    Ok(())
}

/// GET /v1/media
pub async fn list_media(State(state): State<GatewayState>) -> Result<Json<Vec<MediaItem>>, ApiError> {
    Ok(Json(state.store.fetch_media().await?))
}

/// POST /v1/media
pub async fn create_media(
    State(state): State<GatewayState>,
    Json(body): Json<NewMediaItem>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    require_name(&body.title, "title")?;
    let id = state.store.insert_media(&body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[derive(Debug, Deserialize)]
pub struct MediaStatusRequest {
    pub status: MediaStatus,
}

/// POST /v1/media/{id}/status
pub async fn set_media_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<MediaStatusRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state.store.update_media_status(&id, body.status).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /v1/restaurants
pub async fn list_restaurants(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    Ok(Json(state.store.fetch_restaurants().await?))
}

/// POST /v1/restaurants
pub async fn create_restaurant(
    State(state): State<GatewayState>,
    Json(body): Json<NewRestaurant>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    require_name(&body.name, "name")?;
    let id = state.store.insert_restaurant(&body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// POST /v1/restaurants/quick-add
///
/// Stores a discovery suggestion as a `wishlist` restaurant, keeping the
/// recommendation reason as its review.
pub async fn quick_add_restaurant(
    State(state): State<GatewayState>,
    Json(body): Json<RestaurantSuggestion>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    require_name(&body.name, "name")?;
    let id = state
        .store
        .insert_restaurant(&body.into_new_restaurant())
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[derive(Debug, Deserialize)]
pub struct RestaurantStatusRequest {
    pub status: RestaurantStatus,
}

/// POST /v1/restaurants/{id}/status
pub async fn set_restaurant_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<RestaurantStatusRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state.store.update_restaurant_status(&id, body.status).await?;
    Ok(Json(OkResponse { ok: true }))
}

/// GET /v1/recipes
pub async fn list_recipes(State(state): State<GatewayState>) -> Result<Json<Vec<Recipe>>, ApiError> {
    Ok(Json(state.store.fetch_recipes().await?))
}

/// POST /v1/recipes
pub async fn create_recipe(
    State(state): State<GatewayState>,
    Json(body): Json<NewRecipe>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    require_name(&body.title, "title")?;
    let id = state.store.insert_recipe(&body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    /// `null` clears the rating.
    pub rating: Option<u8>,
}

/// POST /v1/recipes/{id}/rating
pub async fn set_recipe_rating(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<RatingRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state.store.update_recipe_rating(&id, body.rating).await?;
    Ok(Json(OkResponse { ok: true }))
}
