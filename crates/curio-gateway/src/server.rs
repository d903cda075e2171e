// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use curio_core::{CurationStore, CurioError, EnrichmentAdapter};
use curio_curation::{TriageSession, TriageSettings, WishlistBoard};

use crate::auth::{AuthConfig, identity_middleware};
use crate::{enrich, handlers, library, triage};

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<dyn CurationStore>,
    /// `None` when no API key is configured; enrichment routes answer 503.
    pub enricher: Option<Arc<dyn EnrichmentAdapter>>,
    pub auth: AuthConfig,
    /// Live card controllers per identity. A mutation still in flight on
    /// one field group refuses the next request for that group.
    pub boards: Arc<DashMap<String, WishlistBoard>>,
    /// One triage session per identity (anonymous users share one).
    pub decks: Arc<DashMap<String, Arc<Mutex<TriageSession>>>>,
    pub triage: TriageSettings,
    /// Upper bound for the `under_budget` grid filter.
    pub budget_threshold: f64,
    pub health: HealthState,
}

impl GatewayState {
    pub fn new(store: Arc<dyn CurationStore>, auth: AuthConfig) -> Self {
        Self {
            store,
            enricher: None,
            auth,
            boards: Arc::new(DashMap::new()),
            decks: Arc::new(DashMap::new()),
            triage: TriageSettings::default(),
            budget_threshold: 50.0,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        }
    }

    pub fn with_enricher(mut self, enricher: Arc<dyn EnrichmentAdapter>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn with_triage(mut self, settings: TriageSettings) -> Self {
        self.triage = settings;
        self
    }

    pub fn with_budget_threshold(mut self, budget: f64) -> Self {
        self.budget_threshold = budget;
        self
    }
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Builds the full router.
///
/// - GET /health (no identity)
/// - /v1/wishlist, /v1/triage, /v1/media, /v1/restaurants, /v1/recipes
/// - /api/classify, /api/extract-recipe, /api/discover/restaurants
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route(
            "/v1/wishlist",
            get(handlers::list_wishlist).post(handlers::create_wishlist_item),
        )
        .route("/v1/wishlist/{id}/claim", post(handlers::claim_item))
        .route("/v1/wishlist/{id}/unclaim", post(handlers::unclaim_item))
        .route("/v1/wishlist/{id}/status", post(handlers::set_item_status))
        .route("/v1/wishlist/{id}/title", post(handlers::rename_item))
        .route("/v1/triage", get(triage::get_deck).delete(triage::reset_deck))
        .route("/v1/triage/release", post(triage::post_release))
        .route("/v1/triage/key", post(triage::post_key))
        .route("/v1/triage/swipe", post(triage::post_swipe))
        .route("/v1/media", get(library::list_media).post(library::create_media))
        .route("/v1/media/preview", post(enrich::preview_media))
        .route("/v1/media/{id}/status", post(library::set_media_status))
        .route(
            "/v1/restaurants",
            get(library::list_restaurants).post(library::create_restaurant),
        )
        .route(
            "/v1/restaurants/quick-add",
            post(library::quick_add_restaurant),
        )
        .route(
            "/v1/restaurants/{id}/status",
            post(library::set_restaurant_status),
        )
        .route(
            "/v1/recipes",
            get(library::list_recipes).post(library::create_recipe),
        )
        .route("/v1/recipes/extract", post(enrich::save_extracted_recipe))
        .route("/v1/recipes/{id}/rating", post(library::set_recipe_rating))
        .route("/api/classify", post(enrich::classify))
        .route("/api/extract-recipe", post(enrich::extract_recipe))
        .route("/api/discover/restaurants", post(enrich::discover_restaurants))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            identity_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds to the configured host:port and serves [`build_router`].
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), CurioError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CurioError::Gateway {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CurioError::Gateway {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
