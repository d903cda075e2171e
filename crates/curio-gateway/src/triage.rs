// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Swipe triage over HTTP.
//!
//! Each identity gets one [`TriageSession`], built from the store on first
//! use and kept in memory. Commits leave the deck at once; the status write
//! runs in the background.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use curio_curation::triage::{Direction, Key, Release, TriageStep};
use curio_curation::{MutationActions, TriageDeck, TriageSession};

use crate::auth::CurrentUser;
use crate::handlers::ApiError;
use crate::server::GatewayState;

#[derive(Debug, Serialize)]
pub struct TriageResponse {
    #[serde(flatten)]
    pub step: TriageStep,
    pub kept: usize,
    pub passed: usize,
}

fn respond(session: &TriageSession, step: TriageStep) -> Json<TriageResponse> {
    Json(TriageResponse {
        step,
        kept: session.kept(),
        passed: session.passed(),
    })
}

/// Returns the caller's session, building a shuffled deck on first use.
async fn session(
    state: &GatewayState,
    user: &CurrentUser,
) -> Result<Arc<Mutex<TriageSession>>, ApiError> {
    let key = user.session_key();
    if let Some(existing) = state.decks.get(&key) {
        return Ok(existing.clone());
    }

    let items = state.store.fetch_wishlist().await?;
    let actions = Arc::new(MutationActions::new(
        state.store.clone(),
        Arc::new(user.clone()),
    ));
    let deck = {
        let mut rng = rand::thread_rng();
        TriageDeck::new(items, &state.triage, actions, &mut rng)
    };
    tracing::debug!(session = %key, cards = deck.remaining(), "triage session started");

    let created = Arc::new(Mutex::new(TriageSession::new(deck)));
    Ok(state.decks.entry(key).or_insert(created).clone())
}

/// GET /v1/triage
pub async fn get_deck(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<TriageResponse>, ApiError> {
    let session = session(&state, &user).await?;
    let session = session.lock().await;
    Ok(respond(&session, session.view()))
}

/// DELETE /v1/triage
///
/// Drops the caller's session. The next request starts a new shuffled deck.
pub async fn reset_deck(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
) -> StatusCode {
    state.decks.remove(&user.session_key());
    StatusCode::NO_CONTENT
}

/// POST /v1/triage/release
pub async fn post_release(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Json(release): Json<Release>,
) -> Result<Json<TriageResponse>, ApiError> {
    let session = session(&state, &user).await?;
    let mut session = session.lock().await;
    let step = session.release(release);
    Ok(respond(&session, step))
}

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
}

/// POST /v1/triage/key
///
/// Keys other than the left and right arrows change nothing.
pub async fn post_key(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<KeyRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let session = session(&state, &user).await?;
    let mut session = session.lock().await;
    let step = match body.key.parse::<Key>() {
        Ok(key) => session.key(key),
        Err(_) => session.view(),
    };
    Ok(respond(&session, step))
}

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub direction: Direction,
}

/// POST /v1/triage/swipe
///
/// Pass and keep buttons: commits without a gesture threshold.
pub async fn post_swipe(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<SwipeRequest>,
) -> Result<Json<TriageResponse>, ApiError> {
    let session = session(&state, &user).await?;
    let mut session = session.lock().await;
    let step = session.swipe(body.direction);
    Ok(respond(&session, step))
}
