// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health and wishlist handlers, plus the shared error response.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use curio_core::CurioError;
use curio_core::models::{NewWishlistItem, WishlistItem};
use curio_curation::views::{self, GridFilter, SortOrder, WishlistView};
use curio_curation::{
    ItemController, MutationActions, MutationOutcome, Refusal, StatusChange, WishlistBoard,
};

use crate::auth::CurrentUser;
use crate::server::GatewayState;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// A [`CurioError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub CurioError);

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(CurioError::InvalidInput(message.into()))
    }
}

impl From<CurioError> for ApiError {
    fn from(err: CurioError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CurioError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CurioError::NotFound { .. } => StatusCode::NOT_FOUND,
            CurioError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    pub uptime_secs: u64,
    pub store: String,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let store = match state.store.health_check().await {
        Ok(health) => format!("{health:?}").to_lowercase(),
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            "unreachable".to_string()
        }
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
        store,
    })
}

/// Query for GET /v1/wishlist. Every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct WishlistQuery {
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
}

impl WishlistQuery {
    fn parse(&self, budget: f64) -> Result<(WishlistView, GridFilter, SortOrder), ApiError> {
        let view = match self.view.as_deref() {
            None | Some("") => WishlistView::default(),
            Some(v) => v
                .parse()
                .map_err(|_| ApiError::bad_request(format!("unknown view: {v}")))?,
        };
        let filter = match self.filter.as_deref() {
            None => GridFilter::All,
            Some(f) => GridFilter::parse(f, budget)
                .ok_or_else(|| ApiError::bad_request(format!("unknown filter: {f}")))?,
        };
        let sort = match self.sort.as_deref() {
            None | Some("") => SortOrder::default(),
            Some(s) => s
                .parse()
                .map_err(|_| ApiError::bad_request(format!("unknown sort: {s}")))?,
        };
        Ok((view, filter, sort))
    }
}

/// One card in the wishlist grid.
#[derive(Debug, Serialize)]
pub struct WishlistEntry {
    #[serde(flatten)]
    pub item: WishlistItem,
    /// Purchased item shown outside the archive views.
    pub deemphasized: bool,
    pub can_claim: bool,
    pub can_unclaim: bool,
    /// Status actions offered in the card menu.
    pub actions: Vec<StatusChange>,
}

#[derive(Debug, Serialize)]
pub struct WishlistResponse {
    pub view: WishlistView,
    pub sort: SortOrder,
    pub items: Vec<WishlistEntry>,
}

fn actions_for(state: &GatewayState, user: &CurrentUser) -> Arc<MutationActions> {
    Arc::new(MutationActions::new(
        state.store.clone(),
        Arc::new(user.clone()),
    ))
}

/// Merges `items` into the caller's board, creating it on first use.
fn with_board<T>(
    state: &GatewayState,
    user: &CurrentUser,
    items: Vec<WishlistItem>,
    f: impl FnOnce(&WishlistBoard) -> T,
) -> T {
    let mut board = state
        .boards
        .entry(user.session_key())
        .or_insert_with(|| {
            WishlistBoard::new(Vec::new(), actions_for(state, user), user.0.clone())
        });
    board.sync(items);
    f(&board)
}

/// GET /v1/wishlist?view=&filter=&sort=
pub async fn list_wishlist(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<WishlistQuery>,
) -> Result<Json<WishlistResponse>, ApiError> {
    let (view, filter, sort) = query.parse(state.budget_threshold)?;
    let items = state.store.fetch_wishlist().await?;

    let entries: Vec<WishlistEntry> = with_board(&state, &user, items, |board| {
        board
            .render(view, filter, sort)
            .into_iter()
            .filter_map(|item| {
                let controller = board.get(&item.id)?;
                Some(WishlistEntry {
                    deemphasized: views::is_deemphasized(&item, view),
                    can_claim: controller.can_claim(),
                    can_unclaim: controller.can_unclaim(),
                    actions: controller.available_actions(view),
                    item,
                })
            })
            .collect()
    });

    Ok(Json(WishlistResponse {
        view,
        sort,
        items: entries,
    }))
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// POST /v1/wishlist
pub async fn create_wishlist_item(
    State(state): State<GatewayState>,
    Json(body): Json<NewWishlistItem>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("name is required"));
    }
    let id = state.store.insert_wishlist_item(&body).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Response body for wishlist mutations.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// `true` when the item now holds the requested value.
    pub ok: bool,
    #[serde(flatten)]
    pub outcome: MutationOutcome,
    /// The item as the caller should now display it.
    pub item: WishlistItem,
}

impl MutationResponse {
    fn new(outcome: MutationOutcome, item: WishlistItem) -> Self {
        let ok = matches!(
            outcome,
            MutationOutcome::Committed | MutationOutcome::Refused(Refusal::Unchanged)
        );
        Self { ok, outcome, item }
    }
}

/// Revalidates the caller's board and returns the live controller for `id`.
///
/// Pending field groups survive the revalidation, so a second mutation on
/// the same group is refused with [`Refusal::InFlight`].
async fn controller(
    state: &GatewayState,
    user: &CurrentUser,
    id: &str,
) -> Result<Arc<ItemController>, ApiError> {
    let items = state.store.fetch_wishlist().await?;
    if !items.iter().any(|item| item.id == id) {
        return Err(CurioError::not_found("wishlist item", id).into());
    }
    with_board(state, user, items, |board| board.get(id))
        .ok_or_else(|| CurioError::not_found("wishlist item", id).into())
}

/// POST /v1/wishlist/{id}/claim
pub async fn claim_item(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let controller = controller(&state, &user, &id).await?;
    let outcome = controller.claim().await;
    Ok(Json(MutationResponse::new(outcome, controller.snapshot())))
}

/// POST /v1/wishlist/{id}/unclaim
pub async fn unclaim_item(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<Json<MutationResponse>, ApiError> {
    let controller = controller(&state, &user, &id).await?;
    let outcome = controller.unclaim().await;
    Ok(Json(MutationResponse::new(outcome, controller.snapshot())))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub change: StatusChange,
}

/// POST /v1/wishlist/{id}/status
pub async fn set_item_status(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let controller = controller(&state, &user, &id).await?;
    let outcome = controller.set_status(body.change).await;
    Ok(Json(MutationResponse::new(outcome, controller.snapshot())))
}

#[derive(Debug, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

/// POST /v1/wishlist/{id}/title
pub async fn rename_item(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<TitleRequest>,
) -> Result<Json<MutationResponse>, ApiError> {
    let controller = controller(&state, &user, &id).await?;
    let outcome = controller.rename(&body.title).await;
    if outcome == MutationOutcome::Refused(Refusal::EmptyTitle) {
        return Err(ApiError::bad_request("title must not be empty"));
    }
    Ok(Json(MutationResponse::new(outcome, controller.snapshot())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_follows_error_kind() {
        let resp = ApiError::bad_request("nope").into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError(CurioError::not_found("wishlist item", "1")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let resp = ApiError(CurioError::Enrichment {
            message: "down".into(),
            source: None,
        })
        .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn query_defaults_to_active_newest_first() {
        let (view, filter, sort) = WishlistQuery::default().parse(50.0).unwrap();
        assert_eq!(view, WishlistView::Active);
        assert_eq!(filter, GridFilter::All);
        assert_eq!(sort, SortOrder::DateAdded);
    }

    #[test]
    fn query_rejects_unknown_names() {
        let query = WishlistQuery {
            sort: Some("random".into()),
            ..Default::default()
        };
        assert!(query.parse(50.0).is_err());
    }

    #[test]
    fn unchanged_rename_counts_as_ok() {
        let item = curio_test_utils::fixtures::item("1");
        let resp = MutationResponse::new(MutationOutcome::Refused(Refusal::Unchanged), item.clone());
        assert!(resp.ok);
        let resp = MutationResponse::new(MutationOutcome::RolledBack, item);
        assert!(!resp.ok);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["outcome"], "rolled_back");
    }
}
