// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Curio.
//!
//! Exposes the wishlist (through per-request optimistic controllers), the
//! swipe triage deck, the media/restaurant/recipe lists and AI enrichment
//! as a JSON API on axum.

pub mod auth;
pub mod enrich;
pub mod handlers;
pub mod library;
pub mod server;
pub mod triage;

pub use auth::{AuthConfig, CurrentUser};
pub use server::{GatewayState, ServerConfig, build_router, start_server};
