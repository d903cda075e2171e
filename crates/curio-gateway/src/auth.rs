// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bearer-token identity resolution for the gateway.
//!
//! Each configured token maps to one identity. A request with a known
//! `Authorization: Bearer <token>` header acts as that identity; any other
//! request is served anonymously, so reads still work and claims are
//! refused further down.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use curio_config::model::GatewayUser;
use curio_core::{Identity, IdentityProvider};

/// Token to identity table.
#[derive(Clone, Default)]
pub struct AuthConfig {
    users: Arc<HashMap<String, Identity>>,
}

impl AuthConfig {
    pub fn from_users(users: &[GatewayUser]) -> Self {
        let users = users
            .iter()
            .map(|u| (u.token.clone(), Identity::new(u.email.clone())))
            .collect();
        Self {
            users: Arc::new(users),
        }
    }

    pub fn resolve(&self, token: &str) -> Option<Identity> {
        self.users.get(token).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("users", &self.users.len())
            .field("tokens", &"[redacted]")
            .finish()
    }
}

/// The identity a request acts as, inserted as a request extension.
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    /// Key for per-user state such as triage decks.
    pub fn session_key(&self) -> String {
        match &self.0 {
            Some(identity) => identity.email.clone(),
            None => "anonymous".to_string(),
        }
    }
}

impl IdentityProvider for CurrentUser {
    fn current_identity(&self) -> Option<Identity> {
        self.0.clone()
    }
}

/// Middleware that resolves the bearer token into a [`CurrentUser`].
///
/// Never rejects: an unknown or missing token yields an anonymous user.
pub async fn identity_middleware(
    State(auth): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let identity = token.and_then(|t| auth.resolve(t));
    if token.is_some() && identity.is_none() {
        tracing::debug!("unknown bearer token, serving anonymously");
    }

    request.extensions_mut().insert(CurrentUser(identity));
    next.run(request).await
}
