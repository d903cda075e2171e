// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source of the current user's identity.

use crate::types::Identity;

/// Supplies the nullable identity of whoever is acting.
///
/// Claiming and unclaiming are refused when this returns `None`.
pub trait IdentityProvider: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;
}

/// A fixed identity, resolved once (per request or per session).
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<Identity>);

impl StaticIdentity {
    pub fn anonymous() -> Self {
        Self(None)
    }

    pub fn user(email: impl Into<String>) -> Self {
        Self(Some(Identity::new(email)))
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.0.clone()
    }
}
