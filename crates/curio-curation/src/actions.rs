// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Named wishlist mutations.
//!
//! Each action performs exactly one store update and reports the result as a
//! plain `bool`. Store errors are logged here and never propagated; callers
//! only need to know whether to keep or roll back their local state.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tracing::{debug, warn};

use curio_core::models::{LifecycleStatus, WishlistPatch, purchase};
use curio_core::{CurationStore, Identity, IdentityProvider};

/// A change on the status field group.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusChange {
    /// Lifecycle to `Archived`. Purchase status is untouched.
    Archive,
    /// Lifecycle to `Active` and purchase status back to `Unpurchased`.
    Reactivate,
    /// Purchase status to `Purchased`. Lifecycle is untouched.
    MarkPurchased,
}

impl StatusChange {
    /// The single patch that carries every field this change writes.
    pub fn patch(self) -> WishlistPatch {
        match self {
            StatusChange::Archive => WishlistPatch::default().status(LifecycleStatus::Archived),
            StatusChange::Reactivate => WishlistPatch::default()
                .status(LifecycleStatus::Active)
                .purchase_status(purchase::UNPURCHASED),
            StatusChange::MarkPurchased => {
                WishlistPatch::default().purchase_status(purchase::PURCHASED)
            }
        }
    }
}

/// Outcome of a triage swipe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SwipeAction {
    Pass,
    Keep,
}

impl SwipeAction {
    pub fn status(self) -> LifecycleStatus {
        match self {
            SwipeAction::Pass => LifecycleStatus::Archived,
            SwipeAction::Keep => LifecycleStatus::Active,
        }
    }
}

/// The mutation seam the controllers depend on.
#[async_trait]
pub trait ItemMutations: Send + Sync {
    /// Claims the item for the current identity.
    async fn claim(&self, id: &str) -> bool;

    /// Clears the claimant.
    async fn unclaim(&self, id: &str) -> bool;

    async fn set_status(&self, id: &str, change: StatusChange) -> bool;

    /// Writes the lifecycle status a swipe maps to.
    async fn tag(&self, id: &str, action: SwipeAction) -> bool;

    /// Writes the trimmed title.
    async fn rename(&self, id: &str, title: &str) -> bool;
}

/// [`ItemMutations`] backed by a [`CurationStore`].
pub struct MutationActions {
    store: Arc<dyn CurationStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl MutationActions {
    pub fn new(store: Arc<dyn CurationStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self { store, identity }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.identity.current_identity()
    }

    async fn write(&self, action: &'static str, id: &str, patch: WishlistPatch) -> bool {
        match self.store.update_wishlist_item(id, &patch).await {
            Ok(()) => {
                debug!(item_id = id, action, "mutation applied");
                true
            }
            Err(e) => {
                warn!(item_id = id, action, error = %e, "mutation failed");
                false
            }
        }
    }
}

#[async_trait]
impl ItemMutations for MutationActions {
    async fn claim(&self, id: &str) -> bool {
        let Some(identity) = self.identity.current_identity() else {
            warn!(item_id = id, "claim refused: no signed-in identity");
            return false;
        };
        self.write("claim", id, WishlistPatch::default().claim(identity.email))
            .await
    }

    async fn unclaim(&self, id: &str) -> bool {
        if self.identity.current_identity().is_none() {
            warn!(item_id = id, "unclaim refused: no signed-in identity");
            return false;
        }
        self.write("unclaim", id, WishlistPatch::default().unclaim())
            .await
    }

    async fn set_status(&self, id: &str, change: StatusChange) -> bool {
        self.write("set_status", id, change.patch()).await
    }

    async fn tag(&self, id: &str, action: SwipeAction) -> bool {
        self.write("tag", id, WishlistPatch::default().status(action.status()))
            .await
    }

    async fn rename(&self, id: &str, title: &str) -> bool {
        self.write("rename", id, WishlistPatch::default().name(title.trim()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_test_utils::{MemoryStore, fixtures};
    use curio_core::StaticIdentity;

    fn actions(store: &Arc<MemoryStore>, identity: StaticIdentity) -> MutationActions {
        MutationActions::new(store.clone(), Arc::new(identity))
    }

    #[tokio::test]
    async fn claim_writes_identity_email() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("42")]));
        let ok = actions(&store, StaticIdentity::user("a@x.com"))
            .claim("42")
            .await;
        assert!(ok);
        assert_eq!(
            store.wishlist_item("42").unwrap().claimed_by.as_deref(),
            Some("a@x.com")
        );
    }

    #[tokio::test]
    async fn claim_without_identity_never_reaches_the_store() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("42")]));
        let ok = actions(&store, StaticIdentity::anonymous()).claim("42").await;
        assert!(!ok);
        assert_eq!(store.update_calls(), 0);
    }

    #[tokio::test]
    #[tracing_test::traced_test]
    async fn store_failure_becomes_false() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("42")]));
        store.fail_updates(true);
        let ok = actions(&store, StaticIdentity::user("a@x.com"))
            .set_status("42", StatusChange::Archive)
            .await;
        assert!(!ok);
        assert_eq!(store.update_calls(), 1);
        assert!(logs_contain("mutation failed"));
    }

    #[tokio::test]
    async fn missing_item_becomes_false() {
        let store = Arc::new(MemoryStore::default());
        let ok = actions(&store, StaticIdentity::user("a@x.com"))
            .rename("missing", "New")
            .await;
        assert!(!ok);
    }

    #[tokio::test]
    async fn reactivate_resets_both_status_fields_in_one_write() {
        let mut item = fixtures::item("7");
        item.status = LifecycleStatus::Archived;
        item.purchase_status = purchase::PURCHASED.into();
        let store = Arc::new(MemoryStore::with_wishlist(vec![item]));

        let ok = actions(&store, StaticIdentity::anonymous())
            .set_status("7", StatusChange::Reactivate)
            .await;
        assert!(ok);
        assert_eq!(store.update_calls(), 1);
        let item = store.wishlist_item("7").unwrap();
        assert_eq!(item.status, LifecycleStatus::Active);
        assert_eq!(item.purchase_status, purchase::UNPURCHASED);
    }

    #[tokio::test]
    async fn tag_maps_swipes_to_status() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![
            fixtures::item("1"),
            fixtures::item("2"),
        ]));
        let actions = actions(&store, StaticIdentity::anonymous());
        assert!(actions.tag("1", SwipeAction::Pass).await);
        assert!(actions.tag("2", SwipeAction::Keep).await);
        assert!(store.wishlist_item("1").unwrap().is_archived());
        assert!(!store.wishlist_item("2").unwrap().is_archived());
    }

    #[tokio::test]
    async fn rename_writes_trimmed_title() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("3")]));
        assert!(
            actions(&store, StaticIdentity::anonymous())
                .rename("3", "  Brass Lamp ")
                .await
        );
        assert_eq!(store.wishlist_item("3").unwrap().name, "Brass Lamp");
    }

    #[test]
    fn status_change_wire_names() {
        assert_eq!(
            serde_json::from_str::<StatusChange>("\"mark_purchased\"").unwrap(),
            StatusChange::MarkPurchased
        );
        assert_eq!(StatusChange::Archive.to_string(), "archive");
    }
}
