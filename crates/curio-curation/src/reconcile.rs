// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optimistic reconciliation for a single wishlist card.
//!
//! An [`ItemController`] owns the locally displayed copy of one item. Each
//! mutation moves one field group from `Settled` to `Pending`, applying the
//! new value at once, and back to `Settled` when the remote write reports:
//! success keeps the optimistic value, failure restores the captured one.
//!
//! Groups are independent. A claim and an archive on the same card may be in
//! flight together and finish in either order; a second mutation on a group
//! that is already pending is refused.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use strum::Display;
use tracing::{debug, warn};

use curio_core::Identity;
use curio_core::models::{LifecycleStatus, WishlistItem, purchase};

use crate::actions::{ItemMutations, StatusChange};
use crate::views::WishlistView;

static NEXT_MUTATION_ID: AtomicU64 = AtomicU64::new(1);

/// Independently serialized slices of an item's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldGroup {
    /// `claimed_by`
    Claim,
    /// `status` and `purchase_status`
    Status,
    /// `name`
    Title,
}

/// Values captured before an optimistic write, restored on rollback.
#[derive(Debug, Clone, PartialEq)]
pub enum Captured {
    Claim(Option<String>),
    Status {
        status: LifecycleStatus,
        purchase_status: String,
    },
    Title(String),
}

impl Captured {
    fn take(group: FieldGroup, item: &WishlistItem) -> Self {
        match group {
            FieldGroup::Claim => Captured::Claim(item.claimed_by.clone()),
            FieldGroup::Status => Captured::Status {
                status: item.status,
                purchase_status: item.purchase_status.clone(),
            },
            FieldGroup::Title => Captured::Title(item.name.clone()),
        }
    }

    fn restore(self, item: &mut WishlistItem) {
        match self {
            Captured::Claim(claimed_by) => item.claimed_by = claimed_by,
            Captured::Status {
                status,
                purchase_status,
            } => {
                item.status = status;
                item.purchase_status = purchase_status;
            }
            Captured::Title(name) => item.name = name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldState {
    #[default]
    Settled,
    Pending {
        previous: Captured,
        mutation_id: u64,
    },
}

impl FieldState {
    pub fn is_pending(&self) -> bool {
        matches!(self, FieldState::Pending { .. })
    }
}

/// The remote call a pending mutation is waiting on.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationKind {
    Claim,
    Unclaim,
    Status(StatusChange),
    Rename(String),
}

impl MutationKind {
    pub fn group(&self) -> FieldGroup {
        match self {
            MutationKind::Claim | MutationKind::Unclaim => FieldGroup::Claim,
            MutationKind::Status(_) => FieldGroup::Status,
            MutationKind::Rename(_) => FieldGroup::Title,
        }
    }
}

/// Token for a mutation that has been applied locally but not yet settled.
///
/// Pass it to [`ItemController::finish`] exactly once.
#[derive(Debug)]
#[must_use = "a pending mutation must be finished or the field group stays busy"]
pub struct PendingMutation {
    item_id: String,
    kind: MutationKind,
    mutation_id: u64,
}

impl PendingMutation {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn kind(&self) -> &MutationKind {
        &self.kind
    }
}

/// Why a mutation was not started. Nothing changes locally or remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Refusal {
    NoIdentity,
    NotClaimant,
    AlreadyClaimed,
    InFlight,
    Unchanged,
    EmptyTitle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum MutationOutcome {
    Committed,
    RolledBack,
    Refused(Refusal),
    /// The token did not match the pending mutation. Nothing changed.
    Stale,
}

impl MutationOutcome {
    pub fn is_committed(self) -> bool {
        self == MutationOutcome::Committed
    }
}

#[derive(Debug)]
struct ControllerState {
    item: WishlistItem,
    claim: FieldState,
    status: FieldState,
    title: FieldState,
}

impl ControllerState {
    fn group(&self, group: FieldGroup) -> &FieldState {
        match group {
            FieldGroup::Claim => &self.claim,
            FieldGroup::Status => &self.status,
            FieldGroup::Title => &self.title,
        }
    }

    fn group_mut(&mut self, group: FieldGroup) -> &mut FieldState {
        match group {
            FieldGroup::Claim => &mut self.claim,
            FieldGroup::Status => &mut self.status,
            FieldGroup::Title => &mut self.title,
        }
    }
}

/// Per-card state holder.
pub struct ItemController {
    identity: Option<Identity>,
    mutations: Arc<dyn ItemMutations>,
    state: Mutex<ControllerState>,
}

impl ItemController {
    pub fn new(
        item: WishlistItem,
        mutations: Arc<dyn ItemMutations>,
        identity: Option<Identity>,
    ) -> Self {
        Self {
            identity,
            mutations,
            state: Mutex::new(ControllerState {
                item,
                claim: FieldState::Settled,
                status: FieldState::Settled,
                title: FieldState::Settled,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn id(&self) -> String {
        self.lock().item.id.clone()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The item as currently displayed, optimistic values included.
    pub fn snapshot(&self) -> WishlistItem {
        self.lock().item.clone()
    }

    pub fn field_state(&self, group: FieldGroup) -> FieldState {
        self.lock().group(group).clone()
    }

    /// Whether the control for `group` should be disabled.
    pub fn is_busy(&self, group: FieldGroup) -> bool {
        self.lock().group(group).is_pending()
    }

    pub fn can_claim(&self) -> bool {
        let state = self.lock();
        self.identity.is_some() && !state.claim.is_pending() && !state.item.is_claimed()
    }

    /// Only the current claimant is offered unclaim.
    pub fn can_unclaim(&self) -> bool {
        let state = self.lock();
        match &self.identity {
            Some(identity) => {
                !state.claim.is_pending() && state.item.is_claimed_by(&identity.email)
            }
            None => false,
        }
    }

    /// Status actions offered in the card menu for `view`.
    ///
    /// Anonymous viewers get no menu. Outside the archive views an unpurchased
    /// item offers "mark purchased", and every item offers "archive". Archive
    /// views and purchased items offer "reactivate".
    pub fn available_actions(&self, view: WishlistView) -> Vec<StatusChange> {
        if self.identity.is_none() {
            return Vec::new();
        }
        let state = self.lock();
        let purchased = state.item.is_purchased();
        let archive_view = view.is_archive();

        let mut actions = Vec::new();
        if !archive_view && !purchased {
            actions.push(StatusChange::MarkPurchased);
        }
        if !archive_view {
            actions.push(StatusChange::Archive);
        }
        if archive_view || purchased {
            actions.push(StatusChange::Reactivate);
        }
        actions
    }

    fn begin(
        &self,
        kind: MutationKind,
        check: impl FnOnce(&WishlistItem) -> Result<(), Refusal>,
        apply: impl FnOnce(&mut WishlistItem),
    ) -> Result<PendingMutation, Refusal> {
        let group = kind.group();
        let mut state = self.lock();
        if state.group(group).is_pending() {
            return Err(Refusal::InFlight);
        }
        check(&state.item)?;

        let previous = Captured::take(group, &state.item);
        let mutation_id = NEXT_MUTATION_ID.fetch_add(1, Ordering::Relaxed);
        apply(&mut state.item);
        *state.group_mut(group) = FieldState::Pending {
            previous,
            mutation_id,
        };

        Ok(PendingMutation {
            item_id: state.item.id.clone(),
            kind,
            mutation_id,
        })
    }

    pub fn begin_claim(&self) -> Result<PendingMutation, Refusal> {
        let email = self.identity.as_ref().ok_or(Refusal::NoIdentity)?.email.clone();
        self.begin(
            MutationKind::Claim,
            |item| {
                if item.is_claimed() {
                    Err(Refusal::AlreadyClaimed)
                } else {
                    Ok(())
                }
            },
            |item| item.claimed_by = Some(email),
        )
    }

    pub fn begin_unclaim(&self) -> Result<PendingMutation, Refusal> {
        let email = self.identity.as_ref().ok_or(Refusal::NoIdentity)?.email.clone();
        self.begin(
            MutationKind::Unclaim,
            |item| {
                if item.is_claimed_by(&email) {
                    Ok(())
                } else {
                    Err(Refusal::NotClaimant)
                }
            },
            |item| item.claimed_by = None,
        )
    }

    pub fn begin_status(&self, change: StatusChange) -> Result<PendingMutation, Refusal> {
        self.begin(
            MutationKind::Status(change),
            |_| Ok(()),
            |item| match change {
                StatusChange::Archive => item.status = LifecycleStatus::Archived,
                StatusChange::Reactivate => {
                    item.status = LifecycleStatus::Active;
                    item.purchase_status = purchase::UNPURCHASED.to_string();
                }
                StatusChange::MarkPurchased => {
                    item.purchase_status = purchase::PURCHASED.to_string();
                }
            },
        )
    }

    /// Starts a rename to the trimmed `title`. Renaming to the current name
    /// is refused as [`Refusal::Unchanged`] so no remote call is made.
    pub fn begin_rename(&self, title: &str) -> Result<PendingMutation, Refusal> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Refusal::EmptyTitle);
        }
        let applied = title.clone();
        self.begin(
            MutationKind::Rename(title.clone()),
            |item| {
                if item.name.trim() == title {
                    Err(Refusal::Unchanged)
                } else {
                    Ok(())
                }
            },
            |item| item.name = applied,
        )
    }

    /// Settles a pending mutation: keep the optimistic value on success,
    /// restore the captured value on failure.
    pub fn finish(&self, token: PendingMutation, success: bool) -> MutationOutcome {
        let group = token.kind.group();
        let mut state = self.lock();

        let current = std::mem::take(state.group_mut(group));
        let previous = match current {
            FieldState::Pending {
                previous,
                mutation_id,
            } if mutation_id == token.mutation_id => previous,
            other => {
                // Not ours; put it back untouched.
                *state.group_mut(group) = other;
                warn!(
                    item_id = %token.item_id,
                    %group,
                    "finish called with a token this controller does not hold"
                );
                return MutationOutcome::Stale;
            }
        };

        if success {
            debug!(item_id = %token.item_id, %group, "optimistic update committed");
            MutationOutcome::Committed
        } else {
            previous.restore(&mut state.item);
            warn!(item_id = %token.item_id, %group, "remote update failed, rolled back");
            MutationOutcome::RolledBack
        }
    }

    async fn run(&self, begun: Result<PendingMutation, Refusal>) -> MutationOutcome {
        let token = match begun {
            Ok(token) => token,
            Err(refusal) => return MutationOutcome::Refused(refusal),
        };

        let id = token.item_id.as_str();
        let success = match &token.kind {
            MutationKind::Claim => self.mutations.claim(id).await,
            MutationKind::Unclaim => self.mutations.unclaim(id).await,
            MutationKind::Status(change) => self.mutations.set_status(id, *change).await,
            MutationKind::Rename(title) => self.mutations.rename(id, title).await,
        };
        self.finish(token, success)
    }

    pub async fn claim(&self) -> MutationOutcome {
        self.run(self.begin_claim()).await
    }

    pub async fn unclaim(&self) -> MutationOutcome {
        self.run(self.begin_unclaim()).await
    }

    pub async fn set_status(&self, change: StatusChange) -> MutationOutcome {
        self.run(self.begin_status(change)).await
    }

    pub async fn archive(&self) -> MutationOutcome {
        self.set_status(StatusChange::Archive).await
    }

    pub async fn reactivate(&self) -> MutationOutcome {
        self.set_status(StatusChange::Reactivate).await
    }

    pub async fn mark_purchased(&self) -> MutationOutcome {
        self.set_status(StatusChange::MarkPurchased).await
    }

    pub async fn rename(&self, title: &str) -> MutationOutcome {
        self.run(self.begin_rename(title)).await
    }

    /// Accepts a fresh copy from the store.
    ///
    /// Settled groups take the incoming values. Pending groups keep their
    /// optimistic value so an in-flight mutation is not visually undone.
    pub fn sync_from_store(&self, incoming: WishlistItem) {
        let mut state = self.lock();
        let mut next = incoming;
        if state.claim.is_pending() {
            next.claimed_by = state.item.claimed_by.clone();
        }
        if state.status.is_pending() {
            next.status = state.item.status;
            next.purchase_status = state.item.purchase_status.clone();
        }
        if state.title.is_pending() {
            next.name = state.item.name.clone();
        }
        state.item = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MutationActions;
    use curio_core::StaticIdentity;
    use curio_test_utils::{MemoryStore, fixtures};

    fn controller(
        store: &Arc<MemoryStore>,
        item: WishlistItem,
        email: Option<&str>,
    ) -> ItemController {
        let identity = StaticIdentity(email.map(Identity::new));
        let actions = MutationActions::new(store.clone(), Arc::new(identity.clone()));
        ItemController::new(item, Arc::new(actions), identity.0)
    }

    #[tokio::test]
    async fn claim_then_remote_failure_reverts_to_unclaimed() {
        let item = fixtures::item("42");
        let store = Arc::new(MemoryStore::with_wishlist(vec![item.clone()]));
        store.fail_updates(true);
        let ctl = controller(&store, item, Some("a@x.com"));

        let token = ctl.begin_claim().unwrap();
        assert_eq!(ctl.snapshot().claimed_by.as_deref(), Some("a@x.com"));
        assert!(ctl.is_busy(FieldGroup::Claim));

        let actions = MutationActions::new(
            store.clone(),
            Arc::new(StaticIdentity::user("a@x.com")),
        );
        let ok = actions.claim(token.item_id()).await;
        assert!(!ok);
        let outcome = ctl.finish(token, ok);
        assert_eq!(outcome, MutationOutcome::RolledBack);
        assert_eq!(ctl.snapshot().claimed_by, None);
        assert!(!ctl.is_busy(FieldGroup::Claim));
    }

    #[tokio::test]
    async fn rollback_law_for_claim_and_unclaim() {
        let mut claimed = fixtures::item("1");
        claimed.claimed_by = Some("a@x.com".into());
        let store = Arc::new(MemoryStore::with_wishlist(vec![
            fixtures::item("0"),
            claimed.clone(),
        ]));
        store.fail_updates(true);

        let fresh = controller(&store, fixtures::item("0"), Some("a@x.com"));
        let before = fresh.snapshot();
        assert_eq!(fresh.claim().await, MutationOutcome::RolledBack);
        assert_eq!(fresh.snapshot(), before);

        let held = controller(&store, claimed, Some("a@x.com"));
        let before = held.snapshot();
        assert_eq!(held.unclaim().await, MutationOutcome::RolledBack);
        assert_eq!(held.snapshot(), before);
    }

    #[tokio::test]
    async fn successful_claim_keeps_optimistic_value() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("42")]));
        let ctl = controller(&store, fixtures::item("42"), Some("a@x.com"));
        assert_eq!(ctl.claim().await, MutationOutcome::Committed);
        assert!(ctl.snapshot().is_claimed_by("a@x.com"));
        assert_eq!(store.fetch_calls(), 0, "success must not re-fetch");
    }

    #[tokio::test]
    async fn claim_without_identity_is_refused_silently() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("42")]));
        let ctl = controller(&store, fixtures::item("42"), None);
        assert!(!ctl.can_claim());
        assert_eq!(
            ctl.claim().await,
            MutationOutcome::Refused(Refusal::NoIdentity)
        );
        assert_eq!(store.update_calls(), 0);
        assert!(!ctl.snapshot().is_claimed());
    }

    #[tokio::test]
    async fn unclaim_is_only_for_the_claimant() {
        let mut item = fixtures::item("5");
        item.claimed_by = Some("b@x.com".into());
        let store = Arc::new(MemoryStore::with_wishlist(vec![item.clone()]));
        let ctl = controller(&store, item, Some("a@x.com"));

        assert!(!ctl.can_unclaim());
        assert!(!ctl.can_claim());
        assert_eq!(
            ctl.unclaim().await,
            MutationOutcome::Refused(Refusal::NotClaimant)
        );
        assert_eq!(
            ctl.claim().await,
            MutationOutcome::Refused(Refusal::AlreadyClaimed)
        );
        assert_eq!(store.update_calls(), 0);
    }

    #[tokio::test]
    async fn rename_to_current_trimmed_name_makes_no_call() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("9")]));
        let ctl = controller(&store, fixtures::item("9"), Some("a@x.com"));
        let name = ctl.snapshot().name;

        assert_eq!(
            ctl.rename(&format!("  {name}  ")).await,
            MutationOutcome::Refused(Refusal::Unchanged)
        );
        assert_eq!(store.update_calls(), 0);

        assert_eq!(ctl.rename(" Fresh Name ").await, MutationOutcome::Committed);
        assert_eq!(ctl.snapshot().name, "Fresh Name");
        assert_eq!(store.wishlist_item("9").unwrap().name, "Fresh Name");
    }

    #[tokio::test]
    async fn second_mutation_on_pending_group_is_refused() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("4")]));
        let ctl = controller(&store, fixtures::item("4"), Some("a@x.com"));

        let token = ctl.begin_status(StatusChange::Archive).unwrap();
        assert_eq!(
            ctl.begin_status(StatusChange::MarkPurchased).unwrap_err(),
            Refusal::InFlight
        );
        // Other groups stay available.
        let claim = ctl.begin_claim().unwrap();

        assert_eq!(ctl.finish(claim, true), MutationOutcome::Committed);
        assert_eq!(ctl.finish(token, true), MutationOutcome::Committed);
        assert!(ctl.snapshot().is_archived());
        assert!(ctl.snapshot().is_claimed_by("a@x.com"));
    }

    #[tokio::test]
    async fn out_of_order_completion_rolls_back_only_its_group() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("4")]));
        let ctl = controller(&store, fixtures::item("4"), Some("a@x.com"));

        let status = ctl.begin_status(StatusChange::MarkPurchased).unwrap();
        let title = ctl.begin_rename("Renamed").unwrap();

        assert_eq!(ctl.finish(title, false), MutationOutcome::RolledBack);
        assert_eq!(ctl.finish(status, true), MutationOutcome::Committed);

        let item = ctl.snapshot();
        assert_eq!(item.name, fixtures::item("4").name);
        assert!(item.is_purchased());
    }

    #[tokio::test]
    async fn concurrent_mutations_on_disjoint_groups() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("6")]));
        let ctl = Arc::new(controller(&store, fixtures::item("6"), Some("a@x.com")));

        let gate = store.pause_updates();
        let claim = tokio::spawn({
            let ctl = ctl.clone();
            async move { ctl.claim().await }
        });
        let archive = tokio::spawn({
            let ctl = ctl.clone();
            async move { ctl.archive().await }
        });

        store.wait_for_pending_updates(2).await;
        assert!(ctl.is_busy(FieldGroup::Claim));
        assert!(ctl.is_busy(FieldGroup::Status));
        assert!(ctl.snapshot().is_archived());
        gate.release();

        assert_eq!(claim.await.unwrap(), MutationOutcome::Committed);
        assert_eq!(archive.await.unwrap(), MutationOutcome::Committed);
        assert!(!ctl.is_busy(FieldGroup::Claim));
    }

    #[tokio::test]
    async fn status_rollback_restores_both_fields() {
        let mut item = fixtures::item("8");
        item.status = LifecycleStatus::Archived;
        item.purchase_status = purchase::PURCHASED.into();
        let store = Arc::new(MemoryStore::with_wishlist(vec![item.clone()]));
        store.fail_updates(true);
        let ctl = controller(&store, item, Some("a@x.com"));

        assert_eq!(ctl.reactivate().await, MutationOutcome::RolledBack);
        let after = ctl.snapshot();
        assert_eq!(after.status, LifecycleStatus::Archived);
        assert_eq!(after.purchase_status, purchase::PURCHASED);
    }

    #[tokio::test]
    async fn sync_from_store_skips_pending_groups() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("2")]));
        let ctl = controller(&store, fixtures::item("2"), Some("a@x.com"));

        let token = ctl.begin_claim().unwrap();
        let mut incoming = fixtures::item("2");
        incoming.name = "Server Name".into();
        incoming.claimed_by = None;
        ctl.sync_from_store(incoming);

        let item = ctl.snapshot();
        assert_eq!(item.name, "Server Name");
        assert!(item.is_claimed_by("a@x.com"));
        assert_eq!(ctl.finish(token, false), MutationOutcome::RolledBack);
        assert!(!ctl.snapshot().is_claimed());
    }

    #[tokio::test]
    async fn menu_depends_on_view_and_purchase_state() {
        let store = Arc::new(MemoryStore::default());
        let ctl = controller(&store, fixtures::item("1"), Some("a@x.com"));
        assert_eq!(
            ctl.available_actions(WishlistView::Active),
            vec![StatusChange::MarkPurchased, StatusChange::Archive]
        );
        assert_eq!(
            ctl.available_actions(WishlistView::Archive),
            vec![StatusChange::Reactivate]
        );

        let mut purchased = fixtures::item("2");
        purchased.purchase_status = purchase::PURCHASED.into();
        let ctl = controller(&store, purchased, Some("a@x.com"));
        assert_eq!(
            ctl.available_actions(WishlistView::Active),
            vec![StatusChange::Archive, StatusChange::Reactivate]
        );

        let anon = controller(&store, fixtures::item("3"), None);
        assert!(anon.available_actions(WishlistView::Active).is_empty());
    }

    #[tokio::test]
    async fn foreign_token_is_ignored() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("1")]));
        let a = controller(&store, fixtures::item("1"), Some("a@x.com"));
        let b = controller(&store, fixtures::item("1"), Some("a@x.com"));

        let token_a = a.begin_claim().unwrap();
        let _token_b = b.begin_claim().unwrap();
        assert_eq!(b.finish(token_a, false), MutationOutcome::Stale);
        assert!(b.is_busy(FieldGroup::Claim), "b's own mutation stays pending");
        assert!(b.snapshot().is_claimed_by("a@x.com"));
    }
}
