// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end curation flows against a seeded SQLite store.

use std::sync::Arc;

use curio_core::models::LifecycleStatus;
use curio_core::{CurationStore, StaticIdentity};
use curio_curation::{
    Direction, GridFilter, MutationActions, MutationOutcome, SortOrder, TriageDeck,
    TriageSettings, WishlistBoard, WishlistView,
};
use curio_test_utils::TestHarness;

async fn harness() -> TestHarness {
    TestHarness::builder()
        .with_item("Lamp", 40.0)
        .with_item("Rug", 120.0)
        .with_item("Vase", 15.0)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn archive_persists_and_survives_revalidation() {
    let h = harness().await;
    let identity = StaticIdentity::user("a@x.com");
    let actions = Arc::new(MutationActions::new(h.store.clone(), Arc::new(identity.clone())));
    let items = h.store.fetch_wishlist().await.unwrap();
    let mut board = WishlistBoard::new(items, actions, identity.0);

    let lamp = &h.ids[0];
    let outcome = board.get(lamp).unwrap().archive().await;
    assert_eq!(outcome, MutationOutcome::Committed);

    let all = GridFilter::All;
    let sort = SortOrder::Name;
    let active: Vec<String> = board
        .render(WishlistView::Active, all, sort)
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(active, vec!["Rug", "Vase"]);

    board.sync(h.store.fetch_wishlist().await.unwrap());
    let archived = board.render(WishlistView::Archive, all, sort);
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].status, LifecycleStatus::Archived);
}

#[tokio::test]
async fn claim_is_stored_with_identity_email() {
    let h = harness().await;
    let identity = StaticIdentity::user("b@x.com");
    let actions = Arc::new(MutationActions::new(h.store.clone(), Arc::new(identity.clone())));
    let board = WishlistBoard::new(h.store.fetch_wishlist().await.unwrap(), actions, identity.0);

    let rug = board.get(&h.ids[1]).unwrap();
    assert_eq!(rug.claim().await, MutationOutcome::Committed);

    let stored = h.store.fetch_wishlist().await.unwrap();
    let rug = stored.iter().find(|i| i.id == h.ids[1]).unwrap();
    assert_eq!(rug.claimed_by.as_deref(), Some("b@x.com"));
    assert_eq!(
        board
            .render(WishlistView::Active, GridFilter::Unclaimed, SortOrder::PriceAsc)
            .len(),
        2
    );
}

#[tokio::test]
async fn triage_writes_status_for_each_commit() {
    let h = harness().await;
    let actions = Arc::new(MutationActions::new(
        h.store.clone(),
        Arc::new(StaticIdentity::anonymous()),
    ));
    let items = h.store.fetch_wishlist().await.unwrap();
    let mut deck = TriageDeck::with_order(items, &TriageSettings::default(), actions);

    let first = deck.commit(Direction::Left).unwrap();
    let second = deck.commit(Direction::Right).unwrap();
    assert!(first.write.await.unwrap());
    assert!(second.write.await.unwrap());
    assert_eq!(deck.remaining(), 1);

    let stored = h.store.fetch_wishlist().await.unwrap();
    let status_of = |id: &str| stored.iter().find(|i| i.id == id).unwrap().status;
    assert_eq!(status_of(&first.item.id), LifecycleStatus::Archived);
    assert_eq!(status_of(&second.item.id), LifecycleStatus::Active);
}
