// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curation state for Curio.
//!
//! Mutation actions over a [`curio_core::CurationStore`], per-item optimistic
//! controllers, the swipe triage deck and wishlist views.

pub mod actions;
pub mod reconcile;
pub mod triage;
pub mod views;

pub use actions::{ItemMutations, MutationActions, StatusChange, SwipeAction};
pub use reconcile::{FieldGroup, ItemController, MutationOutcome, PendingMutation, Refusal};
pub use triage::{
    DeckView, Direction, GestureDecision, Key, Release, TriageDeck, TriageSession,
    TriageSettings, TriageStep,
};
pub use views::{GridFilter, SortOrder, WishlistBoard, WishlistView};
