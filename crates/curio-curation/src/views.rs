// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wishlist views, grid filters and sort orders.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use curio_core::Identity;
use curio_core::models::{Freshness, LifecycleStatus, WishlistItem};

use crate::actions::ItemMutations;
use crate::reconcile::ItemController;

/// Which slice of the wishlist a page shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WishlistView {
    /// Lifecycle `Active`, purchased or not.
    #[default]
    Active,
    /// Archived or purchased.
    Archive,
    /// Archived only.
    Trash,
}

impl WishlistView {
    pub fn includes(self, item: &WishlistItem) -> bool {
        match self {
            WishlistView::Active => item.status == LifecycleStatus::Active,
            WishlistView::Archive => item.is_archived() || item.is_purchased(),
            WishlistView::Trash => item.is_archived(),
        }
    }

    /// Archive and trash share the reduced card menu.
    pub fn is_archive(self) -> bool {
        matches!(self, WishlistView::Archive | WishlistView::Trash)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridFilter {
    #[default]
    All,
    Hot,
    /// Strictly below the given amount.
    UnderBudget(f64),
    Unclaimed,
}

impl GridFilter {
    pub fn matches(self, item: &WishlistItem) -> bool {
        match self {
            GridFilter::All => true,
            GridFilter::Hot => item.freshness == Freshness::Hot,
            GridFilter::UnderBudget(limit) => item.price < limit,
            GridFilter::Unclaimed => !item.is_claimed(),
        }
    }

    /// Parses a query-string filter name. `under_budget` uses `budget`.
    pub fn parse(name: &str, budget: f64) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(GridFilter::All),
            "hot" => Some(GridFilter::Hot),
            "under_budget" | "under-budget" => Some(GridFilter::UnderBudget(budget)),
            "unclaimed" => Some(GridFilter::Unclaimed),
            _ => None,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortOrder {
    /// Hot first.
    Freshness,
    /// Newest first.
    #[default]
    DateAdded,
    PriceAsc,
    PriceDesc,
    /// Case-insensitive, A to Z.
    Name,
}

impl SortOrder {
    pub fn compare(self, a: &WishlistItem, b: &WishlistItem) -> Ordering {
        match self {
            SortOrder::Freshness => b.freshness.rank().cmp(&a.freshness.rank()),
            SortOrder::DateAdded => created(b).cmp(&created(a)),
            SortOrder::PriceAsc => a.price.total_cmp(&b.price),
            SortOrder::PriceDesc => b.price.total_cmp(&a.price),
            SortOrder::Name => a
                .name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name)),
        }
    }
}

/// Unparseable timestamps sort as oldest.
fn created(item: &WishlistItem) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(&item.created_at).ok()
}

/// Applies view, filter and sort. The sort is stable.
pub fn render(
    items: &[WishlistItem],
    view: WishlistView,
    filter: GridFilter,
    sort: SortOrder,
) -> Vec<WishlistItem> {
    let mut result: Vec<WishlistItem> = items
        .iter()
        .filter(|item| view.includes(item) && filter.matches(item))
        .cloned()
        .collect();
    result.sort_by(|a, b| sort.compare(a, b));
    result
}

/// Purchased items are greyed out everywhere except the archive views.
pub fn is_deemphasized(item: &WishlistItem, view: WishlistView) -> bool {
    item.is_purchased() && !view.is_archive()
}

/// A wishlist page made of live card controllers.
///
/// Rendering goes through each controller's optimistic snapshot, so an
/// item archived a moment ago has already left the active view.
pub struct WishlistBoard {
    controllers: Vec<Arc<ItemController>>,
    by_id: HashMap<String, usize>,
    mutations: Arc<dyn ItemMutations>,
    identity: Option<Identity>,
}

impl WishlistBoard {
    pub fn new(
        items: Vec<WishlistItem>,
        mutations: Arc<dyn ItemMutations>,
        identity: Option<Identity>,
    ) -> Self {
        let mut board = Self {
            controllers: Vec::new(),
            by_id: HashMap::new(),
            mutations,
            identity,
        };
        board.sync(items);
        board
    }

    pub fn get(&self, id: &str) -> Option<Arc<ItemController>> {
        self.by_id.get(id).map(|&i| self.controllers[i].clone())
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }

    /// Merges a fresh fetch: known items go through
    /// [`ItemController::sync_from_store`], unknown ones get a controller.
    pub fn sync(&mut self, items: Vec<WishlistItem>) {
        for item in items {
            match self.by_id.get(&item.id) {
                Some(&i) => self.controllers[i].sync_from_store(item),
                None => {
                    self.by_id.insert(item.id.clone(), self.controllers.len());
                    self.controllers.push(Arc::new(ItemController::new(
                        item,
                        self.mutations.clone(),
                        self.identity.clone(),
                    )));
                }
            }
        }
    }

    pub fn render(&self, view: WishlistView, filter: GridFilter, sort: SortOrder) -> Vec<WishlistItem> {
        let snapshots: Vec<WishlistItem> =
            self.controllers.iter().map(|c| c.snapshot()).collect();
        render(&snapshots, view, filter, sort)
    }
}
