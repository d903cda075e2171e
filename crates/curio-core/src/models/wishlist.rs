// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wishlist item model, freshness tiers and field-scoped patches.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Purchase status strings seen in the wishlist table.
///
/// The column is free text; these are the values Curio itself writes.
pub mod purchase {
    pub const ACTIVE: &str = "Active";
    pub const INACTIVE: &str = "Inactive";
    pub const UNPURCHASED: &str = "Unpurchased";
    pub const PURCHASED: &str = "Purchased";
}

/// Three-level urgency label derived from a numeric priority.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Freshness {
    Hot,
    Warm,
    Cold,
}

impl Freshness {
    /// Priority assumed when the stored value is missing or unusable.
    pub const FALLBACK_PRIORITY: i64 = 3;

    /// Maps a priority to its tier: `<= 2` Hot, `3` Warm, `> 3` Cold.
    pub fn from_priority(priority: i64) -> Self {
        if priority <= 2 {
            Freshness::Hot
        } else if priority == 3 {
            Freshness::Warm
        } else {
            Freshness::Cold
        }
    }

    /// Maps a raw stored priority.
    ///
    /// Missing, non-numeric, non-finite and zero values all fall back to
    /// [`Self::FALLBACK_PRIORITY`]. Fractional priorities are truncated.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let priority = raw
            .map(str::trim)
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|p| p.is_finite() && *p != 0.0)
            .map(|p| p.trunc() as i64)
            .unwrap_or(Self::FALLBACK_PRIORITY);
        Self::from_priority(priority)
    }

    /// Sort weight, hottest highest.
    pub fn rank(self) -> u8 {
        match self {
            Freshness::Hot => 3,
            Freshness::Warm => 2,
            Freshness::Cold => 1,
        }
    }
}

/// Lifecycle axis of a wishlist item. Independent of purchase status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum LifecycleStatus {
    Active,
    Archived,
}

impl LifecycleStatus {
    /// Case-insensitive parse of the stored status column; anything that is
    /// not `archived` counts as active.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.trim().eq_ignore_ascii_case("archived") => LifecycleStatus::Archived,
            _ => LifecycleStatus::Active,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LifecycleStatus::Active => "Active",
            LifecycleStatus::Archived => "Archived",
        }
    }
}

/// A wishlist entry as the application sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Photo URL, or empty when the row has none.
    pub photo_url: String,
    pub price: f64,
    pub currency: String,
    pub store_link: String,
    pub freshness: Freshness,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    pub brand: Option<String>,
    pub status: LifecycleStatus,
    pub purchase_status: String,
    /// Email of the claimant. `Some` is never an empty string.
    pub claimed_by: Option<String>,
    pub category: String,
}

impl WishlistItem {
    pub fn is_claimed(&self) -> bool {
        self.claimed_by.as_deref().is_some_and(|c| !c.is_empty())
    }

    pub fn is_claimed_by(&self, email: &str) -> bool {
        self.claimed_by.as_deref() == Some(email)
    }

    pub fn is_purchased(&self) -> bool {
        self.purchase_status == purchase::PURCHASED
    }

    pub fn is_archived(&self) -> bool {
        self.status == LifecycleStatus::Archived
    }

    pub fn has_photo(&self) -> bool {
        !self.photo_url.trim().is_empty()
    }
}

/// Fields accepted when inserting a wishlist item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWishlistItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub store_link: String,
    /// Numeric priority (1 = hottest).
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A field-scoped update addressed to one wishlist item.
///
/// Only the `Some` fields are written. `claimed_by: Some(None)` clears the
/// claimant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistPatch {
    pub status: Option<LifecycleStatus>,
    pub purchase_status: Option<String>,
    pub claimed_by: Option<Option<String>>,
    pub name: Option<String>,
}

impl WishlistPatch {
    pub fn status(mut self, status: LifecycleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn purchase_status(mut self, purchase_status: impl Into<String>) -> Self {
        self.purchase_status = Some(purchase_status.into());
        self
    }

    pub fn claim(mut self, email: impl Into<String>) -> Self {
        self.claimed_by = Some(Some(email.into()));
        self
    }

    pub fn unclaim(mut self) -> Self {
        self.claimed_by = Some(None);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.purchase_status.is_none()
            && self.claimed_by.is_none()
            && self.name.is_none()
    }

    /// Applies the patch to an in-memory item.
    pub fn apply_to(&self, item: &mut WishlistItem) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(ref purchase_status) = self.purchase_status {
            item.purchase_status = purchase_status.clone();
        }
        if let Some(ref claimed_by) = self.claimed_by {
            item.claimed_by = claimed_by.clone().filter(|c| !c.is_empty());
        }
        if let Some(ref name) = self.name {
            item.name = name.clone();
        }
    }
}
