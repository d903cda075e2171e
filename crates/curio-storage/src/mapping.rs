// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lenient mapping from stored rows to domain models.
//!
//! Rows may hold any SQLite type in any column, or nothing at all. Mapping
//! never fails: every missing or unusable value falls back to a fixed
//! default so one bad row cannot break a whole fetch.

use std::str::FromStr;

use curio_core::models::{
    Difficulty, Freshness, Ingredient, LifecycleStatus, MediaItem, MediaKind, MediaStatus, Recipe,
    Restaurant, RestaurantStatus, WishlistItem, purchase,
};
use rusqlite::Row;
use rusqlite::types::ValueRef;

/// Name shown for wishlist rows with no item name.
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// Prefix of identifiers minted for rows that lack one. Such items cannot
/// be updated since no stored row carries the identifier.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Values the mapping takes from configuration rather than from the row.
#[derive(Debug, Clone, PartialEq)]
pub struct MappingDefaults {
    pub currency: String,
    pub default_category: String,
}

impl Default for MappingDefaults {
    fn default() -> Self {
        Self {
            currency: "£".to_string(),
            default_category: "General".to_string(),
        }
    }
}

/// Reads any column as optional text. Numbers are rendered, blobs and
/// invalid UTF-8 are treated as absent, blank text becomes `None`.
pub(crate) fn loose_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    let text = match row.get_ref(idx)? {
        ValueRef::Null | ValueRef::Blob(_) => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes).ok().map(str::to_string),
    };
    Ok(text.filter(|s| !s.trim().is_empty()))
}

/// A wishlist row exactly as stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WishlistRow {
    pub product_id: Option<String>,
    pub item: Option<String>,
    pub description: Option<String>,
    pub source_images: Option<String>,
    pub price: Option<String>,
    pub links: Option<String>,
    pub freshness: Option<String>,
    pub timestamp: Option<String>,
    pub brand: Option<String>,
    pub status: Option<String>,
    pub purchase_status: Option<String>,
    pub claimed_user: Option<String>,
    pub section: Option<String>,
}

impl WishlistRow {
    /// Column list matching [`WishlistRow::from_row`].
    pub const COLUMNS: &'static str = "product_id, item, description, source_images, price, \
         links, freshness, timestamp, brand, status, purchase_status, claimed_user, section";

    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            product_id: loose_text(row, 0)?,
            item: loose_text(row, 1)?,
            description: loose_text(row, 2)?,
            source_images: loose_text(row, 3)?,
            price: loose_text(row, 4)?,
            links: loose_text(row, 5)?,
            freshness: loose_text(row, 6)?,
            timestamp: loose_text(row, 7)?,
            brand: loose_text(row, 8)?,
            status: loose_text(row, 9)?,
            purchase_status: loose_text(row, 10)?,
            claimed_user: loose_text(row, 11)?,
            section: loose_text(row, 12)?,
        })
    }

    /// Maps the row to a [`WishlistItem`]. Total: never fails.
    pub fn into_item(self, defaults: &MappingDefaults) -> WishlistItem {
        let status = LifecycleStatus::from_raw(self.status.as_deref());
        // Only an explicit "active" column counts; a missing one is inactive
        // even though the lifecycle falls back to Active.
        let explicitly_active = self
            .status
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case("active"));
        let purchase_status = self
            .purchase_status
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| {
                if explicitly_active {
                    purchase::ACTIVE.to_string()
                } else {
                    purchase::INACTIVE.to_string()
                }
            });

        WishlistItem {
            id: self
                .product_id
                .map(|s| s.trim().to_string())
                .unwrap_or_else(|| format!("{LOCAL_ID_PREFIX}{}", uuid::Uuid::new_v4())),
            name: self.item.unwrap_or_else(|| UNKNOWN_ITEM.to_string()),
            description: self.description.unwrap_or_default(),
            photo_url: self.source_images.unwrap_or_default(),
            price: parse_price(self.price.as_deref()),
            currency: defaults.currency.clone(),
            store_link: self.links.unwrap_or_default(),
            freshness: Freshness::from_raw(self.freshness.as_deref()),
            created_at: self.timestamp.unwrap_or_else(now_rfc3339),
            brand: self.brand,
            status,
            purchase_status,
            claimed_by: self.claimed_user.map(|s| s.trim().to_string()),
            category: self
                .section
                .unwrap_or_else(|| defaults.default_category.clone()),
        }
    }
}

/// Parses a free-text price, ignoring currency symbols and thousands
/// separators. Anything unparseable or non-finite is `0.0`.
pub fn parse_price(raw: Option<&str>) -> f64 {
    raw.map(|s| {
        s.chars()
            .filter(|c| !matches!(c, '£' | '$' | ',') && !c.is_whitespace())
            .collect::<String>()
    })
    .and_then(|s| s.parse::<f64>().ok())
    .filter(|p| p.is_finite())
    .unwrap_or(0.0)
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Decodes a JSON string list. Malformed or absent input is empty.
pub(crate) fn json_list<T: serde::de::DeserializeOwned>(raw: Option<&str>) -> Vec<T> {
    raw.and_then(|s| serde_json::from_str(s).ok())
        .unwrap_or_default()
}

/// Ratings outside 1..=5 are dropped.
pub(crate) fn rating(raw: Option<String>) -> Option<u8> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|r| (1.0..=5.0).contains(r))
        .map(|r| r.round() as u8)
}

fn parse_or<T: FromStr>(raw: Option<&str>, fallback: T) -> T {
    raw.and_then(|s| T::from_str(&s.trim().to_lowercase()).ok())
        .unwrap_or(fallback)
}

pub(crate) const MEDIA_COLUMNS: &str =
    "id, title, kind, status, url, image, tags, rating, review, created_at";

/// Unknown kinds map to `book`, unknown statuses to `queued`.
pub(crate) fn media_from_row(row: &Row<'_>) -> rusqlite::Result<MediaItem> {
    let tags = loose_text(row, 6)?;
    Ok(MediaItem {
        id: loose_text(row, 0)?.unwrap_or_default(),
        title: loose_text(row, 1)?.unwrap_or_default(),
        kind: parse_or(loose_text(row, 2)?.as_deref(), MediaKind::Book),
        status: parse_or(loose_text(row, 3)?.as_deref(), MediaStatus::Queued),
        url: loose_text(row, 4)?,
        image: loose_text(row, 5)?,
        tags: json_list(tags.as_deref()),
        rating: rating(loose_text(row, 7)?),
        review: loose_text(row, 8)?,
        created_at: loose_text(row, 9)?.unwrap_or_else(now_rfc3339),
    })
}

pub(crate) const RESTAURANT_COLUMNS: &str = "id, name, location, cuisine, price_range, rating, \
     review, booking_url, status, tags, image, created_at";

pub(crate) fn restaurant_from_row(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
    let tags = loose_text(row, 9)?;
    Ok(Restaurant {
        id: loose_text(row, 0)?.unwrap_or_default(),
        name: loose_text(row, 1)?.unwrap_or_default(),
        location: loose_text(row, 2)?,
        cuisine: loose_text(row, 3)?,
        price_range: loose_text(row, 4)?,
        rating: rating(loose_text(row, 5)?),
        review: loose_text(row, 6)?,
        booking_url: loose_text(row, 7)?,
        status: parse_or(loose_text(row, 8)?.as_deref(), RestaurantStatus::Wishlist),
        tags: json_list(tags.as_deref()),
        image: loose_text(row, 10)?,
        created_at: loose_text(row, 11)?.unwrap_or_else(now_rfc3339),
    })
}

pub(crate) const RECIPE_COLUMNS: &str =
    "id, title, ingredients, method, image, source_url, rating, difficulty, created_at";

pub(crate) fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let ingredients = loose_text(row, 2)?;
    let difficulty = loose_text(row, 7)?;
    Ok(Recipe {
        id: loose_text(row, 0)?.unwrap_or_default(),
        title: loose_text(row, 1)?.unwrap_or_default(),
        ingredients: json_list::<Ingredient>(ingredients.as_deref()),
        method: loose_text(row, 3)?.unwrap_or_default(),
        image: loose_text(row, 4)?,
        source_url: loose_text(row, 5)?,
        rating: rating(loose_text(row, 6)?),
        difficulty: difficulty.and_then(|d| Difficulty::from_str(d.trim()).ok()),
        created_at: loose_text(row, 8)?.unwrap_or_else(now_rfc3339),
    })
}
