// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ready-made domain values for tests.

use curio_core::models::{
    Freshness, LifecycleStatus, MediaClassification, MediaKind, WishlistItem, purchase,
};

/// An active, unclaimed, unpurchased item with a photo and a unique name.
pub fn item(id: &str) -> WishlistItem {
    WishlistItem {
        id: id.to_string(),
        name: format!("Item {id}"),
        description: String::new(),
        photo_url: format!("https://img.example.com/{id}.jpg"),
        price: 25.0,
        currency: "£".to_string(),
        store_link: format!("https://shop.example.com/{id}"),
        freshness: Freshness::Warm,
        created_at: "2026-01-01T00:00:00Z".to_string(),
        brand: None,
        status: LifecycleStatus::Active,
        purchase_status: purchase::ACTIVE.to_string(),
        claimed_by: None,
        category: "General".to_string(),
    }
}

/// [`item`] already claimed by `email`.
pub fn claimed_item(id: &str, email: &str) -> WishlistItem {
    WishlistItem {
        claimed_by: Some(email.to_string()),
        ..item(id)
    }
}

pub fn classification(title: &str) -> MediaClassification {
    MediaClassification {
        title: title.to_string(),
        kind: MediaKind::Book,
        author_or_director: Some("Anon".to_string()),
        summary: Some(format!("A summary of {title}.")),
        tags: vec!["fiction".to_string()],
        confidence: 0.9,
    }
}
