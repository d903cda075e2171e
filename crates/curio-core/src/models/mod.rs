// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models shared by the store, the controllers and the gateway.

pub mod enrichment;
pub mod library;
pub mod wishlist;

pub use enrichment::{
    DEFAULT_DISCOVERY_QUERY, ExtractedRecipe, MediaClassification, RestaurantDiscovery,
    RestaurantSuggestion,
};
pub use library::{
    Difficulty, Ingredient, MediaItem, MediaKind, MediaStatus, NewMediaItem, NewRecipe,
    NewRestaurant, Recipe, Restaurant, RestaurantStatus,
};
pub use wishlist::{
    Freshness, LifecycleStatus, NewWishlistItem, WishlistItem, WishlistPatch, purchase,
};
