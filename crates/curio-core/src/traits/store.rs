// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Store adapter trait for the relational backend holding all curated lists.

use async_trait::async_trait;

use crate::error::CurioError;
use crate::models::{
    MediaItem, MediaStatus, NewMediaItem, NewRecipe, NewRestaurant, NewWishlistItem, Recipe,
    Restaurant, RestaurantStatus, WishlistItem, WishlistPatch,
};
use crate::traits::adapter::PluginAdapter;

/// Adapter for the remote store.
///
/// Reads are full-table with no pagination contract. Updates are point
/// updates keyed by identifier; repeating one has no further effect.
/// An update that matches no record returns [`CurioError::NotFound`].
#[async_trait]
pub trait CurationStore: PluginAdapter {
    /// Initializes the backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), CurioError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), CurioError>;

    // --- Wishlist ---

    /// Returns every wishlist item, mapped from stored rows.
    async fn fetch_wishlist(&self) -> Result<Vec<WishlistItem>, CurioError>;

    /// Inserts an item and returns its new identifier.
    async fn insert_wishlist_item(&self, item: &NewWishlistItem) -> Result<String, CurioError>;

    /// Writes the `Some` fields of `patch` to the item with the given id.
    async fn update_wishlist_item(&self, id: &str, patch: &WishlistPatch)
    -> Result<(), CurioError>;

    // --- Media ---

    async fn fetch_media(&self) -> Result<Vec<MediaItem>, CurioError>;

    async fn insert_media(&self, item: &NewMediaItem) -> Result<String, CurioError>;

    async fn update_media_status(&self, id: &str, status: MediaStatus) -> Result<(), CurioError>;

    // --- Restaurants ---

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CurioError>;

    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> Result<String, CurioError>;

    async fn update_restaurant_status(
        &self,
        id: &str,
        status: RestaurantStatus,
    ) -> Result<(), CurioError>;

    // --- Recipes ---

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CurioError>;

    async fn insert_recipe(&self, recipe: &NewRecipe) -> Result<String, CurioError>;

    async fn update_recipe_rating(&self, id: &str, rating: Option<u8>) -> Result<(), CurioError>;
}
