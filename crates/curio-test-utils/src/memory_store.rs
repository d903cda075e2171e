// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `CurationStore` for deterministic tests.
//!
//! Besides holding rows, `MemoryStore` counts calls, can be told to fail
//! every update, and can park updates behind a gate so tests can observe
//! state while a write is in flight.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::watch;

use curio_core::models::{
    Freshness, LifecycleStatus, MediaItem, MediaStatus, NewMediaItem, NewRecipe, NewRestaurant,
    NewWishlistItem, Recipe, Restaurant, RestaurantStatus, WishlistItem, WishlistPatch, purchase,
};
use curio_core::{AdapterType, CurationStore, CurioError, HealthStatus, PluginAdapter};

#[derive(Default)]
struct Tables {
    wishlist: Vec<WishlistItem>,
    media: Vec<MediaItem>,
    restaurants: Vec<Restaurant>,
    recipes: Vec<Recipe>,
    next_id: u64,
}

impl Tables {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// Holds an open gate closed until released or dropped.
pub struct UpdateGate {
    open: Arc<watch::Sender<bool>>,
}

impl UpdateGate {
    pub fn release(&self) {
        self.open.send_replace(true);
    }
}

impl Drop for UpdateGate {
    fn drop(&mut self) {
        self.release();
    }
}

pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_updates: AtomicBool,
    update_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
    parked: AtomicUsize,
    gate: Arc<watch::Sender<bool>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            fail_updates: AtomicBool::new(false),
            update_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
            parked: AtomicUsize::new(0),
            gate: Arc::new(watch::Sender::new(true)),
        }
    }
}

impl MemoryStore {
    pub fn with_wishlist(items: Vec<WishlistItem>) -> Self {
        let store = Self::default();
        store.tables().wishlist = items;
        store
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current stored copy of a wishlist item.
    pub fn wishlist_item(&self, id: &str) -> Option<WishlistItem> {
        self.tables().wishlist.iter().find(|i| i.id == id).cloned()
    }

    pub fn media_item(&self, id: &str) -> Option<MediaItem> {
        self.tables().media.iter().find(|m| m.id == id).cloned()
    }

    /// Number of update calls received, failed ones included.
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Makes every subsequent update return a storage error.
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Parks every update until the returned gate is released or dropped.
    pub fn pause_updates(&self) -> UpdateGate {
        self.gate.send_replace(false);
        UpdateGate {
            open: self.gate.clone(),
        }
    }

    /// Yields until at least `n` updates are parked at the gate.
    pub async fn wait_for_pending_updates(&self, n: usize) {
        while self.parked.load(Ordering::SeqCst) < n {
            tokio::task::yield_now().await;
        }
    }

    /// Counts the call, waits at the gate, then applies the failure switch.
    async fn enter_update(&self) -> Result<(), CurioError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut open = self.gate.subscribe();
        if !*open.borrow_and_update() {
            self.parked.fetch_add(1, Ordering::SeqCst);
            let _ = open.wait_for(|open| *open).await;
            self.parked.fetch_sub(1, Ordering::SeqCst);
        }
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(CurioError::storage(std::io::Error::other(
                "simulated update failure",
            )));
        }
        Ok(())
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[async_trait]
impl PluginAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, CurioError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CurioError> {
        Ok(())
    }
}

#[async_trait]
impl CurationStore for MemoryStore {
    async fn initialize(&self) -> Result<(), CurioError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), CurioError> {
        Ok(())
    }

    async fn fetch_wishlist(&self) -> Result<Vec<WishlistItem>, CurioError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables().wishlist.clone())
    }

    async fn insert_wishlist_item(&self, item: &NewWishlistItem) -> Result<String, CurioError> {
        let mut tables = self.tables();
        let id = tables.next_id("item");
        tables.wishlist.push(WishlistItem {
            id: id.clone(),
            name: item.name.trim().to_string(),
            description: item.description.clone(),
            photo_url: item.photo_url.clone(),
            price: item.price.unwrap_or(0.0),
            currency: "£".to_string(),
            store_link: item.store_link.clone(),
            freshness: item
                .priority
                .map(Freshness::from_priority)
                .unwrap_or(Freshness::Warm),
            created_at: now(),
            brand: item.brand.clone(),
            status: LifecycleStatus::Active,
            purchase_status: purchase::ACTIVE.to_string(),
            claimed_by: None,
            category: item.category.clone().unwrap_or_else(|| "General".to_string()),
        });
        Ok(id)
    }

    async fn update_wishlist_item(
        &self,
        id: &str,
        patch: &WishlistPatch,
    ) -> Result<(), CurioError> {
        self.enter_update().await?;
        let mut tables = self.tables();
        let item = tables
            .wishlist
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CurioError::not_found("wishlist item", id))?;
        patch.apply_to(item);
        Ok(())
    }

    async fn fetch_media(&self) -> Result<Vec<MediaItem>, CurioError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables().media.clone())
    }

    async fn insert_media(&self, item: &NewMediaItem) -> Result<String, CurioError> {
        let mut tables = self.tables();
        let id = tables.next_id("media");
        tables.media.push(MediaItem {
            id: id.clone(),
            title: item.title.clone(),
            kind: item.kind,
            status: item.status,
            url: item.url.clone(),
            image: item.image.clone(),
            tags: item.tags.clone(),
            rating: item.rating,
            review: item.review.clone(),
            created_at: now(),
        });
        Ok(id)
    }

    async fn update_media_status(&self, id: &str, status: MediaStatus) -> Result<(), CurioError> {
        self.enter_update().await?;
        let mut tables = self.tables();
        let item = tables
            .media
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| CurioError::not_found("media", id))?;
        item.status = status;
        Ok(())
    }

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CurioError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables().restaurants.clone())
    }

    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> Result<String, CurioError> {
        let mut tables = self.tables();
        let id = tables.next_id("restaurant");
        tables.restaurants.push(Restaurant {
            id: id.clone(),
            name: restaurant.name.clone(),
            location: restaurant.location.clone(),
            cuisine: restaurant.cuisine.clone(),
            price_range: restaurant.price_range.clone(),
            rating: restaurant.rating,
            review: restaurant.review.clone(),
            booking_url: restaurant.booking_url.clone(),
            status: restaurant.status,
            tags: restaurant.tags.clone(),
            image: restaurant.image.clone(),
            created_at: now(),
        });
        Ok(id)
    }

    async fn update_restaurant_status(
        &self,
        id: &str,
        status: RestaurantStatus,
    ) -> Result<(), CurioError> {
        self.enter_update().await?;
        let mut tables = self.tables();
        let restaurant = tables
            .restaurants
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CurioError::not_found("restaurant", id))?;
        restaurant.status = status;
        Ok(())
    }

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CurioError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.tables().recipes.clone())
    }

    async fn insert_recipe(&self, recipe: &NewRecipe) -> Result<String, CurioError> {
        let mut tables = self.tables();
        let id = tables.next_id("recipe");
        tables.recipes.push(Recipe {
            id: id.clone(),
            title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            method: recipe.method.clone(),
            image: recipe.image.clone(),
            source_url: recipe.source_url.clone(),
            rating: recipe.rating,
            difficulty: recipe.difficulty,
            created_at: now(),
        });
        Ok(id)
    }

    async fn update_recipe_rating(&self, id: &str, rating: Option<u8>) -> Result<(), CurioError> {
        if rating.is_some_and(|r| !(1..=5).contains(&r)) {
            return Err(CurioError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                rating.unwrap_or_default()
            )));
        }
        self.enter_update().await?;
        let mut tables = self.tables();
        let recipe = tables
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| CurioError::not_found("recipe", id))?;
        recipe.rating = rating;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn update_applies_patch_and_counts() {
        let store = MemoryStore::with_wishlist(vec![fixtures::item("1")]);
        store
            .update_wishlist_item("1", &WishlistPatch::default().name("Renamed"))
            .await
            .unwrap();
        assert_eq!(store.wishlist_item("1").unwrap().name, "Renamed");
        assert_eq!(store.update_calls(), 1);
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let store = MemoryStore::default();
        let err = store
            .update_wishlist_item("nope", &WishlistPatch::default().name("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, CurioError::NotFound { .. }));
    }

    #[tokio::test]
    async fn gate_parks_updates_until_released() {
        let store = Arc::new(MemoryStore::with_wishlist(vec![fixtures::item("1")]));
        let gate = store.pause_updates();
        let task = tokio::spawn({
            let store = store.clone();
            async move {
                store
                    .update_wishlist_item("1", &WishlistPatch::default().name("Later"))
                    .await
            }
        });
        store.wait_for_pending_updates(1).await;
        assert_eq!(store.wishlist_item("1").unwrap().name, "Item 1");
        gate.release();
        task.await.unwrap().unwrap();
        assert_eq!(store.wishlist_item("1").unwrap().name, "Later");
    }
}
