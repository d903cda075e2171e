// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of [`CurationStore`].

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use curio_config::model::{StorageConfig, WishlistConfig};
use curio_core::models::{
    MediaItem, MediaStatus, NewMediaItem, NewRecipe, NewRestaurant, NewWishlistItem, Recipe,
    Restaurant, RestaurantStatus, WishlistItem, WishlistPatch,
};
use curio_core::{AdapterType, CurationStore, CurioError, HealthStatus, PluginAdapter};

use crate::database::Database;
use crate::mapping::MappingDefaults;
use crate::queries;

/// SQLite-backed store.
///
/// The database is opened lazily by [`CurationStore::initialize`]; every
/// other call fails until then.
pub struct SqliteStorage {
    config: StorageConfig,
    defaults: MappingDefaults,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    pub fn new(config: StorageConfig, wishlist: &WishlistConfig) -> Self {
        Self {
            config,
            defaults: MappingDefaults {
                currency: wishlist.currency.clone(),
                default_category: wishlist.default_category.clone(),
            },
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, CurioError> {
        self.db.get().ok_or_else(|| CurioError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, CurioError> {
        self.db()?
            .connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CurioError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("sqlite store shut down");
        }
        Ok(())
    }
}

#[async_trait]
impl CurationStore for SqliteStorage {
    async fn initialize(&self) -> Result<(), CurioError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| CurioError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), CurioError> {
        self.db()?.close().await
    }

    async fn fetch_wishlist(&self) -> Result<Vec<WishlistItem>, CurioError> {
        queries::wishlist::fetch_wishlist(self.db()?, &self.defaults).await
    }

    async fn insert_wishlist_item(&self, item: &NewWishlistItem) -> Result<String, CurioError> {
        queries::wishlist::insert_wishlist_item(self.db()?, item, &self.defaults).await
    }

    async fn update_wishlist_item(
        &self,
        id: &str,
        patch: &WishlistPatch,
    ) -> Result<(), CurioError> {
        queries::wishlist::update_wishlist_item(self.db()?, id, patch).await
    }

    async fn fetch_media(&self) -> Result<Vec<MediaItem>, CurioError> {
        queries::media::fetch_media(self.db()?).await
    }

    async fn insert_media(&self, item: &NewMediaItem) -> Result<String, CurioError> {
        queries::media::insert_media(self.db()?, item).await
    }

    async fn update_media_status(&self, id: &str, status: MediaStatus) -> Result<(), CurioError> {
        queries::media::update_media_status(self.db()?, id, status).await
    }

    async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>, CurioError> {
        queries::restaurants::fetch_restaurants(self.db()?).await
    }

    async fn insert_restaurant(&self, restaurant: &NewRestaurant) -> Result<String, CurioError> {
        queries::restaurants::insert_restaurant(self.db()?, restaurant).await
    }

    async fn update_restaurant_status(
        &self,
        id: &str,
        status: RestaurantStatus,
    ) -> Result<(), CurioError> {
        queries::restaurants::update_restaurant_status(self.db()?, id, status).await
    }

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CurioError> {
        queries::recipes::fetch_recipes(self.db()?).await
    }

    async fn insert_recipe(&self, recipe: &NewRecipe) -> Result<String, CurioError> {
        queries::recipes::insert_recipe(self.db()?, recipe).await
    }

    async fn update_recipe_rating(&self, id: &str, rating: Option<u8>) -> Result<(), CurioError> {
        queries::recipes::update_recipe_rating(self.db()?, id, rating).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_core::models::LifecycleStatus;
    use tempfile::tempdir;

    fn make_storage(path: &std::path::Path) -> SqliteStorage {
        SqliteStorage::new(
            StorageConfig {
                database_path: path.to_str().unwrap().to_string(),
                wal_mode: true,
            },
            &WishlistConfig::default(),
        )
    }

    #[tokio::test]
    async fn implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let storage = make_storage(&dir.path().join("test.db"));
        assert_eq!(storage.name(), "sqlite");
        assert_eq!(storage.version(), semver::Version::new(0, 1, 0));
        assert_eq!(storage.adapter_type(), AdapterType::Store);
    }

    #[tokio::test]
    async fn calls_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let storage = make_storage(&dir.path().join("no_init.db"));
        assert!(storage.health_check().await.is_err());
        assert!(storage.fetch_wishlist().await.is_err());
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let storage = make_storage(&dir.path().join("double.db"));
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn wishlist_lifecycle_through_adapter() {
        let dir = tempdir().unwrap();
        let storage = make_storage(&dir.path().join("lifecycle.db"));
        storage.initialize().await.unwrap();
        assert_eq!(storage.health_check().await.unwrap(), HealthStatus::Healthy);

        let id = storage
            .insert_wishlist_item(&NewWishlistItem {
                name: "Record Player".into(),
                price: Some(180.0),
                ..Default::default()
            })
            .await
            .unwrap();

        storage
            .update_wishlist_item(
                &id,
                &WishlistPatch::default()
                    .status(LifecycleStatus::Archived)
                    .name("Turntable"),
            )
            .await
            .unwrap();

        let items = storage.fetch_wishlist().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Turntable");
        assert!(items[0].is_archived());
        assert_eq!(items[0].currency, "£");

        storage.shutdown().await.unwrap();
    }
}
