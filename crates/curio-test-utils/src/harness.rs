// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness backed by a real SQLite store in a temp directory.

use std::sync::Arc;

use curio_config::model::{StorageConfig, WishlistConfig};
use curio_core::models::NewWishlistItem;
use curio_core::{CurationStore, CurioError};
use curio_storage::SqliteStorage;

/// Builder for seeded SQLite test environments.
#[derive(Default)]
pub struct TestHarnessBuilder {
    wishlist: Vec<NewWishlistItem>,
}

impl TestHarnessBuilder {
    /// Adds a wishlist item with a photo, named `name`.
    pub fn with_item(mut self, name: &str, price: f64) -> Self {
        self.wishlist.push(NewWishlistItem {
            name: name.to_string(),
            photo_url: format!("https://img.example.com/{}.jpg", name.to_lowercase()),
            price: Some(price),
            ..Default::default()
        });
        self
    }

    pub fn with_new_item(mut self, item: NewWishlistItem) -> Self {
        self.wishlist.push(item);
        self
    }

    /// Opens the database, runs migrations and inserts the seeded items.
    pub async fn build(self) -> Result<TestHarness, CurioError> {
        let temp_dir =
            tempfile::TempDir::new().map_err(|e| CurioError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(
            StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
                wal_mode: true,
            },
            &WishlistConfig::default(),
        );
        storage.initialize().await?;

        let mut ids = Vec::with_capacity(self.wishlist.len());
        for item in &self.wishlist {
            ids.push(storage.insert_wishlist_item(item).await?);
        }

        Ok(TestHarness {
            store: Arc::new(storage),
            ids,
            _temp_dir: temp_dir,
        })
    }
}

/// A seeded store plus the ids it assigned, in insertion order.
pub struct TestHarness {
    pub store: Arc<SqliteStorage>,
    pub ids: Vec<String>,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }
}
