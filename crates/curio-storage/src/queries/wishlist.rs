// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wishlist reads, inserts and field-scoped updates.

use curio_core::CurioError;
use curio_core::models::{
    Freshness, LifecycleStatus, NewWishlistItem, WishlistItem, WishlistPatch, purchase,
};
use rusqlite::params;
use rusqlite::types::Value;

use crate::database::{Database, map_tr_err};
use crate::mapping::{MappingDefaults, WishlistRow, now_rfc3339};
use crate::queries::{expect_one, require_non_empty};

/// Every row, in insertion order, mapped leniently.
pub async fn fetch_wishlist(
    db: &Database,
    defaults: &MappingDefaults,
) -> Result<Vec<WishlistItem>, CurioError> {
    let rows = db
        .connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM wishlist ORDER BY rowid",
                WishlistRow::COLUMNS
            ))?;
            let rows = stmt.query_map([], WishlistRow::from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)?;

    Ok(rows.into_iter().map(|row| row.into_item(defaults)).collect())
}

/// Inserts a new active, unclaimed item and returns its identifier.
pub async fn insert_wishlist_item(
    db: &Database,
    item: &NewWishlistItem,
    defaults: &MappingDefaults,
) -> Result<String, CurioError> {
    require_non_empty("name", &item.name)?;

    let id = uuid::Uuid::new_v4().to_string();
    let item = item.clone();
    let row_id = id.clone();
    let section = item
        .category
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| defaults.default_category.clone());
    let priority = item.priority.unwrap_or(Freshness::FALLBACK_PRIORITY);

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO wishlist (product_id, item, description, source_images, price, \
                 links, freshness, timestamp, brand, status, purchase_status, section)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    row_id,
                    item.name.trim(),
                    item.description,
                    item.photo_url,
                    item.price.map(|p| p.to_string()),
                    item.store_link,
                    priority.to_string(),
                    now_rfc3339(),
                    item.brand,
                    LifecycleStatus::Active.as_str(),
                    purchase::ACTIVE,
                    section,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(id)
}

/// Writes the `Some` fields of `patch`. Other columns are left untouched.
pub async fn update_wishlist_item(
    db: &Database,
    id: &str,
    patch: &WishlistPatch,
) -> Result<(), CurioError> {
    if patch.is_empty() {
        return Err(CurioError::InvalidInput(
            "wishlist update must change at least one field".into(),
        ));
    }

    let mut assignments = Vec::new();
    let mut values: Vec<Value> = Vec::new();
    if let Some(status) = patch.status {
        assignments.push("status");
        values.push(Value::Text(status.as_str().to_string()));
    }
    if let Some(ref purchase_status) = patch.purchase_status {
        assignments.push("purchase_status");
        values.push(Value::Text(purchase_status.clone()));
    }
    if let Some(ref claimed_by) = patch.claimed_by {
        assignments.push("claimed_user");
        values.push(match claimed_by {
            Some(email) if !email.is_empty() => Value::Text(email.clone()),
            _ => Value::Null,
        });
    }
    if let Some(ref name) = patch.name {
        assignments.push("item");
        values.push(Value::Text(name.clone()));
    }

    let set_clause = assignments
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{column} = ?{}", i + 1))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE wishlist SET {set_clause} WHERE product_id = ?{}",
        values.len() + 1
    );
    values.push(Value::Text(id.to_string()));

    let changed = db
        .connection()
        .call(move |conn| conn.execute(&sql, rusqlite::params_from_iter(values)))
        .await
        .map_err(map_tr_err)?;

    expect_one(changed, "wishlist item", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn new_item(name: &str) -> NewWishlistItem {
        NewWishlistItem {
            name: name.to_string(),
            price: Some(42.0),
            priority: Some(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_then_fetch() {
        let (db, _dir) = setup_db().await;
        let defaults = MappingDefaults::default();
        let id = insert_wishlist_item(&db, &new_item("Desk Lamp"), &defaults)
            .await
            .unwrap();

        let items = fetch_wishlist(&db, &defaults).await.unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.id, id);
        assert_eq!(item.name, "Desk Lamp");
        assert_eq!(item.price, 42.0);
        assert_eq!(item.freshness, Freshness::Hot);
        assert_eq!(item.status, LifecycleStatus::Active);
        assert_eq!(item.category, "General");
        assert!(!item.is_claimed());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn insert_rejects_blank_name() {
        let (db, _dir) = setup_db().await;
        let err = insert_wishlist_item(&db, &new_item("  "), &MappingDefaults::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CurioError::InvalidInput(_)));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn patch_writes_only_named_fields() {
        let (db, _dir) = setup_db().await;
        let defaults = MappingDefaults::default();
        let id = insert_wishlist_item(&db, &new_item("Kettle"), &defaults)
            .await
            .unwrap();

        let claim = WishlistPatch::default().claim("a@x.com");
        update_wishlist_item(&db, &id, &claim).await.unwrap();
        let purchased = WishlistPatch::default().purchase_status(purchase::PURCHASED);
        update_wishlist_item(&db, &id, &purchased).await.unwrap();

        let item = fetch_wishlist(&db, &defaults).await.unwrap().remove(0);
        assert!(item.is_claimed_by("a@x.com"));
        assert!(item.is_purchased());
        assert_eq!(item.name, "Kettle");

        update_wishlist_item(&db, &id, &WishlistPatch::default().unclaim())
            .await
            .unwrap();
        let item = fetch_wishlist(&db, &defaults).await.unwrap().remove(0);
        assert!(!item.is_claimed());
        assert!(item.is_purchased());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn repeated_update_is_idempotent() {
        let (db, _dir) = setup_db().await;
        let defaults = MappingDefaults::default();
        let id = insert_wishlist_item(&db, &new_item("Rug"), &defaults)
            .await
            .unwrap();
        let archive = WishlistPatch::default().status(LifecycleStatus::Archived);
        update_wishlist_item(&db, &id, &archive).await.unwrap();
        update_wishlist_item(&db, &id, &archive).await.unwrap();

        let item = fetch_wishlist(&db, &defaults).await.unwrap().remove(0);
        assert!(item.is_archived());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn update_missing_row_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = update_wishlist_item(&db, "nope", &WishlistPatch::default().name("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, CurioError::NotFound { .. }));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn empty_patch_is_rejected() {
        let (db, _dir) = setup_db().await;
        let err = update_wishlist_item(&db, "any", &WishlistPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CurioError::InvalidInput(_)));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn loosely_typed_rows_still_map() {
        let (db, _dir) = setup_db().await;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO wishlist (product_id, item, price, freshness, status, claimed_user)
                     VALUES ('legacy', NULL, 19.99, 'n/a', 'Archived', '')",
                    [],
                )?;
                conn.execute("INSERT INTO wishlist (item) VALUES ('Orphan')", [])?;
                Ok(())
            })
            .await
            .unwrap();

        let items = fetch_wishlist(&db, &MappingDefaults::default())
            .await
            .unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Unknown Item");
        assert_eq!(items[0].price, 19.99);
        assert_eq!(items[0].freshness, Freshness::Warm);
        assert!(items[0].is_archived());
        assert_eq!(items[0].purchase_status, purchase::INACTIVE);
        assert_eq!(items[0].claimed_by, None);
        assert!(items[1].id.starts_with("local-"));
        db.close().await.unwrap();
    }
}
