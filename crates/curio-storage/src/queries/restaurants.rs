// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Restaurant list queries.

use curio_core::CurioError;
use curio_core::models::{NewRestaurant, Restaurant, RestaurantStatus};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::mapping::{RESTAURANT_COLUMNS, now_rfc3339, restaurant_from_row};
use crate::queries::{expect_one, require_non_empty};

pub async fn fetch_restaurants(db: &Database) -> Result<Vec<Restaurant>, CurioError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RESTAURANT_COLUMNS} FROM restaurants ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt.query_map([], restaurant_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn insert_restaurant(
    db: &Database,
    restaurant: &NewRestaurant,
) -> Result<String, CurioError> {
    require_non_empty("name", &restaurant.name)?;

    let id = uuid::Uuid::new_v4().to_string();
    let row_id = id.clone();
    let r = restaurant.clone();
    let tags = serde_json::to_string(&r.tags)
        .map_err(|e| CurioError::Internal(format!("failed to encode tags: {e}")))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO restaurants (id, name, location, cuisine, price_range, rating, \
                 review, booking_url, status, tags, image, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                params![
                    row_id,
                    r.name.trim(),
                    r.location,
                    r.cuisine,
                    r.price_range,
                    r.rating,
                    r.review,
                    r.booking_url,
                    r.status.to_string(),
                    tags,
                    r.image,
                    now_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(id)
}

pub async fn update_restaurant_status(
    db: &Database,
    id: &str,
    status: RestaurantStatus,
) -> Result<(), CurioError> {
    let row_id = id.to_string();
    let changed = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE restaurants SET status = ?1 WHERE id = ?2",
                params![status.to_string(), row_id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    expect_one(changed, "restaurant", id)
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

    #[tokio::test]
    async fn insert_defaults_to_wishlist_and_can_be_marked_visited() {
        let (db, _dir) = setup_db().await;
        let id = insert_restaurant(
            &db,
            &NewRestaurant {
                name: "Bocca di Lupo".into(),
                cuisine: Some("Italian".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let before = fetch_restaurants(&db).await.unwrap();
        assert_eq!(before[0].status, RestaurantStatus::Wishlist);
        assert_eq!(before[0].cuisine.as_deref(), Some("Italian"));

        update_restaurant_status(&db, &id, RestaurantStatus::Visited)
            .await
            .unwrap();
        let after = fetch_restaurants(&db).await.unwrap();
        assert_eq!(after[0].status, RestaurantStatus::Visited);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (db, _dir) = setup_db().await;
        let err = insert_restaurant(&db, &NewRestaurant::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CurioError::InvalidInput(_)));
        db.close().await.unwrap();
    }
}
