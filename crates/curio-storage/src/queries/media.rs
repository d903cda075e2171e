// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Media library queries.

use curio_core::CurioError;
use curio_core::models::{MediaItem, MediaStatus, NewMediaItem};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::mapping::{MEDIA_COLUMNS, media_from_row, now_rfc3339};
use crate::queries::{expect_one, require_non_empty};

/// Newest first.
pub async fn fetch_media(db: &Database) -> Result<Vec<MediaItem>, CurioError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MEDIA_COLUMNS} FROM media ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt.query_map([], media_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn insert_media(db: &Database, item: &NewMediaItem) -> Result<String, CurioError> {
    require_non_empty("title", &item.title)?;

    let id = uuid::Uuid::new_v4().to_string();
    let row_id = id.clone();
    let item = item.clone();
    let tags = serde_json::to_string(&item.tags)
        .map_err(|e| CurioError::Internal(format!("failed to encode tags: {e}")))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO media (id, title, kind, status, url, image, tags, rating, review, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    row_id,
                    item.title.trim(),
                    item.kind.to_string(),
                    item.status.to_string(),
                    item.url,
                    item.image,
                    tags,
                    item.rating,
                    item.review,
                    now_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(id)
}

pub async fn update_media_status(
    db: &Database,
    id: &str,
    status: MediaStatus,
) -> Result<(), CurioError> {
    let row_id = id.to_string();
    let changed = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE media SET status = ?1 WHERE id = ?2",
                params![status.to_string(), row_id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    expect_one(changed, "media item", id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_core::models::MediaKind;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    fn book(title: &str) -> NewMediaItem {
        NewMediaItem {
            title: title.to_string(),
            kind: MediaKind::Book,
            status: MediaStatus::Queued,
            url: None,
            image: None,
            tags: vec!["sci-fi".into()],
            rating: Some(5),
            review: None,
        }
    }

    #[tokio::test]
    async fn insert_fetch_and_advance_status() {
        let (db, _dir) = setup_db().await;
        let id = insert_media(&db, &book("Dune")).await.unwrap();

        update_media_status(&db, &id, MediaStatus::Reading)
            .await
            .unwrap();

        let items = fetch_media(&db).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Dune");
        assert_eq!(items[0].status, MediaStatus::Reading);
        assert_eq!(items[0].tags, vec!["sci-fi"]);
        assert_eq!(items[0].rating, Some(5));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_status_text_falls_back_to_queued() {
        let (db, _dir) = setup_db().await;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO media (id, title, kind, status, tags) \
                     VALUES ('m1', 'Heat', 'Movie', 'abandoned', '{broken')",
                    [],
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let items = fetch_media(&db).await.unwrap();
        assert_eq!(items[0].kind, MediaKind::Movie);
        assert_eq!(items[0].status, MediaStatus::Queued);
        assert!(items[0].tags.is_empty());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn status_update_for_missing_row_is_not_found() {
        let (db, _dir) = setup_db().await;
        let err = update_media_status(&db, "ghost", MediaStatus::Finished)
            .await
            .unwrap_err();
        assert!(matches!(err, CurioError::NotFound { .. }));
        db.close().await.unwrap();
    }
}
