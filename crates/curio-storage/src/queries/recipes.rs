// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recipe box queries.

use curio_core::CurioError;
use curio_core::models::{NewRecipe, Recipe};
use rusqlite::params;

use crate::database::{Database, map_tr_err};
use crate::mapping::{RECIPE_COLUMNS, now_rfc3339, recipe_from_row};
use crate::queries::{expect_one, require_non_empty};

pub async fn fetch_recipes(db: &Database) -> Result<Vec<Recipe>, CurioError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY created_at DESC, rowid DESC"
            ))?;
            let rows = stmt.query_map([], recipe_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn insert_recipe(db: &Database, recipe: &NewRecipe) -> Result<String, CurioError> {
    require_non_empty("title", &recipe.title)?;

    let id = uuid::Uuid::new_v4().to_string();
    let row_id = id.clone();
    let recipe = recipe.clone();
    let ingredients = serde_json::to_string(&recipe.ingredients)
        .map_err(|e| CurioError::Internal(format!("failed to encode ingredients: {e}")))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO recipes (id, title, ingredients, method, image, source_url, rating, \
                 difficulty, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    row_id,
                    recipe.title.trim(),
                    ingredients,
                    recipe.method,
                    recipe.image,
                    recipe.source_url,
                    recipe.rating,
                    recipe.difficulty.map(|d| d.to_string()),
                    now_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

    Ok(id)
}

/// Sets or clears the 1 to 5 star rating.
pub async fn update_recipe_rating(
    db: &Database,
    id: &str,
    rating: Option<u8>,
) -> Result<(), CurioError> {
    if let Some(r) = rating
        && !(1..=5).contains(&r)
    {
        return Err(CurioError::InvalidInput(format!(
            "rating must be between 1 and 5, got {r}"
        )));
    }

    let row_id = id.to_string();
    let changed = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE recipes SET rating = ?1 WHERE id = ?2",
                params![rating, row_id],
            )
        })
        .await
        .map_err(map_tr_err)?;
    expect_one(changed, "recipe", id)
}
