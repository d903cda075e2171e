// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules, one per table.

pub mod media;
pub mod recipes;
pub mod restaurants;
pub mod wishlist;

use curio_core::CurioError;

/// Turns an affected-row count from a point update into `NotFound` when
/// nothing matched.
pub(crate) fn expect_one(changed: usize, entity: &str, id: &str) -> Result<(), CurioError> {
    if changed == 0 {
        Err(CurioError::not_found(entity, id))
    } else {
        Ok(())
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), CurioError> {
    if value.trim().is_empty() {
        Err(CurioError::InvalidInput(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}
