// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Curio.
//!
//! WAL-mode SQLite with embedded migrations and a single-writer model via
//! `tokio-rusqlite`. Rows are mapped to domain models leniently, see
//! [`mapping`].

pub mod adapter;
pub mod database;
pub mod mapping;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
pub use mapping::{MappingDefaults, WishlistRow};
