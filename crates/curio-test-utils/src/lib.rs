// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Curio.
//!
//! # Components
//!
//! - [`MemoryStore`] - In-memory store with call counters, failure switch and update gate
//! - [`MockEnricher`] - Enrichment adapter with deterministic answers
//! - [`TestHarness`] - Seeded SQLite store in a temp directory
//! - [`fixtures`] - Ready-made wishlist items and enrichment values

pub mod fixtures;
pub mod harness;
pub mod memory_store;
pub mod mock_enricher;

pub use harness::TestHarness;
pub use memory_store::{MemoryStore, UpdateGate};
pub use mock_enricher::MockEnricher;
