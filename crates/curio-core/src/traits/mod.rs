// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Store and enrichment adapters extend the [`PluginAdapter`] base trait and
//! use `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod enrichment;
pub mod identity;
pub mod store;

pub use adapter::PluginAdapter;
pub use enrichment::EnrichmentAdapter;
pub use identity::{IdentityProvider, StaticIdentity};
pub use store::CurationStore;
