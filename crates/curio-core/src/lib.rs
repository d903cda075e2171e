// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Curio, a personal multi-list curation service.
//!
//! This crate provides the error type, the domain models (wishlist, media,
//! restaurants, recipes) and the adapter traits that the store, enrichment
//! and controller crates build on.

pub mod error;
pub mod models;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CurioError;
pub use types::{AdapterType, HealthStatus, Identity};

pub use traits::{
    CurationStore, EnrichmentAdapter, IdentityProvider, PluginAdapter, StaticIdentity,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curio_error_has_all_variants() {
        let _config = CurioError::Config("test".into());
        let _storage = CurioError::storage(std::io::Error::other("test"));
        let _not_found = CurioError::not_found("wishlist item", "42");
        let _enrichment = CurioError::Enrichment {
            message: "test".into(),
            source: None,
        };
        let _unauthorized = CurioError::Unauthorized("test".into());
        let _invalid = CurioError::InvalidInput("test".into());
        let _gateway = CurioError::Gateway {
            message: "test".into(),
            source: None,
        };
        let _internal = CurioError::Internal("test".into());
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CurioError::not_found("wishlist item", "42");
        assert_eq!(err.to_string(), "wishlist item not found: 42");
    }

    #[test]
    fn adapter_type_display_roundtrip() {
        use std::str::FromStr;

        for variant in [AdapterType::Store, AdapterType::Enrichment] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn identity_handle_strips_domain() {
        assert_eq!(Identity::new("a@x.com").handle(), "a");
        assert_eq!(Identity::new("plain").handle(), "plain");
    }

    #[test]
    fn static_identity_provider() {
        assert_eq!(StaticIdentity::anonymous().current_identity(), None);
        assert_eq!(
            StaticIdentity::user("a@x.com").current_identity(),
            Some(Identity::new("a@x.com"))
        );
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_store<T: CurationStore>() {}
        fn _assert_enrichment<T: EnrichmentAdapter>() {}
        fn _assert_identity<T: IdentityProvider>() {}
    }
}
