// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Curio.

use thiserror::Error;

/// The primary error type used across all Curio adapter traits and core operations.
#[derive(Debug, Error)]
pub enum CurioError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A point update or lookup addressed a record that does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// AI enrichment errors (API failure, schema mismatch, unparseable output).
    #[error("enrichment error: {message}")]
    Enrichment {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The operation needs an authenticated identity and none was supplied.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller-supplied input was rejected before reaching a collaborator.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// HTTP gateway errors (bind failure, server error).
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CurioError {
    /// Shorthand for a [`CurioError::NotFound`] on the given entity kind.
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Wraps any error as a storage failure.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage {
            source: Box::new(err),
        }
    }
}
