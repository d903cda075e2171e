// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model for Curio.
//!
//! Every section rejects unrecognized keys so typos fail at startup instead
//! of being silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Curio configuration. All sections are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CurioConfig {
    #[serde(default)]
    pub app: AppConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    /// Enrichment model settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// HTTP API settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Swipe deck thresholds and stack depth.
    #[serde(default)]
    pub triage: TriageConfig,

    /// Wishlist display defaults.
    #[serde(default)]
    pub wishlist: WishlistConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Default tracing level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_app_name() -> String {
    "curio".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("curio").join("curio.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("curio.db"))
        .display()
        .to_string()
}

fn default_wal_mode() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// API key. Falls back to `ANTHROPIC_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub default_model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Value of the `anthropic-version` header.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer tokens mapped to signed-in identities. Requests without a
    /// known token are served anonymously.
    #[serde(default)]
    pub users: Vec<GatewayUser>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            users: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayUser {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TriageConfig {
    /// Horizontal drag distance (px) past which a release commits.
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,

    /// Horizontal release velocity (px/s) past which a release commits.
    #[serde(default = "default_velocity_threshold")]
    pub velocity_threshold: f64,

    /// Cards rendered behind the head card.
    #[serde(default = "default_stack_depth")]
    pub stack_depth: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            distance_threshold: default_distance_threshold(),
            velocity_threshold: default_velocity_threshold(),
            stack_depth: default_stack_depth(),
        }
    }
}

fn default_distance_threshold() -> f64 {
    100.0
}

fn default_velocity_threshold() -> f64 {
    500.0
}

fn default_stack_depth() -> usize {
    4
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WishlistConfig {
    /// Currency symbol attached to every price.
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Category for rows with none.
    #[serde(default = "default_category")]
    pub default_category: String,

    /// Upper bound used by the "under budget" grid filter.
    #[serde(default = "default_budget_threshold")]
    pub budget_threshold: f64,
}

impl Default for WishlistConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            default_category: default_category(),
            budget_threshold: default_budget_threshold(),
        }
    }
}

fn default_currency() -> String {
    "£".to_string()
}

fn default_category() -> String {
    "General".to_string()
}

fn default_budget_threshold() -> f64 {
    50.0
}
