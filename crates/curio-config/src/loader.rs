// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered config loading with Figment.
//!
//! Lookup order: `./curio.toml` > `~/.config/curio/curio.toml` >
//! `/etc/curio/curio.toml`, then `CURIO_*` environment overrides.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CurioConfig;

pub(crate) const SYSTEM_CONFIG: &str = "/etc/curio/curio.toml";
pub(crate) const LOCAL_CONFIG: &str = "curio.toml";

pub(crate) fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("curio").join("curio.toml"))
}

/// Loads the full hierarchy. Later layers override earlier ones:
/// compiled defaults, system file, user file, local file, environment.
pub fn load_config() -> Result<CurioConfig, figment::Error> {
    build_figment().extract()
}

/// Loads defaults plus the given TOML text only. No files, no environment.
pub fn load_config_from_str(toml_content: &str) -> Result<CurioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CurioConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads one explicit file with environment overrides applied on top.
pub fn load_config_from_path(path: &Path) -> Result<CurioConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CurioConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The unextracted hierarchy, for callers that want provider metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CurioConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(env_provider())
}

const SECTIONS: [&str; 6] = ["app", "storage", "anthropic", "gateway", "triage", "wishlist"];

/// Maps `CURIO_<SECTION>_<KEY>` onto `section.key`.
///
/// Only the first underscore after a known section prefix becomes a dot,
/// so `CURIO_TRIAGE_STACK_DEPTH` lands on `triage.stack_depth`.
fn env_provider() -> Env {
    Env::prefixed("CURIO_").map(|key| env_key(key.as_str()).into())
}

/// Figment hands over the key in its original case.
fn env_key(raw: &str) -> String {
    let key = raw.to_ascii_lowercase();
    SECTIONS
        .iter()
        .find_map(|section| {
            key.strip_prefix(section)
                .and_then(|rest| rest.strip_prefix('_'))
                .map(|rest| format!("{section}.{rest}"))
        })
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections_case_insensitively() {
        assert_eq!(env_key("TRIAGE_STACK_DEPTH"), "triage.stack_depth");
        assert_eq!(env_key("gateway_port"), "gateway.port");
        assert_eq!(env_key("ANTHROPIC_API_KEY"), "anthropic.api_key");
        assert_eq!(env_key("UNKNOWN_THING"), "unknown_thing");
    }

    #[test]
    fn env_override_loads_through_full_hierarchy() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("CURIO_TRIAGE_STACK_DEPTH", "2");
            jail.set_env("CURIO_APP_LOG_LEVEL", "debug");
            let config = load_config()?;
            assert_eq!(config.triage.stack_depth, 2);
            assert_eq!(config.app.log_level, "debug");
            Ok(())
        });
    }
}
