// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Curio configuration system.

use curio_config::diagnostic::ConfigError;
use curio_config::model::CurioConfig;
use curio_config::{load_and_validate_str, load_config, load_config_from_path, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[app]
name = "curio-test"
log_level = "debug"

[storage]
database_path = "/tmp/curio.db"
wal_mode = false

[anthropic]
api_key = "sk-ant-123"
max_tokens = 1024

[gateway]
host = "0.0.0.0"
port = 8080

[[gateway.users]]
token = "secret-a"
email = "a@example.com"

[[gateway.users]]
token = "secret-b"
email = "b@example.com"

[triage]
distance_threshold = 80.0
velocity_threshold = 400.0
stack_depth = 2

[wishlist]
currency = "$"
default_category = "Misc"
budget_threshold = 25.0
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "curio-test");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/curio.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.anthropic.max_tokens, 1024);
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.users.len(), 2);
    assert_eq!(config.gateway.users[1].email, "b@example.com");
    assert_eq!(config.triage.stack_depth, 2);
    assert_eq!(config.wishlist.currency, "$");
    assert_eq!(config.wishlist.budget_threshold, 25.0);
}

#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML is valid");
    assert_eq!(config, CurioConfig::default());
    assert_eq!(config.app.name, "curio");
    assert_eq!(config.triage.distance_threshold, 100.0);
    assert_eq!(config.triage.velocity_threshold, 500.0);
    assert_eq!(config.triage.stack_depth, 4);
    assert_eq!(config.wishlist.currency, "£");
    assert_eq!(config.wishlist.default_category, "General");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert!(config.gateway.users.is_empty());
    assert!(config.storage.wal_mode);
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let err = load_config_from_str("[telegram]\nbot_token = \"x\"\n")
        .expect_err("unknown section should fail");
    assert!(format!("{err}").contains("telegram"));
}

#[test]
fn typo_produces_suggestion_and_valid_keys() {
    let toml = r#"
[triage]
stack_dept = 3
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, span, .. } if {
            key == "stack_dept"
                && suggestion.as_deref() == Some("stack_depth")
                && valid_keys.contains("velocity_threshold")
                && span.is_some()
        })
    });
    assert!(found, "expected UnknownKey for stack_dept, got: {errors:?}");
}

#[test]
fn invalid_type_is_reported() {
    let toml = r#"
[gateway]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got: {errors:?}"
    );
}

#[test]
fn validation_errors_surface_through_load_and_validate() {
    let toml = r#"
[triage]
distance_threshold = -1.0

[wishlist]
budget_threshold = -5.0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

#[test]
fn user_missing_email_is_a_missing_key() {
    let toml = r#"
[[gateway.users]]
token = "abc"
"#;

    let errors = load_and_validate_str(toml).expect_err("email is required");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::MissingKey { key } if key == "email")),
        "got: {errors:?}"
    );
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "prot".to_string(),
        suggestion: Some("port".to_string()),
        valid_keys: "host, port, users".to_string(),
        span: None,
        src: None,
    };

    let help = error.help().expect("help text").to_string();
    assert!(help.contains("did you mean `port`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("prot"));
}

#[test]
fn load_from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("curio.toml");
    std::fs::write(&path, "[app]\nname = \"from-file\"\n").unwrap();

    let config = load_config_from_path(&path).expect("file should load");
    assert_eq!(config.app.name, "from-file");
}

#[test]
fn env_overrides_local_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "curio.toml",
            r#"
[triage]
stack_depth = 3

[wishlist]
default_category = "Home"
"#,
        )?;
        jail.set_env("CURIO_TRIAGE_STACK_DEPTH", "2");
        jail.set_env("CURIO_GATEWAY_PORT", "9090");

        let config = load_config()?;
        assert_eq!(config.triage.stack_depth, 2);
        assert_eq!(config.gateway.port, 9090);
        assert_eq!(config.wishlist.default_category, "Home");
        Ok(())
    });
}
