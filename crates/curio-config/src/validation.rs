// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks that serde attributes cannot express.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::CurioConfig;

/// Largest supported number of cards behind the triage head.
pub const MAX_STACK_DEPTH: usize = 10;

/// Validates a deserialized configuration.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &CurioConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "storage.database_path must not be empty",
        ));
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::validation("gateway.host must not be empty"));
    }

    let mut seen = HashSet::new();
    for (i, user) in config.gateway.users.iter().enumerate() {
        if user.token.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "gateway.users[{i}].token must not be empty"
            )));
        } else if !seen.insert(user.token.as_str()) {
            errors.push(ConfigError::validation(format!(
                "gateway.users[{i}].token duplicates an earlier entry"
            )));
        }
        if user.email.trim().is_empty() {
            errors.push(ConfigError::validation(format!(
                "gateway.users[{i}].email must not be empty"
            )));
        }
    }

    let triage = &config.triage;
    if !is_positive(triage.distance_threshold) {
        errors.push(ConfigError::validation(format!(
            "triage.distance_threshold must be positive, got {}",
            triage.distance_threshold
        )));
    }
    if !is_positive(triage.velocity_threshold) {
        errors.push(ConfigError::validation(format!(
            "triage.velocity_threshold must be positive, got {}",
            triage.velocity_threshold
        )));
    }
    if triage.stack_depth > MAX_STACK_DEPTH {
        errors.push(ConfigError::validation(format!(
            "triage.stack_depth must be at most {MAX_STACK_DEPTH}, got {}",
            triage.stack_depth
        )));
    }

    let budget = config.wishlist.budget_threshold;
    if budget.is_nan() || budget < 0.0 {
        errors.push(ConfigError::validation(format!(
            "wishlist.budget_threshold must be non-negative, got {budget}"
        )));
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::validation(
            "anthropic.max_tokens must be greater than zero",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GatewayUser;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&CurioConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = CurioConfig::default();
        config.storage.database_path = " ".into();
        config.triage.velocity_threshold = 0.0;
        config.triage.stack_depth = 11;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn nan_threshold_is_rejected() {
        let mut config = CurioConfig::default();
        config.triage.distance_threshold = f64::NAN;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn duplicate_tokens_are_rejected() {
        let mut config = CurioConfig::default();
        config.gateway.users = vec![
            GatewayUser {
                token: "t".into(),
                email: "a@x.com".into(),
            },
            GatewayUser {
                token: "t".into(),
                email: "b@x.com".into(),
            },
        ];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("duplicates"));
    }
}
