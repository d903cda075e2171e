// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Curio - a personal curation app for wishlists, media, restaurants and
//! recipes.
//!
//! This is the binary entry point.

mod serve;
mod triage;

use clap::{Parser, Subcommand};

use curio_config::model::CurioConfig;

/// Crate targets the default log filter covers.
const LOG_TARGETS: &[&str] = &[
    "curio",
    "curio_core",
    "curio_config",
    "curio_storage",
    "curio_curation",
    "curio_anthropic",
    "curio_gateway",
];

/// Curio - a personal curation app.
#[derive(Parser, Debug)]
#[command(name = "curio", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API.
    Serve,
    /// Swipe through the wishlist in the terminal.
    Triage,
    /// Print the effective configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match curio_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            curio_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Triage) => triage::run_triage(config).await,
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("curio: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn print_config(config: &CurioConfig) -> Result<(), curio_core::CurioError> {
    let rendered = render_config(config)?;
    print!("{rendered}");
    Ok(())
}

/// Serializes the config with the API key masked.
fn render_config(config: &CurioConfig) -> Result<String, curio_core::CurioError> {
    let mut shown = config.clone();
    if shown.anthropic.api_key.is_some() {
        shown.anthropic.api_key = Some("********".to_string());
    }
    for user in &mut shown.gateway.users {
        user.token = "********".to_string();
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| curio_core::CurioError::Internal(format!("failed to render config: {e}")))
}

fn default_filter(log_level: &str) -> String {
    let mut directives: Vec<String> = LOG_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Installs the fmt subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use curio_config::model::GatewayUser;

    #[test]
    fn binary_loads_config_defaults() {
        let config = curio_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.app.name, "curio");
    }

    #[test]
    fn default_filter_covers_every_crate() {
        let filter = default_filter("debug");
        assert!(filter.starts_with("curio=debug,"));
        assert!(filter.contains("curio_gateway=debug"));
        assert!(filter.ends_with(",warn"));
    }

    #[test]
    fn rendered_config_masks_secrets() {
        let mut config = CurioConfig::default();
        config.anthropic.api_key = Some("sk-secret".to_string());
        config.gateway.users.push(GatewayUser {
            token: "tok-secret".to_string(),
            email: "a@x.com".to_string(),
        });

        let rendered = render_config(&config).unwrap();
        assert!(!rendered.contains("sk-secret"));
        assert!(!rendered.contains("tok-secret"));
        assert!(rendered.contains("a@x.com"));
        assert!(rendered.contains("[triage]"));
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["curio", "triage"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Triage)));
        assert!(Cli::try_parse_from(["curio", "shell"]).is_err());
    }
}
