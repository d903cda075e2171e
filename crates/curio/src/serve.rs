// SPDX-FileCopyrightText: 2026 Curio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `curio serve` command implementation.
//!
//! Opens the SQLite store, enables enrichment when an Anthropic key is
//! available, and runs the gateway until ctrl-c.

use std::sync::Arc;

use tracing::{info, warn};

use curio_anthropic::AnthropicEnricher;
use curio_config::model::CurioConfig;
use curio_core::{CurationStore, CurioError, PluginAdapter};
use curio_curation::TriageSettings;
use curio_gateway::{AuthConfig, GatewayState, ServerConfig, start_server};
use curio_storage::SqliteStorage;

/// Builds the gateway state for a store that is already initialized.
pub fn gateway_state(config: &CurioConfig, store: Arc<dyn CurationStore>) -> GatewayState {
    let auth = AuthConfig::from_users(&config.gateway.users);
    info!(users = auth.user_count(), "gateway identities loaded");

    let state = GatewayState::new(store, auth)
        .with_triage(TriageSettings::from(&config.triage))
        .with_budget_threshold(config.wishlist.budget_threshold);

    match AnthropicEnricher::new(&config.anthropic) {
        Ok(enricher) => {
            info!(model = %config.anthropic.default_model, "enrichment enabled");
            state.with_enricher(Arc::new(enricher))
        }
        Err(e) => {
            warn!(error = %e, "enrichment disabled");
            state
        }
    }
}

/// Runs the `curio serve` command.
pub async fn run_serve(config: CurioConfig) -> Result<(), CurioError> {
    info!("starting curio serve");

    let storage = Arc::new(SqliteStorage::new(
        config.storage.clone(),
        &config.wishlist,
    ));
    storage.initialize().await?;
    info!(path = %config.storage.database_path, "store opened");

    let state = gateway_state(&config, storage.clone());
    let server = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    let result = start_server(&server, state).await;
    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "store shutdown failed");
    }
    result
}
