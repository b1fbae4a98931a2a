//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration
//! - Load the inventory and the threshold settings
//! - Start background tasks (settings watcher, metrics)
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Subsystems initialize in order, not concurrently
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::validation::validate_config;
use crate::config::watcher::SettingsWatcher;
use crate::config::{ConfigError, OptimizerConfig};
use crate::http::{AppState, HttpServer};
use crate::inventory::{DatasetError, DatasetLoader, loader_for};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::threshold::{EnvThreshold, SettingsStore};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to load inventory: {0}")]
    Dataset(#[from] DatasetError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to watch settings file: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// A fully initialized service, ready to bind.
pub struct Service {
    config: OptimizerConfig,
    state: AppState,
    settings: Arc<SettingsStore>,
}

impl Service {
    /// Initialize every subsystem from configuration.
    pub fn from_config(config: OptimizerConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(|errs| StartupError::Config(ConfigError::Validation(errs)))?;

        let dataset = loader_for(&config.inventory).load()?;
        tracing::info!(
            source = ?config.inventory.source,
            groups = dataset.len(),
            endpoints = dataset.endpoint_count(),
            "Inventory loaded"
        );

        let settings = Arc::new(SettingsStore::load(
            config.threshold.env_file.as_ref().map(PathBuf::from),
        ));
        let threshold = Arc::new(EnvThreshold::new(&config.threshold, settings.clone()));

        let error_status = StatusCode::from_u16(config.api.error_status).unwrap_or(StatusCode::OK);
        let state = AppState::new(Arc::new(dataset), threshold).with_error_status(error_status);

        Ok(Self {
            config,
            state,
            settings,
        })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Bind the configured address and serve until `shutdown` fires.
    pub async fn run(self, shutdown: &Shutdown) -> Result<(), StartupError> {
        let address = self.config.listener.bind_address.clone();
        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind { address, source })?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` fires.
    pub async fn serve(self, listener: TcpListener, shutdown: &Shutdown) -> Result<(), StartupError> {
        let signal = shutdown.subscribe();

        let _watcher = if self.config.threshold.watch {
            match SettingsWatcher::new(self.settings.clone()) {
                Some(watcher) => Some(watcher.run()?),
                None => {
                    tracing::warn!("Settings watch requested but no settings file is configured");
                    None
                }
            }
        } else {
            None
        };

        let observability = &self.config.observability;
        if observability.metrics_enabled {
            if let Ok(addr) = observability.metrics_address.parse::<SocketAddr>() {
                metrics::init_metrics(addr)?;
            }
        }

        let server = HttpServer::new(&self.config, self.state);
        server.run(listener, signal).await?;
        Ok(())
    }
}
