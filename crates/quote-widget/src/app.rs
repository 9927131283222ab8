//! Wiring from configuration to a running sync engine.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use quote_config::{WidgetConfig, validate_config};
use quote_core::OutputFormat;
use quote_remote::{HttpRemoteSource, NoopSource, RemoteSource};
use quote_store::{FileKvStore, LocalStore};
use quote_sync::{SharedStore, SyncEngine};
use tracing::{debug, info};

use crate::console::ConsoleNotifier;

/// Load the config file, validate it and apply command-line directory overrides.
pub(crate) fn load_config(
    path: Option<&Path>,
    data_dir: Option<PathBuf>,
    session_dir: Option<PathBuf>,
) -> Result<WidgetConfig> {
    let mut config = match path {
        Some(path) => WidgetConfig::load_from(path)?,
        None => WidgetConfig::load()?,
    };
    validate_config(&config).context("Invalid configuration")?;

    if data_dir.is_some() {
        config.storage.data_dir = data_dir;
    }
    if session_dir.is_some() {
        config.storage.session_dir = session_dir;
    }
    Ok(config)
}

pub(crate) struct App {
    pub config: WidgetConfig,
    pub engine: Arc<SyncEngine>,
    pub notifier: Arc<ConsoleNotifier>,
    pub format: OutputFormat,
}

impl App {
    pub(crate) fn open(config: WidgetConfig, format: OutputFormat) -> Result<Self> {
        let data_dir = config.data_dir();
        let session_dir = config.session_dir();
        debug!(
            data_dir = %data_dir.display(),
            session_dir = %session_dir.display(),
            "opening quote store"
        );
        let store = LocalStore::open(FileKvStore::new(data_dir), FileKvStore::new(session_dir));

        let remote: Arc<dyn RemoteSource> = if config.sync.enabled {
            Arc::new(HttpRemoteSource::from_config(&config.remote)?)
        } else {
            info!("sync disabled in config, server will not be contacted");
            Arc::new(NoopSource)
        };

        let notifier = Arc::new(ConsoleNotifier::new(format.clone()));
        let engine = Arc::new(SyncEngine::new(
            Arc::new(tokio::sync::Mutex::new(store)),
            remote,
            notifier.clone(),
        ));

        Ok(Self {
            config,
            engine,
            notifier,
            format,
        })
    }

    pub(crate) fn store(&self) -> &SharedStore {
        self.engine.store()
    }
}
