//! Application wiring.

use std::sync::Arc;

use anyhow::{Context, Result};
use textbook_core::backend::TextbookBackend;
use textbook_core::config::{BackendEndpoint, RootConfig};
use textbook_core::profile::ProfileStore;
use textbook_core::session::SessionNotifier;
use textbook_infrastructure::{ConfigService, FileSlot, TextbookPaths};
use textbook_interaction::HttpBackend;

/// Everything a command needs, built once per process.
///
/// There is exactly one store, one notifier and one backend; commands
/// receive them from here instead of constructing their own.
pub struct AppContext {
    pub paths: TextbookPaths,
    pub config: RootConfig,
    pub endpoint: BackendEndpoint,
    pub store: ProfileStore,
    pub notifier: SessionNotifier,
    pub backend: Arc<dyn TextbookBackend>,
}

impl AppContext {
    /// Reads `config.toml` and the environment, and wires the file-backed
    /// store and HTTP backend.
    pub fn load(paths: TextbookPaths) -> Result<Self> {
        let config_service = ConfigService::new(paths.config_file());
        let (config, endpoint) = config_service
            .resolve()
            .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;

        let slot = Arc::new(FileSlot::new(paths.slots_dir()));
        let store = ProfileStore::with_key(slot, config.storage.profile_key.clone());
        let backend: Arc<dyn TextbookBackend> = Arc::new(HttpBackend::new(endpoint.clone()));

        Ok(Self {
            paths,
            config,
            endpoint,
            store,
            notifier: SessionNotifier::new(),
            backend,
        })
    }
}
