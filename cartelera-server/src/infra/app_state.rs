use std::sync::Arc;

use tokio::sync::Mutex;

use cartelera_core::CatalogStore;

use crate::infra::config::Config;

/// Shared application state, constructed once at startup and injected into
/// handlers through axum's `State` extractor.
///
/// The catalog mutex is the single mutual-exclusion boundary around the
/// store: each read-modify-write-persist cycle holds it for its whole
/// duration, so concurrent requests cannot interleave map mutations or file
/// writes.
#[derive(Debug, Clone)]
pub struct AppState {
    pub catalog: Arc<Mutex<CatalogStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(catalog: CatalogStore, config: Config) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            config: Arc::new(config),
        }
    }
}
