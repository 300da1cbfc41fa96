//! Shared application state for all routes.

use crate::config::KindRegistry;
use crate::error::ConfigError;
use crate::store::Storage;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub kinds: Arc<KindRegistry>,
}

impl AppState {
    /// State over the standard kind table.
    pub fn new(storage: Arc<dyn Storage>) -> Result<Self, ConfigError> {
        Ok(AppState {
            storage,
            kinds: Arc::new(KindRegistry::standard()?),
        })
    }
}
