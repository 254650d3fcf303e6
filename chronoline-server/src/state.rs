//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::db::PersonDb;
use crate::error::ApiError;

/// State shared across request handlers
pub struct AppState {
    pub config: Config,
    pub db: PersonDb,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Open the database named by the config
    pub fn new(config: Config) -> Result<SharedState, ApiError> {
        let db = PersonDb::open(&config.db_path())?;
        Ok(Arc::new(Self { config, db }))
    }

    /// In-memory state for tests
    pub fn in_memory(config: Config) -> Result<SharedState, ApiError> {
        let db = PersonDb::open_in_memory()?;
        Ok(Arc::new(Self { config, db }))
    }
}
