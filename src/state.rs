use std::{path::PathBuf, sync::Arc};

use sqlx::PgPool;

use crate::config::Config;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub upload_dir: PathBuf,
    pub api_tokens: Arc<Vec<String>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            upload_dir: config.upload_dir.clone(),
            api_tokens: Arc::new(config.api_tokens.clone()),
        }
    }
}
