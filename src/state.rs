use crate::cache::AppCache;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::Settings;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub cache: Arc<AppCache>,
}

impl AppState {
    pub fn new(db: DbPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            cache: Arc::new(AppCache::new()),
        }
    }

    pub fn load_settings(&self) -> AppResult<Settings> {
        self.cache.load_settings(&self.db)
    }
}
