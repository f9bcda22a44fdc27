use std::sync::Arc;

use shared_config::AppConfig;
use shared_database::Database;

/// State handed to every cell router. The entry point owns the store's lifecycle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }
}
