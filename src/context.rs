use crate::config::AppConfig;
use crate::db::CustomerStore;

/// Process-scoped state built once in `main` and handed to the screens.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub store: CustomerStore,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let store = CustomerStore::new(config.database_path.clone());
        Self { config, store }
    }
}
