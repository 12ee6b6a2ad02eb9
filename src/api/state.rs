use std::sync::Arc;

use crate::config::AppConfig;
use crate::fetch::SourceSet;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sources: SourceSet,
}

impl AppState {
    pub fn new(config: AppConfig, sources: SourceSet) -> Self {
        Self {
            config: Arc::new(config),
            sources,
        }
    }
}
