use std::sync::Arc;
use storytel_core::{Config, StorytelProvider};

/// Shared application state
pub struct AppState {
    config: Config,
    provider: Arc<StorytelProvider>,
}

impl AppState {
    pub fn new(config: Config, provider: Arc<StorytelProvider>) -> Self {
        Self { config, provider }
    }

    pub fn provider(&self) -> &StorytelProvider {
        self.provider.as_ref()
    }

    /// Locale used by the locale-less search route.
    pub fn default_locale(&self) -> &str {
        &self.config.catalog.default_locale
    }
}
