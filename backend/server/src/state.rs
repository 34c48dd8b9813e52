use std::sync::Arc;

use super::{
    config::Config,
    inference::{GeminiClient, InferenceClient},
};

/// Shared, read-only for the lifetime of the server.
pub struct AppState {
    pub config: Config,
    pub classifier: Arc<dyn InferenceClient>,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let classifier = Arc::new(GeminiClient::new(&config));

        Self::with_classifier(config, classifier)
    }

    pub fn with_classifier(config: Config, classifier: Arc<dyn InferenceClient>) -> Arc<Self> {
        Arc::new(Self { config, classifier })
    }
}
