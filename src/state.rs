// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::completion::{CompletionGateway, CompletionProvider, OpenAiProvider};
use crate::services::fallback::{FallbackTable, FallbackTableError};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub gateway: CompletionGateway,
}

impl AppState {
    pub fn new(gateway: CompletionGateway) -> Self {
        Self { gateway }
    }

    pub fn from_config(config: &Config) -> Result<Self, FallbackTableError> {
        let fallback = match &config.fallback_table_path {
            Some(path) => FallbackTable::load(path)?,
            None => FallbackTable::builtin(),
        };

        if config.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; chat will answer from the fallback table only");
        }

        let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiProvider::new(
            &config.openai_base_url,
            config.openai_api_key.clone(),
        ));

        Ok(Self::new(CompletionGateway::new(
            provider,
            fallback,
            config.openai_model.clone(),
            config.completion_timeout,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_api_key() {
        let state = AppState::from_config(&Config::default()).unwrap();
        assert_eq!(state.gateway.fallback(), &FallbackTable::builtin());
    }

    #[test]
    fn bad_table_path_fails_startup() {
        let config = Config {
            fallback_table_path: Some("missing-table.json".into()),
            ..Config::default()
        };
        assert!(AppState::from_config(&config).is_err());
    }
}
