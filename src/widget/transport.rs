// src/widget/transport.rs
use async_trait::async_trait;
use thiserror::Error;

use crate::message::{ChatRequest, ChatResponse};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("could not reach chat endpoint: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("chat endpoint answered with status {0}")]
    Status(u16),

    #[error("unreadable chat response: {0}")]
    Body(#[source] reqwest::Error),
}

/// How the widget reaches the chat endpoint.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, message: &str) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// `base_url` is the site root, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/chat", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, message: &str) -> Result<String, TransportError> {
        let body = ChatRequest { message: message.to_string() };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(TransportError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let data: ChatResponse = response.json().await.map_err(TransportError::Body)?;
        Ok(data.response)
    }
}
