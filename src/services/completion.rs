// src/services/completion.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::fallback::FallbackTable;

pub const MAX_TOKENS: u32 = 300;
pub const TEMPERATURE: f32 = 0.7;

const COMPANY_INFO: &str = "\
Orion is a global technology consultancy with headquarters in Nairobi, Kenya, offering the following services worldwide:

1. AI Automation: Deploying AI agents for business process automation, customer service, and operational efficiency.
2. Software Development: Building custom web applications, mobile apps, enterprise systems, and API integrations.
3. Website Modernization: Transforming outdated websites with responsive designs, improved UX, and SEO optimization.
4. Management Consulting: Providing digital transformation strategies and technology implementation roadmaps.
5. Data Analytics: Creating visualization dashboards and AI-driven insights for business intelligence.
6. Training & Support: Offering comprehensive training programs and ongoing technical assistance.

Orion was founded by Lazarus Magwaro with a mission to help businesses worldwide compete in the digital age through innovative technology.
Contact: info@oriontech.co.ke, Phone: +254 (0) 712 345 678
Location: Headquarters in Nairobi Business District, Suite 200, Kenya, with global operations";

pub fn system_prompt() -> String {
    format!(
        "You are Orion's AI assistant, representing a global technology consultancy with headquarters in Kenya.\n\
         Be helpful, concise, and friendly. Focus on providing accurate information about Orion's services.\n\
         Here's information about the company:\n{COMPANY_INFO}\n\
         Keep responses under 150 words."
    )
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("no API key configured for the completion provider")]
    MissingApiKey,

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("completion contained no text")]
    EmptyCompletion,

    #[error("completion timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PromptMessage {
    pub role: String,
    pub content: String,
}

/// OpenAI-compatible chat completion request body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn for_message(model: &str, message: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                PromptMessage {
                    role: "system".to_string(),
                    content: system_prompt(),
                },
                PromptMessage {
                    role: "user".to_string(),
                    content: message.to_string(),
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct CompletionChoice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize, Debug)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}

/// Client for any provider exposing `POST {base_url}/chat/completions`.
pub struct OpenAiProvider {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    pub fn new(base_url: &str, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn bearer(&self) -> Result<HeaderValue, CompletionError> {
        let key = self
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CompletionError::MissingApiKey)?;
        let mut value =
            HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| CompletionError::MissingApiKey)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let bearer = self.bearer()?;

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header(AUTHORIZATION, bearer)
            .json(request)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status: status.as_u16(), body });
        }

        let body: CompletionResponse = response.json().await.map_err(CompletionError::Decode)?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(CompletionError::EmptyCompletion)
    }
}

/// Where an answer came from. Only logs see the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Model(String),
    Fallback(String),
}

impl Answer {
    pub fn into_text(self) -> String {
        match self {
            Answer::Model(text) | Answer::Fallback(text) => text,
        }
    }
}

/// Single-attempt completion call that degrades to the fallback table on
/// every failure.
#[derive(Clone)]
pub struct CompletionGateway {
    provider: Arc<dyn CompletionProvider>,
    fallback: Arc<FallbackTable>,
    model: String,
    timeout: Duration,
}

impl CompletionGateway {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        fallback: FallbackTable,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            fallback: Arc::new(fallback),
            model: model.into(),
            timeout,
        }
    }

    pub fn fallback(&self) -> &FallbackTable {
        &self.fallback
    }

    pub async fn answer(&self, message: &str) -> Answer {
        let request = CompletionRequest::for_message(&self.model, message);

        let result = match tokio::time::timeout(self.timeout, self.provider.complete(&request)).await {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout(self.timeout)),
        };

        match result {
            Ok(text) => {
                tracing::debug!(chars = text.len(), "completion served by model");
                Answer::Model(text)
            }
            Err(err) => {
                tracing::warn!(error = %err, "completion failed, serving fallback");
                Answer::Fallback(self.fallback.respond(message).to_string())
            }
        }
    }

    pub async fn complete(&self, message: &str) -> String {
        self.answer(message).await.into_text()
    }
}
