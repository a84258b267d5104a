#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use orion_chat::routes::create_router;
use orion_chat::services::completion::{
    CompletionError, CompletionGateway, CompletionProvider, CompletionRequest,
};
use orion_chat::services::fallback::FallbackTable;
use orion_chat::state::AppState;

pub enum Behaviour {
    Reply(&'static str),
    Fail,
    Panic,
}

/// Provider double that counts calls.
pub struct StubProvider {
    behaviour: Behaviour,
    calls: AtomicUsize,
}

impl StubProvider {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self { behaviour, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionProvider for StubProvider {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            Behaviour::Reply(text) => Ok(text.to_string()),
            Behaviour::Fail => Err(CompletionError::Status {
                status: 503,
                body: "upstream down".to_string(),
            }),
            Behaviour::Panic => panic!("provider exploded"),
        }
    }
}

pub fn gateway(provider: Arc<dyn CompletionProvider>) -> CompletionGateway {
    CompletionGateway::new(provider, FallbackTable::builtin(), "gpt-4o", Duration::from_secs(2))
}

pub fn app(provider: Arc<dyn CompletionProvider>) -> Router {
    let state = Arc::new(AppState::new(gateway(provider)));
    create_router("public").with_state(state)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
