// src/widget/mod.rs
//! In-memory state of the site's chat widget.
//!
//! Nothing here is persisted: a `ChatWidget` lives exactly as long as the
//! page session that owns it.
pub mod transport;

use std::time::Instant;

use uuid::Uuid;

pub use transport::{ChatTransport, HttpTransport, TransportError};

pub const WELCOME_MESSAGE: &str = "👋 Hello! I'm the Orion AI assistant. How can I help you today?";

pub const TRANSPORT_ERROR_MESSAGE: &str =
    "Sorry, I'm having trouble processing your request. Please try again later.";

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What services do you offer?",
    "How can AI help my business?",
    "Tell me about your software development",
    "Book a consultation",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Clone, Debug)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: Instant,
}

impl Message {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender,
            timestamp: Instant::now(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    OpenIdle,
    AwaitingResponse,
}

#[derive(Debug, Default)]
pub struct ChatWidget {
    messages: Vec<Message>,
    open: bool,
    loading: bool,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// A closed panel with a request still in flight reports `Closed`.
    pub fn state(&self) -> WidgetState {
        match (self.open, self.loading) {
            (false, _) => WidgetState::Closed,
            (true, false) => WidgetState::OpenIdle,
            (true, true) => WidgetState::AwaitingResponse,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn open(&mut self) {
        if self.open {
            return;
        }
        self.open = true;
        if self.messages.is_empty() {
            self.messages.push(Message::new(Sender::Bot, WELCOME_MESSAGE));
        }
    }

    /// Hides the panel. Messages stay in memory for the next `open`.
    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Starter questions, offered until the visitor sends something.
    pub fn suggested_questions(&self) -> &'static [&'static str] {
        if self.messages.len() == 1 {
            &SUGGESTED_QUESTIONS
        } else {
            &[]
        }
    }

    /// Records the visitor's message and marks a request as in flight.
    ///
    /// Returns the text to send, or `None` when the input is blank or a
    /// request is already pending. Submitting from a closed panel opens it.
    ///
    /// Trimming only decides whether to submit; the text is kept as typed.
    pub fn begin_submit(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() || self.loading {
            return None;
        }

        self.open();
        self.messages.push(Message::new(Sender::User, input));
        self.loading = true;
        Some(input.to_string())
    }

    /// Appends the single bot reply for the pending request.
    pub fn resolve(&mut self, result: Result<String, TransportError>) {
        if !self.loading {
            return;
        }

        let content = match result {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "failed to send chat message");
                TRANSPORT_ERROR_MESSAGE.to_string()
            }
        };
        self.messages.push(Message::new(Sender::Bot, content));
        self.loading = false;
    }

    /// Full round trip. Returns `false` if the submission was rejected.
    pub async fn send<T>(&mut self, input: &str, transport: &T) -> bool
    where
        T: ChatTransport + ?Sized,
    {
        let Some(text) = self.begin_submit(input) else {
            return false;
        };
        let result = transport.send(&text).await;
        self.resolve(result);
        true
    }
}
