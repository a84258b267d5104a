// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const INVALID_MESSAGE: &str = "Invalid request. Message is required and must be a string.";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub message: String,
}

impl ChatRequest {
    /// Validates a raw JSON body. `message` must be a non-empty string;
    /// whitespace is passed through untouched.
    pub fn from_value(body: &Value) -> Result<Self, AppError> {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .ok_or_else(|| AppError::BadRequest(INVALID_MESSAGE.to_string()))?;

        Ok(Self { message: message.to_string() })
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_string_message() {
        let req = ChatRequest::from_value(&json!({"message": "hello"})).unwrap();
        assert_eq!(req.message, "hello");
    }

    #[test]
    fn rejects_missing_non_string_and_empty() {
        for body in [json!({}), json!({"message": 42}), json!({"message": null}), json!({"message": ""}), json!("hello")] {
            assert!(matches!(ChatRequest::from_value(&body), Err(AppError::BadRequest(_))), "{body}");
        }
    }

    #[test]
    fn accepts_whitespace_and_long_messages_verbatim() {
        let req = ChatRequest::from_value(&json!({"message": "   "})).unwrap();
        assert_eq!(req.message, "   ");

        let long = "services ".repeat(500);
        let req = ChatRequest::from_value(&json!({ "message": long.clone() })).unwrap();
        assert_eq!(req.message, long);
    }
}
