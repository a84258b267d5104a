// src/routes/chat.rs
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::Value;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, INVALID_MESSAGE},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected chat body");
        AppError::BadRequest(INVALID_MESSAGE.to_string())
    })?;

    let request = ChatRequest::from_value(&body)?;

    let response = state.gateway.complete(&request.message).await;

    Ok(Json(ChatResponse { response }))
}
