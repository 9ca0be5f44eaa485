use axum::{extract::State, Json};
use serde_json::Value;

use crate::assistant::chat::chat;
use crate::errors::AppError;
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::schema::conform;
use crate::state::AppState;

/// POST /api/v1/assistant/chat
///
/// The caller sends the full conversation so far; nothing is stored server-side.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ChatResponse>, AppError> {
    let request: ChatRequest = conform(body)?;
    let response = chat(state.llm.as_ref(), &request).await?;
    Ok(Json(response))
}
