//! Axum route handlers for the job-description flows.
//!
//! Bodies arrive as raw JSON and are conformed against the request schemas so
//! callers get field-level validation errors instead of a generic rejection.

use axum::{extract::State, Json};
use serde_json::Value;

use crate::errors::AppError;
use crate::jobs::analyze::analyze;
use crate::jobs::generate::{generate, regenerate};
use crate::jobs::parse_file::parse_file;
use crate::models::job::{
    AnalysisRequest, AnalysisResult, GenerationRequest, GenerationResult, ParseRequest,
    ParseResult, RegenerationRequest,
};
use crate::schema::conform;
use crate::state::AppState;

/// POST /api/v1/job-descriptions/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerationResult>, AppError> {
    let request: GenerationRequest = conform(body)?;
    let result = generate(state.llm.as_ref(), &request).await?;
    Ok(Json(result))
}

/// POST /api/v1/job-descriptions/regenerate
///
/// `originalDescription` must be a description this service generated earlier;
/// ordering between generate and regenerate is the caller's concern.
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerationResult>, AppError> {
    let request: RegenerationRequest = conform(body)?;
    let result = regenerate(state.llm.as_ref(), &request).await?;
    Ok(Json(result))
}

/// POST /api/v1/job-descriptions/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<AnalysisResult>, AppError> {
    let request: AnalysisRequest = conform(body)?;
    let result = analyze(state.llm.as_ref(), &request).await?;
    Ok(Json(result))
}

/// POST /api/v1/job-descriptions/parse
///
/// Expects text already extracted from the uploaded document.
pub async fn handle_parse(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<ParseResult>, AppError> {
    let request: ParseRequest = conform(body)?;
    let result = parse_file(state.llm.as_ref(), &request).await?;
    Ok(Json(result))
}
