use std::sync::Arc;

use crate::llm_client::LanguageModel;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; flows keep no state of their own.
#[derive(Clone)]
pub struct AppState {
    /// `LlmClient` in production, a scripted stub in tests.
    pub llm: Arc<dyn LanguageModel>,
}
