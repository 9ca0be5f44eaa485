//! Assistant chat. One reply per call, conversation state owned by the caller.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::assistant::prompts::ASSISTANT_SYSTEM;
use crate::errors::AppError;
use crate::llm_client::{invoke_text, LanguageModel};
use crate::models::chat::{ChatRequest, ChatResponse};
use crate::schema::validate_record;

pub async fn chat(
    llm: &dyn LanguageModel,
    request: &ChatRequest,
) -> Result<ChatResponse, AppError> {
    let span = info_span!(
        "chat",
        request_id = %Uuid::new_v4(),
        history_turns = request.history.len()
    );
    async move {
        validate_record(request)?;

        let reply =
            invoke_text(llm, ASSISTANT_SYSTEM, &request.history, &request.message).await?;
        let response = ChatResponse { response: reply };
        validate_record(&response)?;

        info!("Assistant replied ({} chars)", response.response.len());
        Ok::<_, AppError>(response)
    }
    .instrument(span)
    .await
}
