//! Job description generation and regeneration.
//!
//! Flow: validate request → render template → invoke model with the
//! `GenerationResult` schema → check markdown conventions → return.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::prompts::{
    GENERATE_PROMPT_TEMPLATE, HR_WRITER_SYSTEM, REGENERATE_PROMPT_TEMPLATE,
};
use crate::llm_client::{invoke_structured, LanguageModel};
use crate::models::job::{GenerationRequest, GenerationResult, RegenerationRequest};
use crate::schema::{require_markdown, validate_record};
use crate::template::render;

pub async fn generate(
    llm: &dyn LanguageModel,
    request: &GenerationRequest,
) -> Result<GenerationResult, AppError> {
    let span = info_span!("generate", request_id = %Uuid::new_v4());
    async move {
        validate_record(request)?;
        let prompt = render(GENERATE_PROMPT_TEMPLATE, &request.bindings())?;

        info!("Generating job description for '{}'", request.role_title);
        let result = complete_description(llm, &prompt).await?;
        info!(
            "Generated job description ({} chars)",
            result.job_description.len()
        );
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}

/// Rewords `original_description` without changing its meaning.
/// Repeated calls with the same input may return different text.
pub async fn regenerate(
    llm: &dyn LanguageModel,
    request: &RegenerationRequest,
) -> Result<GenerationResult, AppError> {
    let span = info_span!("regenerate", request_id = %Uuid::new_v4());
    async move {
        validate_record(request)?;
        let prompt = render(REGENERATE_PROMPT_TEMPLATE, &request.bindings())?;

        info!(
            "Regenerating job description for '{}'",
            request.details.role_title
        );
        let result = complete_description(llm, &prompt).await?;
        info!(
            "Regenerated job description ({} chars)",
            result.job_description.len()
        );
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}

async fn complete_description(
    llm: &dyn LanguageModel,
    prompt: &str,
) -> Result<GenerationResult, AppError> {
    let result: GenerationResult = invoke_structured(llm, HR_WRITER_SYSTEM, prompt).await?;
    require_markdown("jobDescription", &result.job_description)?;
    Ok(result)
}
