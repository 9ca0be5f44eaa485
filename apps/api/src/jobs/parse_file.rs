//! Job description file parsing. Turns raw document text into the nine
//! structured listing fields.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::prompts::{HR_WRITER_SYSTEM, PARSE_FILE_PROMPT_TEMPLATE};
use crate::llm_client::{invoke_structured, LanguageModel};
use crate::models::job::{ParseRequest, ParseResult};
use crate::schema::validate_record;
use crate::template::render;

/// Extracts structured fields from `file_content`.
/// Anything the document does not mention comes back as `NOT_MENTIONED`.
pub async fn parse_file(
    llm: &dyn LanguageModel,
    request: &ParseRequest,
) -> Result<ParseResult, AppError> {
    let span = info_span!("parse_file", request_id = %Uuid::new_v4());
    async move {
        validate_record(request)?;
        let prompt = render(
            PARSE_FILE_PROMPT_TEMPLATE,
            &[("file_content", request.file_content.as_str())],
        )?;

        info!(
            "Parsing job description document ({} chars)",
            request.file_content.len()
        );
        let parsed: ParseResult = invoke_structured(llm, HR_WRITER_SYSTEM, &prompt).await?;
        let parsed = parsed.with_sentinels();
        info!(
            "Parsed '{}': {} skills, {} responsibilities",
            parsed.job_title,
            parsed.required_skills.len(),
            parsed.roles_and_responsibilities.len()
        );
        Ok::<_, AppError>(parsed)
    }
    .instrument(span)
    .await
}
