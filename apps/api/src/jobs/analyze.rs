//! Job description analysis: restructures an existing description and
//! recommends improvements.

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::prompts::{ANALYZE_PROMPT_TEMPLATE, HR_WRITER_SYSTEM};
use crate::llm_client::{invoke_structured, LanguageModel};
use crate::models::job::{AnalysisRequest, AnalysisResult};
use crate::schema::validate_record;
use crate::template::render;

/// Rejects descriptions shorter than `MIN_ANALYSIS_CHARS` before any model call.
pub async fn analyze(
    llm: &dyn LanguageModel,
    request: &AnalysisRequest,
) -> Result<AnalysisResult, AppError> {
    let span = info_span!("analyze", request_id = %Uuid::new_v4());
    async move {
        validate_record(request)?;
        let prompt = render(
            ANALYZE_PROMPT_TEMPLATE,
            &[("job_description", request.job_description.as_str())],
        )?;

        info!(
            "Analyzing job description ({} chars)",
            request.job_description.len()
        );
        let result: AnalysisResult = invoke_structured(llm, HR_WRITER_SYSTEM, &prompt).await?;
        info!("Analysis complete");
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::stub::StubModel;
    use crate::models::job::MIN_ANALYSIS_CHARS;
    use crate::schema::Violation;
    use serde_json::json;

    const JD: &str = "We need a backend developer who knows Java and Spring. \
        Must work with the team on APIs and be good at communication.";

    fn reply() -> String {
        json!({
            "structuredContent": "## Role\nBackend Developer\n\n## Key Responsibilities\n- Build APIs",
            "recommendations": "State seniority explicitly and list benefits."
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_analyze_returns_both_sections() {
        let stub = StubModel::replying(reply());
        let result = analyze(
            &stub,
            &AnalysisRequest {
                job_description: JD.to_string(),
            },
        )
        .await
        .unwrap();

        assert!(result.structured_content.contains("## Key Responsibilities"));
        assert!(!result.recommendations.is_empty());
        assert!(stub.recorded()[0].prompt.contains(JD));
    }

    #[tokio::test]
    async fn test_short_description_fails_before_any_call() {
        let stub = StubModel::replying(reply());
        let short = "Need a dev. Java.";
        assert!(short.len() < MIN_ANALYSIS_CHARS);

        let err = analyze(
            &stub,
            &AnalysisRequest {
                job_description: short.to_string(),
            },
        )
        .await
        .unwrap_err();

        match err {
            AppError::Validation(v) => {
                assert_eq!(v.field, "jobDescription");
                assert!(matches!(v.violation, Violation::TooShort { min: 50, .. }));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_exactly_fifty_chars_is_accepted() {
        let stub = StubModel::replying(reply());
        let text = "x".repeat(MIN_ANALYSIS_CHARS);
        let result = analyze(
            &stub,
            &AnalysisRequest {
                job_description: text,
            },
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_recommendations_are_rejected() {
        let stub = StubModel::replying(
            json!({"structuredContent": "## Role\n- Build", "recommendations": ""}).to_string(),
        );
        let err = analyze(
            &stub,
            &AnalysisRequest {
                job_description: JD.to_string(),
            },
        )
        .await
        .unwrap_err();
        match err {
            AppError::Validation(v) => {
                assert_eq!(v.field, "recommendations");
                assert_eq!(v.violation, Violation::Blank);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
