/// LLM invocation for hrassist.
///
/// Only this module talks to the Anthropic API. Flows depend on `LanguageModel`;
/// `LlmClient` is the production implementation.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::chat::{ChatRole, ChatTurn};
use crate::schema::{self, ValidationError, Violation};

pub mod prompts;
#[cfg(test)]
pub mod stub;

const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Model used for every call. Not configurable.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gave up after {attempts} attempts")]
    Exhausted { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    /// The reply arrived but does not match the requested output shape.
    #[error("Reply failed validation: {0}")]
    Shape(#[from] ValidationError),
}

/// Everything one model invocation needs.
#[derive(Debug, Clone, Copy)]
pub struct Completion<'a> {
    pub system: &'a str,
    pub history: &'a [ChatTurn],
    pub prompt: &'a str,
}

/// A hosted language model. Returns the reply text for a single completion.
///
/// Carried in `AppState` as `Arc<dyn LanguageModel>` so flows can be driven by a stub.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, completion: Completion<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage>,
}

#[derive(Debug, PartialEq, Serialize)]
struct AnthropicMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with transport retries.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    max_attempts: u32,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.llm_timeout_secs))
                .build()?,
            api_key: config.anthropic_api_key.clone(),
            api_url: config.anthropic_api_url.clone(),
            max_attempts: config.llm_max_attempts,
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, completion: Completion<'_>) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system: completion.system,
            messages: transcript(completion.history, completion.prompt),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnthropicError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let llm_response: LlmResponse = response.json().await?;

            debug!(
                "LLM call succeeded: input_tokens={}, output_tokens={}",
                llm_response.usage.input_tokens, llm_response.usage.output_tokens
            );

            return Ok(llm_response);
        }

        Err(last_error.unwrap_or(LlmError::Exhausted {
            attempts: self.max_attempts,
        }))
    }
}

#[async_trait]
impl LanguageModel for LlmClient {
    async fn complete(&self, completion: Completion<'_>) -> Result<String, LlmError> {
        let response = self.call(completion).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Calls the model for a JSON reply and conforms it to the schema of `T`.
///
/// The schema is appended to the prompt; fences are stripped before parsing.
/// An unparseable or non-conforming reply is `LlmError::Shape`.
pub async fn invoke_structured<T: DeserializeOwned + JsonSchema>(
    llm: &dyn LanguageModel,
    system: &str,
    prompt: &str,
) -> Result<T, LlmError> {
    let system = format!("{system} {}", prompts::JSON_ONLY_SYSTEM);
    let prompt = format!(
        "{prompt}\n\n{}\n{}",
        prompts::OUTPUT_SCHEMA_INSTRUCTION,
        schema::describe::<T>()?
    );
    debug!(
        record = %T::schema_name(),
        prompt_chars = prompt.len(),
        "Invoking model for structured reply"
    );

    let text = llm
        .complete(Completion {
            system: &system,
            history: &[],
            prompt: &prompt,
        })
        .await?;

    let value: Value = serde_json::from_str(strip_json_fences(&text)).map_err(|e| {
        ValidationError::new(T::schema_name(), Violation::Malformed(e.to_string()))
    })?;

    Ok(schema::conform(value)?)
}

/// Calls the model for a free-text reply within a conversation.
pub async fn invoke_text(
    llm: &dyn LanguageModel,
    system: &str,
    history: &[ChatTurn],
    message: &str,
) -> Result<String, LlmError> {
    debug!(history_turns = history.len(), "Invoking model for text reply");
    let text = llm
        .complete(Completion {
            system,
            history,
            prompt: message,
        })
        .await?;
    Ok(text.trim().to_string())
}

fn anthropic_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "assistant",
    }
}

/// Builds the wire transcript: prior turns, then the prompt as the final user turn.
/// The API requires a user turn first and alternating roles, so leading model turns
/// are dropped and consecutive turns with the same role are merged.
fn transcript(history: &[ChatTurn], prompt: &str) -> Vec<AnthropicMessage> {
    let turns = history
        .iter()
        .map(|turn| (anthropic_role(turn.role), turn.content.as_str()))
        .chain(std::iter::once(("user", prompt)));

    let mut messages: Vec<AnthropicMessage> = Vec::with_capacity(history.len() + 1);
    for (role, content) in turns {
        if let Some(last) = messages.last_mut() {
            if last.role == role {
                last.content.push_str("\n\n");
                last.content.push_str(content);
                continue;
            }
        } else if role == "assistant" {
            continue;
        }
        messages.push(AnthropicMessage {
            role,
            content: content.to_string(),
        });
    }
    messages
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
