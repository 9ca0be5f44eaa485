// Job description flows: generate, regenerate, analyze, parse-file.
// All LLM calls go through llm_client, never the Anthropic API directly.

pub mod analyze;
pub mod generate;
pub mod handlers;
pub mod parse_file;
pub mod prompts;
