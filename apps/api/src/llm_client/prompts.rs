// Shared prompt constants.
// Each flow module defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Introduces the JSON Schema appended to structured prompts.
pub const OUTPUT_SCHEMA_INSTRUCTION: &str = "\
    Return a single JSON object that validates against this JSON Schema. \
    Include every required property; each description says what belongs in it:";
