// All LLM prompt constants for the job-description flows.
// Placeholders are `{snake_case}` names bound from the request records.

/// Shared persona for every structured job-description flow.
/// `invoke_structured` appends the JSON-only instruction.
pub const HR_WRITER_SYSTEM: &str = "You are an expert HR assistant and copywriter who \
    writes and improves job descriptions for a job listing portal.";

/// Generation prompt. Replace every `{...}` field from `GenerationRequest`.
pub const GENERATE_PROMPT_TEMPLATE: &str = r###"Write a compelling job description from the details below.

FORMAT RULES:
- The description is a single string.
- Use markdown headings for sections, e.g. "## About the Company", "## Key Responsibilities", "## Qualifications".
- Use "- " bullet points for the lists under "Key Responsibilities" and "Qualifications".

DETAILS:
Company Name: {company_name}
About Company: {about_company}
Role Title: {role_title}
Experience: {experience}
Location: {location}
Key Skills: {key_skills}
Gender Preference: {gender_preference}"###;

/// Regeneration prompt. Same fields as generation plus `{original_description}`.
pub const REGENERATE_PROMPT_TEMPLATE: &str = r###"Rewrite the existing job description below with fresh phrasing.
Do NOT change its meaning, requirements or facts. Vary wording and sentence structure so the user gets a genuine alternative.

FORMAT RULES:
- The description is a single string.
- Keep markdown "## " headings for sections and "- " bullet points for lists.

ORIGINAL JOB DESCRIPTION:
---
{original_description}
---

DETAILS:
Company Name: {company_name}
About Company: {about_company}
Role Title: {role_title}
Experience: {experience}
Location: {location}
Key Skills: {key_skills}
Gender Preference: {gender_preference}"###;

/// Analysis prompt. Replace `{job_description}`.
pub const ANALYZE_PROMPT_TEMPLATE: &str = r###"Analyze the following job description and improve it.

JOB DESCRIPTION:
---
{job_description}
---

Provide:
1. structuredContent: the original description converted into a well-structured markdown document. Use headings (e.g. "## Key Responsibilities") and bullet points for lists. Keep it a single formatted string.
2. recommendations: actionable recommendations that raise the quality of the description. Focus on clarity, inclusivity and impact."###;

/// File-parsing prompt. Replace `{file_content}`.
pub const PARSE_FILE_PROMPT_TEMPLATE: &str = r#"You have been given the raw text of a job description document.
Read it, extract the key information, then rephrase and structure it professionally.

DOCUMENT CONTENT:
---
{file_content}
---

RULES:
1. Clean up the text for clarity, grammar and formatting.
2. Put every skill and every responsibility in its own array item.
3. If the job title, experience or skills are missing, infer them from context; if that is impossible, use exactly "Not Mentioned".
4. Any other field absent from the document is exactly "Not Mentioned".
5. Under otherInfo, suggest missing points a professional listing usually includes (benefits, company culture, soft skills).
6. Keep the result concise and suitable for a job listing portal."#;
