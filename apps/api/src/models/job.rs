use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Placeholder the parser substitutes for anything absent from the source document.
pub const NOT_MENTIONED: &str = "Not Mentioned";

/// Minimum length of a description worth analyzing. Mirrored by the
/// `length` attribute on `AnalysisRequest::job_description`.
pub const MIN_ANALYSIS_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    Male,
    Female,
    Both,
}

impl GenderPreference {
    pub fn as_str(self) -> &'static str {
        match self {
            GenderPreference::Male => "male",
            GenderPreference::Female => "female",
            GenderPreference::Both => "both",
        }
    }
}

/// Form input for a new job description.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// The title of the job role.
    #[schemars(length(min = 2), regex(pattern = "\\S"))]
    pub role_title: String,
    /// The experience level required, e.g. 2-5 years.
    #[schemars(regex(pattern = "\\S"))]
    pub experience: String,
    /// Where the job is based, e.g. Remote or Bangalore.
    #[schemars(length(min = 2), regex(pattern = "\\S"))]
    pub location: String,
    /// Comma-separated key skills, e.g. React, Node.js.
    #[schemars(length(min = 2), regex(pattern = "\\S"))]
    pub key_skills: String,
    /// The name of the company.
    #[schemars(regex(pattern = "\\S"))]
    pub company_name: String,
    /// A brief description of the company.
    #[schemars(regex(pattern = "\\S"))]
    pub about_company: String,
    /// The gender preference for the role.
    pub gender_preference: GenderPreference,
}

impl GenerationRequest {
    /// Template bindings, keyed by placeholder name.
    pub fn bindings(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("role_title", self.role_title.as_str()),
            ("experience", self.experience.as_str()),
            ("location", self.location.as_str()),
            ("key_skills", self.key_skills.as_str()),
            ("company_name", self.company_name.as_str()),
            ("about_company", self.about_company.as_str()),
            ("gender_preference", self.gender_preference.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    /// The complete job description as one markdown string with '## ' section
    /// headings and '- ' bullet points.
    #[schemars(regex(pattern = "\\S"))]
    pub job_description: String,
}

/// The original form input plus the description being reworded.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegenerationRequest {
    #[serde(flatten)]
    pub details: GenerationRequest,
    /// A previously generated job description to reword.
    #[schemars(regex(pattern = "\\S"))]
    pub original_description: String,
}

impl RegenerationRequest {
    pub fn bindings(&self) -> Vec<(&'static str, &str)> {
        let mut bindings = self.details.bindings();
        bindings.push(("original_description", self.original_description.as_str()));
        bindings
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    /// The job description text to analyze.
    #[schemars(length(min = 50), regex(pattern = "\\S"))]
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// The job description rewritten as well-structured markdown with headings
    /// and bullet points.
    #[schemars(regex(pattern = "\\S"))]
    pub structured_content: String,
    /// Actionable recommendations to improve clarity, inclusivity and impact.
    #[schemars(regex(pattern = "\\S"))]
    pub recommendations: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseRequest {
    /// Raw text extracted from a job description document.
    #[schemars(regex(pattern = "\\S"))]
    pub file_content: String,
}

/// Structured fields extracted from an uploaded job description.
///
/// Blank values pass validation; `with_sentinels` replaces them afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// The name of the hiring company.
    pub company_name: String,
    /// A brief description of the company.
    pub about_company: String,
    /// The job title. If absent, suggest one based on the content.
    pub job_title: String,
    /// The required years or level of experience.
    pub required_experience: String,
    /// Each essential skill as a separate item.
    pub required_skills: Vec<String>,
    /// Each key responsibility as a separate item.
    pub roles_and_responsibilities: Vec<String>,
    /// The compensation mentioned. If absent, exactly 'Not Mentioned'.
    pub salary_package: String,
    /// The work location (city, remote). If absent, exactly 'Not Mentioned'.
    pub location: String,
    /// Other relevant details, plus suggestions for missing but important points
    /// such as benefits, culture or soft skills.
    pub other_info: String,
}

impl ParseResult {
    /// Replaces blank fields with `NOT_MENTIONED`. Lists drop blank items and
    /// collapse to a single sentinel item when nothing is left.
    pub fn with_sentinels(mut self) -> Self {
        for field in [
            &mut self.company_name,
            &mut self.about_company,
            &mut self.job_title,
            &mut self.required_experience,
            &mut self.salary_package,
            &mut self.location,
            &mut self.other_info,
        ] {
            if field.trim().is_empty() {
                *field = NOT_MENTIONED.to_string();
            }
        }

        for list in [
            &mut self.required_skills,
            &mut self.roles_and_responsibilities,
        ] {
            list.retain(|item| !item.trim().is_empty());
            if list.is_empty() {
                list.push(NOT_MENTIONED.to_string());
            }
        }

        self
    }
}
