//! Schema validation for structured records.
//!
//! Record types derive `JsonSchema`. The generated schema guards both trust
//! boundaries: request bodies coming in from callers and structured replies
//! coming back from the model. It is also what the model is shown as the
//! required output format. A reply that omits a declared field or returns the
//! wrong type is rejected, never silently defaulted.

use std::fmt::Write as _;

use jsonschema::error::{TypeKind, ValidationErrorKind};
use schemars::{gen::SchemaSettings, schema::RootSchema, JsonSchema};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The constraint a value broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("is required")]
    Missing,

    #[error("must be {expected}")]
    WrongType { expected: String },

    #[error("must be at least {min} characters")]
    TooShort { min: u64 },

    #[error("must contain at least {min} items")]
    TooFew { min: u64 },

    #[error("must be one of: {allowed}")]
    NotInEnum { allowed: String },

    /// Record fields use `pattern` only for the non-blank rule.
    #[error("must not be blank")]
    Blank,

    #[error("must contain a markdown {marker}")]
    MissingMarkdown { marker: &'static str },

    #[error("is malformed: {0}")]
    Malformed(String),

    #[error("is invalid: {0}")]
    Invalid(String),
}

/// A record failed its schema. `field` is a path such as `history[1].role`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {violation}")]
pub struct ValidationError {
    pub field: String,
    pub violation: Violation,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, violation: Violation) -> Self {
        Self {
            field: field.into(),
            violation,
        }
    }

    fn malformed<T: JsonSchema>(detail: String) -> Self {
        Self::new(T::schema_name(), Violation::Malformed(detail))
    }

    /// Maps a `jsonschema` error onto the record's field path.
    /// Errors on the record itself are reported under `record`.
    fn from_schema_error(record: &str, error: &jsonschema::ValidationError<'_>) -> Self {
        let path = field_path(&error.instance_path.to_string());

        let violation = match &error.kind {
            ValidationErrorKind::Required { property } => {
                let property = property.as_str().unwrap_or_default();
                return Self::new(join_path(&path, property), Violation::Missing);
            }
            ValidationErrorKind::Type {
                kind: TypeKind::Single(expected),
            } => Violation::WrongType {
                expected: expected.to_string(),
            },
            ValidationErrorKind::MinLength { limit } => Violation::TooShort { min: *limit },
            ValidationErrorKind::MinItems { limit } => Violation::TooFew { min: *limit },
            ValidationErrorKind::Enum { options } => Violation::NotInEnum {
                allowed: list_options(options),
            },
            ValidationErrorKind::Pattern { .. } => Violation::Blank,
            _ => Violation::Invalid(error.to_string()),
        };

        let field = if path.is_empty() {
            record.to_string()
        } else {
            path
        };
        Self::new(field, violation)
    }
}

fn root_schema<T: JsonSchema>() -> RootSchema {
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;
    settings.into_generator().into_root_schema_for::<T>()
}

/// The JSON Schema of `T`, with nested records inlined.
pub fn json_schema<T: JsonSchema>() -> Result<Value, ValidationError> {
    serde_json::to_value(root_schema::<T>())
        .map_err(|e| ValidationError::malformed::<T>(e.to_string()))
}

/// Renders the schema of `T` for use inside prompts.
pub fn describe<T: JsonSchema>() -> Result<String, ValidationError> {
    serde_json::to_string_pretty(&root_schema::<T>())
        .map_err(|e| ValidationError::malformed::<T>(e.to_string()))
}

/// Checks `value` against the schema of `T`. Reports the first violation found.
pub fn validate<T: JsonSchema>(value: &Value) -> Result<(), ValidationError> {
    let schema = json_schema::<T>()?;
    let validator = jsonschema::validator_for(&schema)
        .map_err(|e| ValidationError::malformed::<T>(e.to_string()))?;

    let first = validator.iter_errors(value).next();
    match first {
        Some(error) => Err(ValidationError::from_schema_error(&T::schema_name(), &error)),
        None => Ok(()),
    }
}

/// Validates a typed record by its serialized form.
pub fn validate_record<T: JsonSchema + Serialize>(record: &T) -> Result<(), ValidationError> {
    let value = serde_json::to_value(record)
        .map_err(|e| ValidationError::malformed::<T>(e.to_string()))?;
    validate::<T>(&value)
}

/// Validates `value` and then deserializes it into the typed record.
pub fn conform<T: JsonSchema + DeserializeOwned>(value: Value) -> Result<T, ValidationError> {
    validate::<T>(&value)?;
    serde_json::from_value(value).map_err(|e| ValidationError::malformed::<T>(e.to_string()))
}

/// Rejects text that lacks a markdown heading line or a bullet line.
pub fn require_markdown(field: &str, text: &str) -> Result<(), ValidationError> {
    let mut has_heading = false;
    let mut has_bullet = false;

    for line in text.lines().map(str::trim_start) {
        has_heading |= is_heading(line);
        has_bullet |= ["- ", "* ", "• "].iter().any(|b| line.starts_with(b));
    }

    if !has_heading {
        return Err(ValidationError::new(
            field,
            Violation::MissingMarkdown { marker: "heading" },
        ));
    }
    if !has_bullet {
        return Err(ValidationError::new(
            field,
            Violation::MissingMarkdown {
                marker: "bullet list",
            },
        ));
    }
    Ok(())
}

// ATX heading: one to six '#' followed by a space.
fn is_heading(line: &str) -> bool {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    (1..=6).contains(&level) && line[level..].starts_with(' ')
}

/// Turns a JSON pointer (`/history/1/role`) into `history[1].role`.
fn field_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if segment.parse::<usize>().is_ok() {
            let _ = write!(path, "[{segment}]");
        } else {
            path = join_path(&path, &segment);
        }
    }
    path
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn list_options(options: &Value) -> String {
    match options.as_array() {
        Some(items) => items
            .iter()
            .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
            .collect::<Vec<_>>()
            .join(", "),
        None => options.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    #[serde(rename_all = "lowercase")]
    enum LineKind {
        Note,
        Todo,
    }

    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Line {
        kind: LineKind,
        #[schemars(regex(pattern = "\\S"))]
        body: String,
    }

    /// A planning sheet.
    #[derive(Debug, Serialize, Deserialize, JsonSchema)]
    struct Sheet {
        /// Sheet title.
        #[schemars(length(min = 3))]
        title: String,
        #[schemars(length(min = 1))]
        tags: Vec<String>,
        #[serde(default)]
        lines: Vec<Line>,
    }

    fn valid_sheet() -> Value {
        json!({
            "title": "Quarterly plan",
            "tags": ["planning"],
            "lines": [{"kind": "note", "body": "kick-off"}]
        })
    }

    #[test]
    fn test_valid_object_passes() {
        assert!(validate::<Sheet>(&valid_sheet()).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let mut value = valid_sheet();
        value.as_object_mut().unwrap().remove("title");
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.violation, Violation::Missing);
        assert_eq!(err.to_string(), "title is required");
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let mut value = valid_sheet();
        value["title"] = json!(42);
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(
            err.violation,
            Violation::WrongType {
                expected: "string".to_string()
            }
        );
    }

    #[test]
    fn test_null_for_defaulted_list_is_rejected() {
        let mut value = valid_sheet();
        value["lines"] = Value::Null;
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.field, "lines");
        assert!(matches!(err.violation, Violation::WrongType { .. }));
    }

    #[test]
    fn test_too_short() {
        let mut value = valid_sheet();
        value["title"] = json!("ab");
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.violation, Violation::TooShort { min: 3 });
    }

    #[test]
    fn test_list_item_type_is_checked_with_index() {
        let mut value = valid_sheet();
        value["tags"] = json!(["ok", 7]);
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.field, "tags[1]");
    }

    #[test]
    fn test_list_min_items() {
        let mut value = valid_sheet();
        value["tags"] = json!([]);
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.violation, Violation::TooFew { min: 1 });
    }

    #[test]
    fn test_nested_record_path() {
        let mut value = valid_sheet();
        value["lines"] = json!([
            {"kind": "note", "body": "a"},
            {"kind": "memo", "body": "b"}
        ]);
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.field, "lines[1].kind");
        assert_eq!(err.to_string(), "lines[1].kind must be one of: note, todo");
    }

    #[test]
    fn test_blank_text_is_rejected() {
        let mut value = valid_sheet();
        value["lines"] = json!([{"kind": "todo", "body": " \n "}]);
        let err = validate::<Sheet>(&value).unwrap_err();
        assert_eq!(err.field, "lines[0].body");
        assert_eq!(err.violation, Violation::Blank);
    }

    #[test]
    fn test_defaulted_fields_may_be_absent() {
        let value = json!({"title": "Plan", "tags": ["x"]});
        let sheet: Sheet = conform(value).unwrap();
        assert!(sheet.lines.is_empty());
    }

    #[test]
    fn test_non_object_root_is_named_after_the_record() {
        let err = validate::<Sheet>(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(err.field, "Sheet");
    }

    #[test]
    fn test_conform_deserializes_after_validation() {
        let sheet: Sheet = conform(valid_sheet()).unwrap();
        assert_eq!(sheet.title, "Quarterly plan");
        assert_eq!(sheet.tags, vec!["planning"]);
        assert!(matches!(sheet.lines[0].kind, LineKind::Note));
        assert_eq!(sheet.lines[0].body, "kick-off");
    }

    #[test]
    fn test_describe_lists_fields_and_constraints() {
        let described = describe::<Sheet>().unwrap();
        for name in ["title", "tags", "lines", "kind", "body", "note", "todo"] {
            assert!(described.contains(&format!("\"{name}\"")), "{name} missing");
        }
        assert!(described.contains("Sheet title."));
        assert!(described.contains("\"minLength\": 3"));
    }

    #[test]
    fn test_field_path() {
        assert_eq!(field_path(""), "");
        assert_eq!(field_path("/history/1/role"), "history[1].role");
        assert_eq!(field_path("/a~1b"), "a/b");
    }

    #[test]
    fn test_require_markdown() {
        assert!(require_markdown("jd", "## Role\n- ship things").is_ok());
        assert!(require_markdown("jd", "  # Role\n  * ship things").is_ok());
        assert!(require_markdown("jd", "###### Perks\n• snacks").is_ok());

        let err = require_markdown("jd", "- only bullets").unwrap_err();
        assert_eq!(err.violation, Violation::MissingMarkdown { marker: "heading" });

        let err = require_markdown("jd", "## Heading only\nprose").unwrap_err();
        assert_eq!(
            err.violation,
            Violation::MissingMarkdown {
                marker: "bullet list"
            }
        );
    }

    #[test]
    fn test_hashtags_are_not_headings() {
        for text in ["#hiring now\n- x", "####### seven\n- x", "#\n- x"] {
            let err = require_markdown("jd", text).unwrap_err();
            assert_eq!(err.violation, Violation::MissingMarkdown { marker: "heading" });
        }
    }
}
