use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// One prior message in an assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChatTurn {
    /// Who sent the message.
    pub role: ChatRole,
    /// The message text.
    #[schemars(regex(pattern = "\\S"))]
    pub content: String,
}

#[cfg(test)]
impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatRequest {
    /// Earlier turns, oldest first. May be omitted but not null.
    #[serde(default)]
    pub history: Vec<ChatTurn>,
    /// The user's new message.
    #[schemars(regex(pattern = "\\S"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ChatResponse {
    /// The assistant's reply.
    #[schemars(regex(pattern = "\\S"))]
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{conform, Violation};
    use serde_json::json;

    #[test]
    fn test_history_may_be_omitted() {
        let request: ChatRequest = conform(json!({"message": "hi"})).unwrap();
        assert!(request.history.is_empty());
    }

    #[test]
    fn test_null_history_is_a_field_error() {
        let err = conform::<ChatRequest>(json!({"history": null, "message": "hi"})).unwrap_err();
        assert_eq!(err.field, "history");
        assert_eq!(
            err.violation,
            Violation::WrongType {
                expected: "array".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_role_is_reported_with_its_index() {
        let err = conform::<ChatRequest>(json!({
            "history": [
                {"role": "user", "content": "hello"},
                {"role": "assistant", "content": "hi"}
            ],
            "message": "and?"
        }))
        .unwrap_err();
        assert_eq!(err.field, "history[1].role");
        assert!(matches!(err.violation, Violation::NotInEnum { .. }));
    }
}
