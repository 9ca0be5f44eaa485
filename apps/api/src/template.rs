//! Prompt template rendering.
//!
//! Templates name their inputs with `{identifier}` placeholders (lowercase ASCII,
//! digits and `_`). Any other brace text is copied through untouched, and bound
//! values are never rescanned, so caller-supplied text containing `{x}` is inert.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template names a placeholder the caller did not bind. Always a programming defect.
    #[error("template placeholder '{{{placeholder}}}' has no bound field")]
    Unbound { placeholder: String },
}

/// Substitutes every placeholder in `template` with its bound value.
pub fn render(template: &str, bindings: &[(&str, &str)]) -> Result<String, TemplateError> {
    let bound_len: usize = bindings.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(template.len() + bound_len);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match placeholder_at(after) {
            Some(name) => {
                let value = bindings
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| TemplateError::Unbound {
                        placeholder: name.to_string(),
                    })?;
                out.push_str(value);
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Returns the placeholder name if `s` starts with `name}`.
fn placeholder_at(s: &str) -> Option<&str> {
    let end = s.find('}')?;
    let name = &s[..end];
    let is_identifier = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
    is_identifier.then_some(name)
}

#[cfg(test)]
pub(crate) fn placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match placeholder_at(after) {
            Some(name) => {
                found.push(name);
                rest = &after[name.len() + 1..];
            }
            None => rest = after,
        }
    }
    found
}
