//! Locating the JSON document inside a model completion.
//!
//! Models often wrap the requested object in prose or a markdown fence. The
//! first balanced `{...}` span is taken as the answer; braces inside JSON
//! string literals are ignored while balancing.

use serde::de::DeserializeOwned;

use crate::error::GenerationError;

/// Return the first balanced `{...}` span in `text`, if one exists.
#[must_use]
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=start + offset]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract the first JSON object from a completion and deserialize it.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedContent`] if no balanced object is
/// present, or if it does not deserialize into `T` (including when a
/// required key is absent).
pub fn parse_completion<T: DeserializeOwned>(text: &str) -> Result<T, GenerationError> {
    let span = first_json_object(text)
        .ok_or_else(|| GenerationError::malformed("completion contains no JSON object"))?;

    serde_json::from_str(span).map_err(|e| {
        tracing::debug!(error = %e, span_len = span.len(), "completion JSON did not match schema");
        GenerationError::malformed(format!("completion JSON does not match schema: {e}"))
    })
}
