//! Input sanitization and validation.
//!
//! Note content is escaped for markup characters before it is stored, and
//! bounded in length. Lengths are counted in characters, not bytes.

use thiserror::Error;

/// Maximum note length, in characters, after trimming.
pub const MAX_CONTENT_CHARS: usize = 10_000;

/// Maximum search term length, in characters, after sanitizing.
pub const MAX_SEARCH_CHARS: usize = 1_000;

/// Why a piece of note content was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Note content cannot be empty")]
    EmptyContent,

    #[error("Note content is too long (max {max} characters)")]
    ContentTooLong { max: usize },
}

/// Escape `< > " ' /` to HTML entities and trim surrounding whitespace.
///
/// The output never contains any of the escaped characters, so applying
/// this twice yields the same string.
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.trim().chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            other => out.push(other),
        }
    }
    out
}

/// Validate raw note content and return its sanitized form.
///
/// # Errors
///
/// Returns `ValidationError::EmptyContent` if the trimmed content is empty,
/// or `ValidationError::ContentTooLong` if it exceeds [`MAX_CONTENT_CHARS`].
pub fn validate_content(content: &str) -> Result<String, ValidationError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    if trimmed.chars().count() > MAX_CONTENT_CHARS {
        return Err(ValidationError::ContentTooLong {
            max: MAX_CONTENT_CHARS,
        });
    }
    Ok(sanitize(trimmed))
}

/// Sanitize a search term and cap it at [`MAX_SEARCH_CHARS`].
///
/// An empty result is valid and means "no filter".
pub fn validate_search_term(term: &str) -> String {
    sanitize(term).chars().take(MAX_SEARCH_CHARS).collect()
}
