use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Maximum comment length in characters, measured after trimming.
pub const MAX_COMMENT_LENGTH: usize = 2000;

/// Maximum length of a guest author name.
pub const MAX_AUTHOR_NAME_LENGTH: usize = 100;

/// Elements whose text content is dropped together with the tags.
static NON_TEXT_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>|<textarea\b[^>]*>.*?</textarea\s*>|<option\b[^>]*>.*?</option\s*>",
    )
    .expect("valid regex")
});

static MARKUP_COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));

static TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[!/?]?[a-zA-Z][^>]*>").expect("valid regex"));

/// Comment entity. Content is always plain text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub blog_id: i32,
    pub content: String,
    pub author_name: String,
    pub is_author: bool,
    pub created_at: DateTime<Utc>,
}

/// A validated comment ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    pub blog_id: i32,
    pub content: String,
    pub author_name: String,
    pub is_author: bool,
}

fn strip_once(input: &str) -> String {
    let without_blocks = NON_TEXT_ELEMENTS.replace_all(input, "");
    let without_comments = MARKUP_COMMENTS.replace_all(&without_blocks, "");
    TAGS.replace_all(&without_comments, "").into_owned()
}

/// Remove every tag from `input`, keeping the text between them.
///
/// Script, style, textarea and option elements lose their content too.
/// Passes repeat until nothing changes, since removing an inner tag can
/// join the surrounding fragments into a new one.
pub fn strip_markup(input: &str) -> String {
    let mut current = strip_once(input);
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Validate raw comment text and return its markup-free form.
pub fn sanitize_comment(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Comment cannot be empty"));
    }

    if trimmed.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::validation(format!(
            "Comment cannot exceed {MAX_COMMENT_LENGTH} characters"
        )));
    }

    let sanitized = strip_markup(trimmed).trim().to_string();
    if sanitized.is_empty() {
        return Err(DomainError::validation("Comment cannot be empty"));
    }

    Ok(sanitized)
}

/// Validate a display name for a comment author.
pub fn validate_author_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_AUTHOR_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Author name must be between 1 and {MAX_AUTHOR_NAME_LENGTH} characters"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_script_and_tags() {
        let out = strip_markup("Hello <script>alert('x')</script><b>world</b>!");
        assert_eq!(out, "Hello world!");
    }

    #[test]
    fn test_strip_nested_fragments() {
        let out = strip_markup("<<b>script>alert(1)<</b>/script>");
        assert!(!out.contains('<'), "{out}");
        assert!(!out.contains("alert"), "{out}");

        let out = sanitize_comment("hi <<i>img src=x onerror=alert(1)<i>> there").unwrap();
        assert!(!out.contains('<'), "{out}");
        assert!(out.starts_with("hi") && out.ends_with("there"));

        assert!(sanitize_comment("<<b>script>alert(1)<</b>/script>").is_err());
    }

    #[test]
    fn test_strip_keeps_plain_comparisons() {
        assert_eq!(strip_markup("a < b and 3 > 2"), "a < b and 3 > 2");
    }

    #[test]
    fn test_strip_handles_attributes_and_comments() {
        let out = strip_markup(r#"<a href="x" onclick="evil()">link</a><!-- hidden -->"#);
        assert_eq!(out, "link");
    }

    #[test]
    fn test_strip_unclosed_script_tag() {
        assert_eq!(strip_markup("<SCRIPT>alert(1)"), "alert(1)");
    }

    #[test]
    fn test_sanitize_rejects_empty() {
        assert!(sanitize_comment("   \n").is_err());
        assert!(sanitize_comment("<b></b>").is_err());
    }

    #[test]
    fn test_sanitize_length_limit() {
        let exact = "a".repeat(MAX_COMMENT_LENGTH);
        assert_eq!(sanitize_comment(&exact).unwrap().len(), MAX_COMMENT_LENGTH);

        let padded = format!("  {exact}  ");
        assert!(sanitize_comment(&padded).is_ok());

        let too_long = "a".repeat(MAX_COMMENT_LENGTH + 1);
        let err = sanitize_comment(&too_long).unwrap_err();
        assert_eq!(err.to_string(), "Comment cannot exceed 2000 characters");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let accented = "é".repeat(MAX_COMMENT_LENGTH);
        assert!(sanitize_comment(&accented).is_ok());
    }

    #[test]
    fn test_author_name() {
        assert_eq!(validate_author_name("  Ada ").unwrap(), "Ada");
        assert!(validate_author_name(" ").is_err());
        assert!(validate_author_name(&"x".repeat(101)).is_err());
    }
}
