//! Tag name validation.

use crate::defaults::MAX_TAG_LEN;

/// Validate a tag name.
///
/// Rules:
/// - Length between 1-100 characters
/// - Allowed characters: alphanumeric, hyphens (-), underscores (_), forward slashes (/)
/// - No spaces or other special characters
///
/// Returns Ok(()) if valid, Err with message if invalid.
pub fn validate_tag_name(tag: &str) -> std::result::Result<(), String> {
    if tag.is_empty() {
        return Err("Tag name cannot be empty".to_string());
    }
    if tag.len() > MAX_TAG_LEN {
        return Err(format!("Tag name must be {} characters or less", MAX_TAG_LEN));
    }

    let invalid_chars: Vec<char> = tag
        .chars()
        .filter(|c| !c.is_alphanumeric() && *c != '-' && *c != '_' && *c != '/')
        .collect();

    if !invalid_chars.is_empty() {
        let chars_display: String = invalid_chars
            .iter()
            .take(5)
            .map(|c| format!("'{}'", c))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!(
            "Tag contains invalid characters: {}. Only alphanumeric characters, hyphens, underscores, and forward slashes are allowed",
            chars_display
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tags() {
        assert!(validate_tag_name("rust").is_ok());
        assert!(validate_tag_name("version-control").is_ok());
        assert!(validate_tag_name("ci_cd").is_ok());
        assert!(validate_tag_name("lang/rust").is_ok());
        assert!(validate_tag_name("2024").is_ok());
    }

    #[test]
    fn test_empty_tag_rejected() {
        assert!(validate_tag_name("").is_err());
    }

    #[test]
    fn test_overlong_tag_rejected() {
        let tag = "a".repeat(MAX_TAG_LEN + 1);
        assert!(validate_tag_name(&tag).is_err());

        let tag = "a".repeat(MAX_TAG_LEN);
        assert!(validate_tag_name(&tag).is_ok());
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(validate_tag_name("has space").is_err());
        assert!(validate_tag_name("semi;colon").is_err());
        assert!(validate_tag_name("quote\"").is_err());
    }

    #[test]
    fn test_error_lists_offending_characters() {
        let err = validate_tag_name("a b!c").unwrap_err();
        assert!(err.contains("' '"));
        assert!(err.contains("'!'"));
    }
}
