//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// True when an optional field carries no visible content.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |value| value.trim().is_empty())
}

/// Mask a secret for terminal output, keeping only its length visible.
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        "\u{2022}".repeat(value.chars().count().min(12))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_empty() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some("   ".to_string())), None);
    }

    #[test]
    fn normalize_text_option_trims_value() {
        assert_eq!(
            normalize_text_option(Some(" otpauth://totp/x ".to_string())),
            Some("otpauth://totp/x".to_string())
        );
    }

    #[test]
    fn is_blank_treats_whitespace_as_empty() {
        assert!(is_blank(None));
        assert!(is_blank(Some(" \t")));
        assert!(!is_blank(Some("note")));
    }

    #[test]
    fn mask_secret_caps_length() {
        assert_eq!(mask_secret(""), "");
        assert_eq!(mask_secret("abc").chars().count(), 3);
        assert_eq!(mask_secret(&"x".repeat(40)).chars().count(), 12);
    }
}
