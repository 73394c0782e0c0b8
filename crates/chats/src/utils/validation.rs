//! Input checks for chat content.

use crate::types::ChatError;

/// Reject blank messages and messages longer than `max_length` characters.
///
/// Length is counted in Unicode scalar values, not bytes.
pub fn validate_message_content(content: &str, max_length: usize) -> Result<(), ChatError> {
    if content.trim().is_empty() {
        return Err(ChatError::validation("message content cannot be empty"));
    }

    let length = content.chars().count();
    if length > max_length {
        return Err(ChatError::validation(format!(
            "message content too long ({length} > {max_length} characters)"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_content() {
        assert!(validate_message_content("", 10).is_err());
        assert!(validate_message_content("   \n", 10).is_err());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mantra = "ॐ".repeat(10);
        assert!(validate_message_content(&mantra, 10).is_ok());
        assert!(validate_message_content(&mantra, 9).is_err());
    }
}
