//! Input validation utilities

/// Column width of `users.name` and `users.email`
pub const MAX_FIELD_LENGTH: usize = 256;

/// Validate name
pub fn validate_name(name: &str) -> Result<(), String> {
    if name.chars().count() > MAX_FIELD_LENGTH {
        return Err(format!(
            "Name must be at most {} characters long",
            MAX_FIELD_LENGTH
        ));
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }

    if email.chars().count() > MAX_FIELD_LENGTH {
        return Err(format!(
            "Email must be at most {} characters long",
            MAX_FIELD_LENGTH
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("").is_ok());
        assert!(validate_name("name").is_ok());
        assert!(validate_name(&"あ".repeat(MAX_FIELD_LENGTH)).is_ok());
        assert!(validate_name(&"a".repeat(MAX_FIELD_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("hoge@example.com").is_ok());
        assert_eq!(validate_email(""), Err("Email is required".to_string()));
        assert!(validate_email(&"a".repeat(MAX_FIELD_LENGTH + 1)).is_err());
    }
}
