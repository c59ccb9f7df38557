//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest username the chat platform hands out.
const MAX_USERNAME_LENGTH: usize = 32;

/// Validates a chat username (without the leading `@`).
///
/// # Examples
///
/// ```ignore
/// validate_username("derkling")   // Ok
/// validate_username("@derkling")  // Err - leading @
/// validate_username("two words")  // Err - whitespace
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        let mut err = ValidationError::new("username_length");
        err.message = Some(
            format!(
                "Username must be between 1 and {MAX_USERNAME_LENGTH} characters (got {})",
                username.len()
            )
            .into(),
        );
        return Err(err);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        let mut err = ValidationError::new("username_format");
        err.message = Some("Username must contain only letters, digits and underscores".into());
        return Err(err);
    }

    Ok(())
}
