//! Account field rules: email, username, display name, password length.

use crate::error::CoreError;

/// Minimum username length.
pub const MIN_USERNAME_LEN: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LEN: usize = 32;

/// Maximum display name length.
pub const MAX_NAME_LEN: usize = 100;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LEN: usize = 128;

/// Emails are compared case-insensitively; they are stored trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate a username and return its normalized (lowercase) form.
///
/// Allowed characters are ASCII letters, digits, `_` and `-`.
pub fn normalize_username(username: &str) -> Result<String, CoreError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LEN..=MAX_USERNAME_LEN).contains(&len) {
        return Err(CoreError::Validation(format!(
            "Username must be between {MIN_USERNAME_LEN} and {MAX_USERNAME_LEN} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }
    Ok(username.to_ascii_lowercase())
}

/// Validate a display name and return it trimmed.
pub fn validate_display_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate password length bounds.
pub fn validate_password_length(password: &str) -> Result<(), CoreError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(CoreError::Validation(format!(
            "Password must be at most {MAX_PASSWORD_LEN} characters long"
        )));
    }
    Ok(())
}
