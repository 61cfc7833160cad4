//! Field validation rules shared by request DTOs and the service layer.

use validator::ValidationError;

use crate::config::{MAX_NAME_LENGTH, MIN_NAME_LENGTH};

/// Name must be 2-100 characters once surrounding whitespace is trimmed.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&len) {
        Ok(())
    } else {
        let mut err = ValidationError::new("length");
        err.message = Some(
            format!(
                "Name must be between {} and {} characters",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH
            )
            .into(),
        );
        Err(err)
    }
}

/// Simplified address syntax: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("email");
        err.message = Some("Invalid email format".into());
        Err(err)
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Render a rule failure as the message carried by `AppError::Validation`.
pub fn describe(err: &ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}
