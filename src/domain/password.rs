use super::DomainError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Characters that satisfy the "special character" rule.
pub const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// Checks password strength. Rules are applied in order and the first failure is reported:
/// length, then a letter, then a digit, then one of [`PASSWORD_SYMBOLS`].
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::PasswordMissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(DomainError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Err(DomainError::PasswordMissingSymbol);
    }
    Ok(())
}
