//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Letters and whitespace only
static FULL_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").unwrap());

/// local-part@domain.tld, where every word character is ASCII `[A-Za-z0-9_]`
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .unwrap()
});

/// At least 8 characters on a single line
static PASSWORD_LENGTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\n\r\x{2028}\x{2029}]{8,}$").unwrap());

static DIGIT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());
static LOWERCASE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]").unwrap());
static UPPERCASE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]").unwrap());

/// Errors that can occur during user validation
///
/// The display strings are the messages returned to API clients.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("Please provide all required fields")]
    MissingRequiredFields,

    #[error("Please provide the email and the field(s) to update")]
    MissingUpdateFields,

    #[error("Please provide the email of the user to delete")]
    MissingDeleteEmail,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid full name")]
    InvalidFullName,

    #[error(
        "Password must be at least 8 characters long and include uppercase letters, lowercase letters, and numbers"
    )]
    InvalidPassword,

    #[error("Invalid password format")]
    InvalidNewPassword,
}

/// The kinds of user field that carry a format rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    FullName,
    Email,
    Password,
}

/// Test a candidate string against the format rule for `kind`
pub fn is_valid(kind: FieldKind, candidate: &str) -> bool {
    match kind {
        FieldKind::FullName => FULL_NAME_PATTERN.is_match(candidate),
        FieldKind::Email => EMAIL_PATTERN.is_match(candidate),
        FieldKind::Password => {
            PASSWORD_LENGTH_PATTERN.is_match(candidate)
                && DIGIT_PATTERN.is_match(candidate)
                && LOWERCASE_PATTERN.is_match(candidate)
                && UPPERCASE_PATTERN.is_match(candidate)
        }
    }
}

/// Validate a full name
///
/// Rules:
/// - At least one character
/// - Only ASCII letters and whitespace
pub fn validate_full_name(full_name: &str) -> Result<(), UserValidationError> {
    if !is_valid(FieldKind::FullName, full_name) {
        return Err(UserValidationError::InvalidFullName);
    }

    Ok(())
}

/// Validate an email address
///
/// The rule is deliberately loose: one or more word characters, optionally separated by
/// single dots or hyphens, an `@`, a domain of the same shape, and one or more 2–3
/// character suffixes.
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if !is_valid(FieldKind::Email, email) {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Minimum 8 characters, no line breaks
/// - At least one digit, one lowercase and one uppercase ASCII letter
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if !is_valid(FieldKind::Password, password) {
        return Err(UserValidationError::InvalidPassword);
    }

    Ok(())
}
