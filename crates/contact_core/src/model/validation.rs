//! Local validation for contact form submissions.
//!
//! # Responsibility
//! - Decide whether a form may reach the send capability.
//! - Map each failure to the message the view shows verbatim.
//!
//! # Invariants
//! - Checks run in fixed order: name, email presence, email shape, message.
//! - Only the first failing check is reported.
//! - Emptiness is judged on trimmed values; the email shape on the raw value.

use crate::model::form::FormFields;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

// Deliberately loose `local@domain.tld` shape; not RFC 5322.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Locally detected reason a submission cannot proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    MissingName,
    MissingEmail,
    InvalidEmail,
    MissingMessage,
}

impl ValidationError {
    /// User-facing message rendered in the error banner.
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingName => "Name is required",
            Self::MissingEmail => "Email is required",
            Self::InvalidEmail => "Invalid email address",
            Self::MissingMessage => "Message is required",
        }
    }

    /// Stable code used in diagnostic events.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingName => "missing_name",
            Self::MissingEmail => "missing_email",
            Self::InvalidEmail => "invalid_email",
            Self::MissingMessage => "missing_message",
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

/// Returns whether `value` has the accepted email shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validates a form, short-circuiting on the first failure.
pub fn validate_fields(fields: &FormFields) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if fields.email.trim().is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(&fields.email) {
        return Err(ValidationError::InvalidEmail);
    }
    if fields.message.trim().is_empty() {
        return Err(ValidationError::MissingMessage);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, validate_fields, ValidationError};
    use crate::model::form::FormFields;

    #[test]
    fn accepts_complete_form() {
        let fields = FormFields::new("Ada", "ada@example.com", "Hi");
        assert_eq!(validate_fields(&fields), Ok(()));
    }

    #[test]
    fn reports_only_first_failure() {
        let fields = FormFields::default();
        assert_eq!(validate_fields(&fields), Err(ValidationError::MissingName));

        let fields = FormFields::new("Ada", "", "");
        assert_eq!(validate_fields(&fields), Err(ValidationError::MissingEmail));

        let fields = FormFields::new("Ada", "foo.com", "");
        assert_eq!(validate_fields(&fields), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn email_shape_matches_loose_pattern() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("foo.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("ada lovelace@example.com"));
        assert!(!is_valid_email(" ada@example.com"));
    }

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(ValidationError::MissingName.to_string(), "Name is required");
        assert_eq!(ValidationError::InvalidEmail.code(), "invalid_email");
    }
}
