//! Contact form fields and submission status.
//!
//! # Responsibility
//! - Define the three-field record edited by the view.
//! - Define the status variants the view renders (button state, error banner, toast).
//!
//! # Invariants
//! - `FormFields::default()` is the empty form created at mount.
//! - `SubmissionStatus::Failed` always carries a user-facing reason.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Toast text rendered after a successful send.
pub const SUCCESS_NOTICE: &str = "Message sent successfully!";

/// Input id for the name field.
pub const FORM_FIELD_NAME: &str = "name";
/// Input id for the email field.
pub const FORM_FIELD_EMAIL: &str = "email";
/// Input id for the message field.
pub const FORM_FIELD_MESSAGE: &str = "message";

/// One editable input of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    /// Every field in validation order.
    pub const ALL: [FormField; 3] = [Self::Name, Self::Email, Self::Message];

    /// Stable input id used by views to address the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => FORM_FIELD_NAME,
            Self::Email => FORM_FIELD_EMAIL,
            Self::Message => FORM_FIELD_MESSAGE,
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one input id into a form field.
///
/// Ids are matched case-sensitively after trimming surrounding whitespace.
pub fn parse_form_field(value: &str) -> Result<FormField, FormFieldError> {
    let normalized = value.trim();
    if normalized.is_empty() {
        return Err(FormFieldError::EmptyField);
    }

    match normalized {
        FORM_FIELD_NAME => Ok(FormField::Name),
        FORM_FIELD_EMAIL => Ok(FormField::Email),
        FORM_FIELD_MESSAGE => Ok(FormField::Message),
        other => Err(FormFieldError::UnsupportedField(other.to_string())),
    }
}

/// Form field id parse errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormFieldError {
    EmptyField,
    UnsupportedField(String),
}

impl Display for FormFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField => write!(f, "form field id must not be empty"),
            Self::UnsupportedField(value) => write!(f, "form field is unsupported: {value}"),
        }
    }
}

impl Error for FormFieldError {}

/// Current values of the contact form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormFields {
    /// Builds a filled form, mostly useful for callers driving the form without a view.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    /// Replaces one field verbatim.
    ///
    /// Returns `true` when the stored value actually changed.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        };
        if *slot == value {
            return false;
        }
        *slot = value;
        true
    }

    /// Resets every field to empty.
    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }
}

/// Lifecycle state of one form's submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Interactive, nothing to report.
    #[default]
    Idle,
    /// One outbound send is in flight.
    Submitting,
    /// The last send succeeded; auto-dismissed after the display window.
    Succeeded,
    /// Validation or send failed; `reason` is shown verbatim.
    Failed { reason: String },
}

impl SubmissionStatus {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Error banner text, present only for `Failed`.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Toast the view should currently display.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Succeeded => Some(Notice {
                kind: NoticeKind::Success,
                text: SUCCESS_NOTICE.to_string(),
            }),
            Self::Failed { reason } => Some(Notice {
                kind: NoticeKind::Error,
                text: reason.clone(),
            }),
            Self::Idle | Self::Submitting => None,
        }
    }

    /// Stable status label for logs and FFI.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Visual flavor of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast shown at the bottom of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Consistent view of one form, published to observers on every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub fields: FormFields,
    pub status: SubmissionStatus,
}

#[cfg(test)]
mod tests {
    use super::{
        parse_form_field, FormField, FormFieldError, FormFields, NoticeKind, SubmissionStatus,
        SUCCESS_NOTICE,
    };

    #[test]
    fn parses_all_supported_form_fields() {
        for field in FormField::ALL {
            assert_eq!(
                parse_form_field(field.as_str()).expect("field id parse"),
                field
            );
        }
        assert_eq!(
            parse_form_field(" email ").expect("padded id parse"),
            FormField::Email
        );
    }

    #[test]
    fn rejects_empty_and_unknown_field_ids() {
        let err = parse_form_field("  ").expect_err("empty id must fail");
        assert_eq!(err, FormFieldError::EmptyField);

        let err = parse_form_field("Name").expect_err("ids are case-sensitive");
        assert_eq!(err, FormFieldError::UnsupportedField("Name".to_string()));

        let err = parse_form_field("phone").expect_err("unknown id must fail");
        assert!(err.to_string().contains("phone"));
    }

    #[test]
    fn set_reports_whether_value_changed() {
        let mut fields = FormFields::default();
        assert!(fields.set(FormField::Name, "Ada"));
        assert!(!fields.set(FormField::Name, "Ada"));
        assert!(fields.set(FormField::Name, " Ada "));
        assert_eq!(fields.get(FormField::Name), " Ada ");
    }

    #[test]
    fn clear_empties_every_field() {
        let mut fields = FormFields::new("Ada", "ada@example.com", "Hi");
        assert!(!fields.is_empty());
        fields.clear();
        assert!(fields.is_empty());
        assert_eq!(fields, FormFields::default());
    }

    #[test]
    fn notices_follow_status() {
        assert!(SubmissionStatus::Idle.notice().is_none());
        assert!(SubmissionStatus::Submitting.notice().is_none());

        let success = SubmissionStatus::Succeeded.notice().expect("success notice");
        assert_eq!(success.kind, NoticeKind::Success);
        assert_eq!(success.text, SUCCESS_NOTICE);

        let failed = SubmissionStatus::failed("Email is required");
        let error = failed.notice().expect("error notice");
        assert_eq!(error.kind, NoticeKind::Error);
        assert_eq!(error.text, "Email is required");
        assert_eq!(failed.error_message(), Some("Email is required"));
        assert_eq!(failed.label(), "failed");
    }
}
