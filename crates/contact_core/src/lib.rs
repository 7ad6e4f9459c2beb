//! Core contact-form logic for the landing site.
//! This crate is the single source of truth for submission invariants.

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod send;

pub use config::{ConfigError, ContactConfig, EmailJsConfig};
pub use controller::reset_timer::ScheduledReset;
pub use controller::submission::{
    FormSubmissionController, SubmitOutcome, DEFAULT_DISPLAY_WINDOW, SEND_FAILURE_MESSAGE,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::form::{
    parse_form_field, FormField, FormFieldError, FormFields, FormSnapshot, Notice, NoticeKind,
    SubmissionStatus, SUCCESS_NOTICE,
};
pub use model::validation::{is_valid_email, validate_fields, ValidationError};
pub use send::emailjs::EmailJsSender;
pub use send::{SendCapability, SendError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
