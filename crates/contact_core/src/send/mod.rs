//! Outbound send capability.
//!
//! # Responsibility
//! - Abstract the transactional-email provider behind one async call.
//! - Keep provider-specific failure detail opaque to the controller.
//!
//! # Invariants
//! - Implementations are invoked at most once per accepted submit.
//! - Any failure is reported as `SendError`; callers never branch on its content.

pub mod emailjs;

use crate::model::form::FormFields;
use async_trait::async_trait;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Remote call that delivers one contact message.
#[async_trait]
pub trait SendCapability: Send + Sync {
    /// Short provider id used in diagnostic events.
    fn provider_id(&self) -> &str;

    /// Delivers the three form fields. Returns once the provider has accepted or rejected them.
    async fn send(&self, fields: &FormFields) -> Result<(), SendError>;
}

/// Opaque send failure.
pub struct SendError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

impl SendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Diagnostic message. Not meant for end users.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Debug for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendError")
            .field("message", &self.message)
            .field("has_source", &self.source.is_some())
            .finish()
    }
}

impl Display for SendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "{}: {source}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for SendError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::SendError;
    use std::error::Error;

    #[test]
    fn display_includes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = SendError::with_source("provider unreachable", io);
        assert_eq!(err.message(), "provider unreachable");
        assert!(err.to_string().contains("refused"));
        assert!(err.source().is_some());
    }

    #[test]
    fn plain_error_has_no_source() {
        let err = SendError::new("rejected");
        assert_eq!(err.to_string(), "rejected");
        assert!(err.source().is_none());
    }
}
