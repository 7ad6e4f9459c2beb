//! Contact form runtime configuration.
//!
//! # Responsibility
//! - Hold EmailJS credentials and the success display window.
//! - Load both from process environment for executables.
//!
//! # Invariants
//! - Required ids are non-blank after trimming.
//! - Blank optional values behave as unset.

use crate::controller::submission::DEFAULT_DISPLAY_WINDOW;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Default EmailJS REST endpoint.
pub const EMAILJS_DEFAULT_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

pub const ENV_SERVICE_ID: &str = "CONTACT_EMAILJS_SERVICE_ID";
pub const ENV_TEMPLATE_ID: &str = "CONTACT_EMAILJS_TEMPLATE_ID";
pub const ENV_PUBLIC_KEY: &str = "CONTACT_EMAILJS_PUBLIC_KEY";
pub const ENV_PRIVATE_KEY: &str = "CONTACT_EMAILJS_PRIVATE_KEY";
pub const ENV_ENDPOINT: &str = "CONTACT_EMAILJS_ENDPOINT";
pub const ENV_SUCCESS_DISPLAY_MS: &str = "CONTACT_SUCCESS_DISPLAY_MS";

/// Configuration load/validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingVar(&'static str),
    InvalidValue { key: &'static str, reason: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingVar(key) => write!(f, "{key} must be set"),
            Self::InvalidValue { key, reason } => write!(f, "{key} is invalid: {reason}"),
        }
    }
}

impl Error for ConfigError {}

/// Credentials for one EmailJS service/template pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    /// Sent as `user_id`.
    pub public_key: String,
    /// Sent as `accessToken` when present.
    pub private_key: Option<String>,
    pub endpoint: String,
}

impl EmailJsConfig {
    /// Creates a config targeting the default endpoint.
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            service_id: require(ENV_SERVICE_ID, service_id.into())?,
            template_id: require(ENV_TEMPLATE_ID, template_id.into())?,
            public_key: require(ENV_PUBLIC_KEY, public_key.into())?,
            private_key: None,
            endpoint: EMAILJS_DEFAULT_ENDPOINT.to_string(),
        })
    }

    pub fn with_private_key(mut self, private_key: impl Into<String>) -> Self {
        self.private_key = non_blank(private_key.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        if let Some(endpoint) = non_blank(endpoint.into()) {
            self.endpoint = endpoint;
        }
        self
    }
}

/// Full configuration for one contact form deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactConfig {
    pub emailjs: EmailJsConfig,
    /// How long the success notice stays before the form returns to idle.
    pub success_display: Duration,
}

impl ContactConfig {
    pub fn new(emailjs: EmailJsConfig) -> Self {
        Self {
            emailjs,
            success_display: DEFAULT_DISPLAY_WINDOW,
        }
    }

    /// Loads configuration from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            lookup(key)
                .and_then(non_blank)
                .ok_or(ConfigError::MissingVar(key))
        };

        let mut emailjs = EmailJsConfig::new(
            required(ENV_SERVICE_ID)?,
            required(ENV_TEMPLATE_ID)?,
            required(ENV_PUBLIC_KEY)?,
        )?;
        if let Some(private_key) = lookup(ENV_PRIVATE_KEY) {
            emailjs = emailjs.with_private_key(private_key);
        }
        if let Some(endpoint) = lookup(ENV_ENDPOINT) {
            emailjs = emailjs.with_endpoint(endpoint);
        }

        let mut config = Self::new(emailjs);
        if let Some(raw) = lookup(ENV_SUCCESS_DISPLAY_MS).and_then(non_blank) {
            config.success_display = parse_display_ms(&raw)?;
        }
        Ok(config)
    }
}

fn parse_display_ms(raw: &str) -> Result<Duration, ConfigError> {
    let millis = raw
        .parse::<u64>()
        .map_err(|err| ConfigError::InvalidValue {
            key: ENV_SUCCESS_DISPLAY_MS,
            reason: err.to_string(),
        })?;
    if millis == 0 {
        return Err(ConfigError::InvalidValue {
            key: ENV_SUCCESS_DISPLAY_MS,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(Duration::from_millis(millis))
}

fn require(key: &'static str, value: String) -> Result<String, ConfigError> {
    non_blank(value).ok_or(ConfigError::MissingVar(key))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
