//! EmailJS REST send capability.
//!
//! # Responsibility
//! - Deliver contact messages through the EmailJS `email/send` endpoint.
//! - Collapse transport and provider failures into `SendError`.
//!
//! # Invariants
//! - Exactly one HTTP request per `send` call; no retries.
//! - Field contents are forwarded as template params and never logged.
//!
//! Non-browser callers must have API access enabled in the EmailJS account;
//! when strict mode is on, configure the private key as access token.

use crate::config::EmailJsConfig;
use crate::model::form::FormFields;
use crate::send::{SendCapability, SendError};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;

const PROVIDER_ID: &str = "emailjs";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Serialize)]
struct TemplateParams<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
}

/// `SendCapability` backed by the EmailJS REST API.
pub struct EmailJsSender {
    client: Client,
    config: EmailJsConfig,
}

impl EmailJsSender {
    /// Creates a sender with a dedicated HTTP client.
    pub fn new(config: EmailJsConfig) -> Result<Self, SendError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| SendError::with_source("failed to build EmailJS http client", err))?;
        Ok(Self { client, config })
    }

    fn request_body<'a>(&'a self, fields: &'a FormFields) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: TemplateParams {
                name: &fields.name,
                email: &fields.email,
                message: &fields.message,
            },
            access_token: self.config.private_key.as_deref(),
        }
    }
}

#[async_trait]
impl SendCapability for EmailJsSender {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    async fn send(&self, fields: &FormFields) -> Result<(), SendError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&self.request_body(fields))
            .send()
            .await
            .map_err(|err| {
                warn!("event=provider_request module=send status=error provider={PROVIDER_ID}");
                SendError::with_source("EmailJS request failed", err)
            })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) => {
                debug!(
                    "event=provider_body module=send status=error provider={PROVIDER_ID} \
                     error={err}"
                );
                String::new()
            }
        };
        debug!(
            "event=provider_response module=send provider={PROVIDER_ID} http_status={}",
            status.as_u16()
        );
        check_response(status, &body)
    }
}

fn check_response(status: StatusCode, body: &str) -> Result<(), SendError> {
    if status.is_success() {
        return Ok(());
    }
    let detail = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect::<String>();
    Err(SendError::new(format!(
        "EmailJS rejected message with status {}: {detail}",
        status.as_u16()
    )))
}

#[cfg(test)]
mod tests {
    use super::{check_response, EmailJsSender};
    use crate::config::EmailJsConfig;
    use crate::model::form::FormFields;
    use crate::send::SendCapability;
    use reqwest::StatusCode;

    fn config() -> EmailJsConfig {
        EmailJsConfig::new("service_test", "template_test", "public_test").expect("valid config")
    }

    #[test]
    fn request_body_matches_emailjs_shape() {
        let sender = EmailJsSender::new(config()).expect("sender");
        let fields = FormFields::new("Ada", "ada@example.com", "Hi");
        let body = serde_json::to_value(sender.request_body(&fields)).expect("serialize body");

        assert_eq!(body["service_id"], "service_test");
        assert_eq!(body["template_id"], "template_test");
        assert_eq!(body["user_id"], "public_test");
        assert_eq!(body["template_params"]["name"], "Ada");
        assert_eq!(body["template_params"]["email"], "ada@example.com");
        assert_eq!(body["template_params"]["message"], "Hi");
        assert!(body.get("accessToken").is_none());
        assert_eq!(sender.provider_id(), "emailjs");
    }

    #[test]
    fn request_body_carries_access_token_when_configured() {
        let sender = EmailJsSender::new(config().with_private_key("secret")).expect("sender");
        let fields = FormFields::new("Ada", "ada@example.com", "Hi");
        let body = serde_json::to_value(sender.request_body(&fields)).expect("serialize body");
        assert_eq!(body["accessToken"], "secret");
    }

    #[test]
    fn non_success_status_is_send_error() {
        assert!(check_response(StatusCode::OK, "OK").is_ok());

        let err = check_response(StatusCode::BAD_REQUEST, "The service ID is invalid")
            .expect_err("400 must fail");
        assert!(err.message().contains("400"));
        assert!(err.message().contains("service ID"));

        let long_body = "x".repeat(1_000);
        let err = check_response(StatusCode::INTERNAL_SERVER_ERROR, &long_body)
            .expect_err("500 must fail");
        assert!(err.message().len() < 300);
    }

    #[test]
    fn unreadable_body_leaves_status_in_charge() {
        assert!(check_response(StatusCode::OK, "").is_ok());

        let err = check_response(StatusCode::FORBIDDEN, "").expect_err("403 must fail");
        assert_eq!(err.message(), "EmailJS rejected message with status 403: ");
    }
}
