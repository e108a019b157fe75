use crate::adapters::push::{PushError, PushProvider};
use crate::config::GatewayConfig;
use crate::domain::notification::Envelope;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Firebase Cloud Messaging HTTP v1 client. One request per envelope.
///
/// The bearer token is used as given for the life of the process; it must be
/// refreshed outside the service before it expires.
#[derive(Debug, Clone)]
pub struct FcmPushProvider {
    client: reqwest::Client,
    send_url: String,
    access_token: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    message: Message<'a>,
}

#[derive(Serialize)]
struct Message<'a> {
    token: &'a str,
    notification: Notification<'a>,
    #[serde(skip_serializing_if = "is_empty")]
    data: &'a HashMap<String, String>,
}

fn is_empty(data: &&HashMap<String, String>) -> bool {
    data.is_empty()
}

#[derive(Serialize)]
struct Notification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: ErrorStatus,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDetail {
    #[serde(default)]
    error_code: Option<String>,
}

impl FcmPushProvider {
    /// Builds a client for the given project.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        config: &GatewayConfig,
        project_id: &str,
        access_token: impl Into<String>,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(Duration::from_millis(config.send_timeout_ms)).build()?;
        let send_url =
            format!("{}/v1/projects/{}/messages:send", config.fcm_endpoint.trim_end_matches('/'), project_id);
        Ok(Self { client, send_url, access_token: access_token.into() })
    }
}

/// Maps an FCM error response onto a `PushError`.
///
/// Only the `UNREGISTERED` error code, or an `INVALID_ARGUMENT` that names the
/// registration token, is treated as a dead token.
fn classify_error(status: StatusCode, body: &ErrorResponse) -> PushError {
    let error_code = body.error.details.iter().find_map(|d| d.error_code.as_deref());

    if error_code == Some("UNREGISTERED") {
        return PushError::Unregistered;
    }

    let invalid_argument = error_code == Some("INVALID_ARGUMENT") || body.error.status == "INVALID_ARGUMENT";
    if invalid_argument && body.error.message.to_ascii_lowercase().contains("registration token") {
        return PushError::InvalidToken;
    }

    if status == StatusCode::TOO_MANY_REQUESTS
        || error_code == Some("QUOTA_EXCEEDED")
        || body.error.status == "RESOURCE_EXHAUSTED"
    {
        return PushError::QuotaExceeded;
    }

    let code = error_code.unwrap_or(body.error.status.as_str());
    PushError::Other(anyhow::anyhow!("FCM returned {status} ({code}): {}", body.error.message))
}

#[async_trait]
impl PushProvider for FcmPushProvider {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn send_push(&self, envelope: &Envelope) -> Result<(), PushError> {
        let payload = SendRequest {
            message: Message {
                token: &envelope.token,
                notification: Notification { title: &envelope.title, body: &envelope.body },
                data: &envelope.data,
            },
        };

        let response = self
            .client
            .post(&self.send_url)
            .bearer_auth(&self.access_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { PushError::Timeout } else { PushError::Other(e.into()) })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // An unreadable error body still classifies as transient.
        let body = response.json::<ErrorResponse>().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }
}
