pub mod fcm;

use crate::domain::notification::{DeliveryOutcome, Envelope};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PushError {
    #[error("Token is no longer registered")]
    Unregistered,
    #[error("Token is not a valid registration token")]
    InvalidToken,
    #[error("Rate limit exceeded")]
    QuotaExceeded,
    #[error("Gateway request timed out")]
    Timeout,
    #[error("External service error: {0}")]
    Other(#[from] anyhow::Error),
}

impl PushError {
    /// Whether the gateway has told us the token can never be delivered to again.
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::Unregistered | Self::InvalidToken)
    }

    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::InvalidToken => "invalid_token",
            Self::QuotaExceeded => "quota_exceeded",
            Self::Timeout => "timeout",
            Self::Other(_) => "other",
        }
    }
}

impl From<Result<(), PushError>> for DeliveryOutcome {
    fn from(result: Result<(), PushError>) -> Self {
        match result {
            Ok(()) => Self::Delivered,
            Err(e) if e.is_permanent() => Self::PermanentInvalidToken,
            Err(e) => Self::TransientFailure(e.to_string()),
        }
    }
}

#[async_trait]
pub trait PushProvider: Send + Sync + std::fmt::Debug {
    /// Sends one envelope to the device its token addresses.
    ///
    /// # Errors
    /// Returns `PushError::Unregistered` or `PushError::InvalidToken` if the token should be deleted.
    /// Any other variant is transient and must leave the token in place.
    async fn send_push(&self, envelope: &Envelope) -> Result<(), PushError>;
}

/// Stand-in gateway used when no FCM credentials are configured.
#[derive(Debug, Default)]
pub struct LogPushProvider;

#[async_trait]
impl PushProvider for LogPushProvider {
    async fn send_push(&self, envelope: &Envelope) -> Result<(), PushError> {
        tracing::info!(token = %envelope.token, title = %envelope.title, "FCM not configured, logging push notification");
        Ok(())
    }
}
