use crate::domain::device_token::{DeviceTokenRecord, UserTokenSet};
use crate::error::Result;
use async_trait::async_trait;
use time::OffsetDateTime;

/// Durable mapping from a user to the set of device tokens registered for them.
///
/// Every mutation is a single atomic operation against the backing store so a
/// registration and a prune racing on the same user never lose an update.
#[async_trait]
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Inserts the token for the user, or refreshes `last_used` and the device
    /// label if the user already holds it.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn add_token(&self, user_id: &str, token: &str, device: Option<&str>) -> Result<()>;

    /// Returns the user's tokens, or an empty list if the user is unknown.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn get_tokens(&self, user_id: &str) -> Result<Vec<DeviceTokenRecord>>;

    /// Returns one set per user that has at least one token. Unknown users are absent.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn get_tokens_for_many(&self, user_ids: &[String]) -> Result<Vec<UserTokenSet>>;

    /// Removes a token from one user's set. No-op if absent.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn remove_token(&self, user_id: &str, token: &str) -> Result<()>;

    /// Removes a token from whichever user currently holds it. No-op if absent.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn remove_token_everywhere(&self, token: &str) -> Result<()>;

    /// Deletes every token whose `last_used` is older than `before`.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn remove_stale_tokens(&self, before: OffsetDateTime) -> Result<u64>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the store is unavailable.
    async fn check_health(&self) -> Result<()>;
}
