use crate::adapters::store::TokenStore;
use crate::domain::device_token::DeviceTokenRecord;
use crate::error::Result;
use std::sync::Arc;

/// Write path for device tokens. Deduplication is the store's job.
#[derive(Clone, Debug)]
pub struct RegistrationService {
    store: Arc<dyn TokenStore>,
}

impl RegistrationService {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Registers a device token for a user, or refreshes an existing registration.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the token store is unavailable.
    #[tracing::instrument(skip(self, token), err)]
    pub async fn register(&self, user_id: &str, token: &str, device: Option<&str>) -> Result<()> {
        self.store.add_token(user_id, token, device).await?;
        tracing::debug!("Device token registered");
        Ok(())
    }

    /// Removes a device token from a user. Succeeds if it was already gone.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the token store is unavailable.
    #[tracing::instrument(skip(self, token), err)]
    pub async fn unregister(&self, user_id: &str, token: &str) -> Result<()> {
        self.store.remove_token(user_id, token).await
    }

    /// Lists the devices currently registered for a user.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the token store is unavailable.
    pub async fn list_devices(&self, user_id: &str) -> Result<Vec<DeviceTokenRecord>> {
        self.store.get_tokens(user_id).await
    }
}
