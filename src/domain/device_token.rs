use serde::Serialize;
use time::OffsetDateTime;

/// A single gateway-issued delivery address for one app installation.
///
/// Within one user's set the `token` is unique; re-registering the same token
/// refreshes `last_used` and the device label instead of adding a second entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceTokenRecord {
    pub token: String,
    pub device: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub last_used: OffsetDateTime,
}

/// Read-only snapshot of one user's registered devices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTokenSet {
    pub user_id: String,
    pub tokens: Vec<DeviceTokenRecord>,
}

impl UserTokenSet {
    #[must_use]
    pub const fn new(user_id: String, tokens: Vec<DeviceTokenRecord>) -> Self {
        Self { user_id, tokens }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
