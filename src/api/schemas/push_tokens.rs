use crate::domain::device_token::DeviceTokenRecord;
use serde::{Deserialize, Serialize};

pub(crate) const MAX_TOKEN_LEN: usize = 4096;
pub(crate) const MAX_USER_ID_LEN: usize = 255;

/// Validates a user id supplied by the caller.
///
/// # Errors
/// Returns an error if the id is blank or excessively long.
pub fn validate_user_id(user_id: &str) -> Result<(), String> {
    if user_id.trim().is_empty() {
        return Err("userId cannot be empty".into());
    }
    if user_id.len() > MAX_USER_ID_LEN {
        return Err(format!("userId is too long (max {MAX_USER_ID_LEN} characters)"));
    }
    Ok(())
}

fn validate_token(token: &str) -> Result<(), String> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err("Token cannot be empty".into());
    }
    if trimmed.len() > MAX_TOKEN_LEN {
        return Err(format!("Token is too long (max {MAX_TOKEN_LEN} characters)"));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPushTokenRequest {
    pub user_id: String,
    pub fcm_token: String,
    #[serde(default)]
    pub device_info: Option<String>,
}

impl RegisterPushTokenRequest {
    /// Validates the token registration payload.
    ///
    /// # Errors
    /// Returns an error if the user id or token is empty or excessively large (anti-abuse).
    pub fn validate(&self) -> Result<(), String> {
        validate_user_id(&self.user_id)?;
        validate_token(&self.fcm_token)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnregisterPushTokenRequest {
    pub user_id: String,
    pub fcm_token: String,
}

impl UnregisterPushTokenRequest {
    /// Validates the token removal payload.
    ///
    /// # Errors
    /// Returns an error if the user id or token is empty or excessively large.
    pub fn validate(&self) -> Result<(), String> {
        validate_user_id(&self.user_id)?;
        validate_token(&self.fcm_token)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PushTokenResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceListResponse {
    pub user_id: String,
    pub devices: Vec<DeviceTokenRecord>,
}
