use crate::api::schemas::push_tokens::validate_user_id;
use crate::domain::notification::{DispatchOutcome, NotificationRequest};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub(crate) const MAX_BULK_USERS: usize = 10_000;

fn validate_payload(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("title cannot be empty".into());
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl SendNotificationRequest {
    /// # Errors
    /// Returns an error if the user id or title is missing.
    pub fn validate(&self) -> Result<(), String> {
        validate_user_id(&self.user_id)?;
        validate_payload(&self.title)
    }

    #[must_use]
    pub fn into_parts(self) -> (String, NotificationRequest) {
        (self.user_id, NotificationRequest { title: self.title, body: self.body, data: self.data })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBulkNotificationRequest {
    pub user_ids: Vec<String>,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl SendBulkNotificationRequest {
    /// # Errors
    /// Returns an error if the user list is oversized, any user id is invalid, or the title is missing.
    pub fn validate(&self) -> Result<(), String> {
        if self.user_ids.len() > MAX_BULK_USERS {
            return Err(format!("Too many userIds (max {MAX_BULK_USERS})"));
        }
        self.user_ids.iter().try_for_each(|id| validate_user_id(id))?;
        validate_payload(&self.title)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, NotificationRequest) {
        (self.user_ids, NotificationRequest { title: self.title, body: self.body, data: self.data })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub success: bool,
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

impl From<DispatchOutcome> for DispatchResponse {
    fn from(outcome: DispatchOutcome) -> Self {
        Self {
            success: true,
            attempted: outcome.attempted,
            delivered: outcome.delivered,
            failed: outcome.failed,
        }
    }
}
