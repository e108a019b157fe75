use crate::adapters::store::TokenStore;
use crate::domain::device_token::{DeviceTokenRecord, UserTokenSet};
use crate::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// In-process token store used when no database is configured, and by tests.
///
/// Each user's set lives behind its `DashMap` shard lock, so every operation on
/// one user is applied atomically.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    users: DashMap<String, BTreeMap<String, DeviceTokenRecord>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens currently held across all users.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.users.iter().map(|entry| entry.value().len()).sum()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn add_token(&self, user_id: &str, token: &str, device: Option<&str>) -> Result<()> {
        let now = OffsetDateTime::now_utc();
        let mut tokens = self.users.entry(user_id.to_string()).or_default();
        tokens
            .entry(token.to_string())
            .and_modify(|record| {
                if let Some(device) = device {
                    record.device = Some(device.to_string());
                }
                record.last_used = now;
            })
            .or_insert_with(|| DeviceTokenRecord {
                token: token.to_string(),
                device: device.map(str::to_string),
                last_used: now,
            });
        Ok(())
    }

    async fn get_tokens(&self, user_id: &str) -> Result<Vec<DeviceTokenRecord>> {
        Ok(self.users.get(user_id).map(|tokens| tokens.values().cloned().collect()).unwrap_or_default())
    }

    async fn get_tokens_for_many(&self, user_ids: &[String]) -> Result<Vec<UserTokenSet>> {
        let sets = user_ids
            .iter()
            .filter_map(|user_id| {
                let tokens = self.users.get(user_id)?;
                Some(UserTokenSet::new(user_id.clone(), tokens.values().cloned().collect()))
            })
            .filter(|set| !set.is_empty())
            .collect();
        Ok(sets)
    }

    async fn remove_token(&self, user_id: &str, token: &str) -> Result<()> {
        self.users.remove_if_mut(user_id, |_, tokens| {
            tokens.remove(token);
            tokens.is_empty()
        });
        Ok(())
    }

    async fn remove_token_everywhere(&self, token: &str) -> Result<()> {
        self.users.retain(|_, tokens| {
            tokens.remove(token);
            !tokens.is_empty()
        });
        Ok(())
    }

    async fn remove_stale_tokens(&self, before: OffsetDateTime) -> Result<u64> {
        let mut removed = 0u64;
        self.users.retain(|_, tokens| {
            let len = tokens.len();
            tokens.retain(|_, record| record.last_used >= before);
            removed += (len - tokens.len()) as u64;
            !tokens.is_empty()
        });
        Ok(removed)
    }

    async fn check_health(&self) -> Result<()> {
        Ok(())
    }
}
