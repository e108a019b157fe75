use crate::adapters::database::DbPool;
use crate::adapters::database::records::DeviceTokenRow;
use crate::adapters::store::TokenStore;
use crate::domain::device_token::{DeviceTokenRecord, UserTokenSet};
use crate::error::Result;
use async_trait::async_trait;
use time::OffsetDateTime;

/// Postgres-backed token store. One row per `(user_id, token)`.
#[derive(Clone, Debug)]
pub struct PgTokenStore {
    pool: DbPool,
}

impl PgTokenStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Folds rows ordered by `user_id` into one set per user.
fn group_by_user(rows: Vec<DeviceTokenRow>) -> Vec<UserTokenSet> {
    let mut sets: Vec<UserTokenSet> = Vec::new();
    for row in rows {
        match sets.last_mut() {
            Some(set) if set.user_id == row.user_id => set.tokens.push(row.into()),
            _ => {
                let user_id = row.user_id.clone();
                sets.push(UserTokenSet::new(user_id, vec![row.into()]));
            }
        }
    }
    sets
}

#[async_trait]
impl TokenStore for PgTokenStore {
    #[tracing::instrument(level = "debug", skip(self, token), err)]
    async fn add_token(&self, user_id: &str, token: &str, device: Option<&str>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO device_tokens (user_id, token, device, last_used)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id, token) DO UPDATE
            SET device = COALESCE(EXCLUDED.device, device_tokens.device),
                last_used = EXCLUDED.last_used
            "#,
        )
        .bind(user_id)
        .bind(token)
        .bind(device)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn get_tokens(&self, user_id: &str) -> Result<Vec<DeviceTokenRecord>> {
        let rows = sqlx::query_as::<_, DeviceTokenRow>(
            r#"
            SELECT user_id, token, device, last_used
            FROM device_tokens
            WHERE user_id = $1
            ORDER BY last_used DESC, token
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[tracing::instrument(level = "debug", skip(self, user_ids), fields(users = user_ids.len()), err)]
    async fn get_tokens_for_many(&self, user_ids: &[String]) -> Result<Vec<UserTokenSet>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, DeviceTokenRow>(
            r#"
            SELECT user_id, token, device, last_used
            FROM device_tokens
            WHERE user_id = ANY($1)
            ORDER BY user_id, last_used DESC, token
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(group_by_user(rows))
    }

    #[tracing::instrument(level = "debug", skip(self, token), err)]
    async fn remove_token(&self, user_id: &str, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM device_tokens WHERE user_id = $1 AND token = $2")
            .bind(user_id)
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self, token), err)]
    async fn remove_token_everywhere(&self, token: &str) -> Result<()> {
        sqlx::query("DELETE FROM device_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn remove_stale_tokens(&self, before: OffsetDateTime) -> Result<u64> {
        let result = sqlx::query("DELETE FROM device_tokens WHERE last_used < $1")
            .bind(before)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn check_health(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
