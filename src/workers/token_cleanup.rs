use crate::adapters::store::TokenStore;
use crate::config::CleanupConfig;
use crate::error::AppError;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::Instrument;

/// Sweeps device tokens that have not been re-registered within the stale horizon.
#[derive(Debug)]
pub struct TokenCleanupWorker {
    store: Arc<dyn TokenStore>,
    interval_secs: u64,
    stale_token_days: i64,
}

impl TokenCleanupWorker {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, config: &CleanupConfig) -> Self {
        Self { store, interval_secs: config.interval_secs, stale_token_days: config.stale_token_days }
    }

    pub async fn run(self, mut shutdown: tokio::sync::watch::Receiver<bool>) {
        if self.interval_secs == 0 {
            tracing::info!("Stale token cleanup is disabled (interval = 0)");
            return;
        }

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));

        while !*shutdown.borrow() {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = self.perform_cleanup()
                        .instrument(tracing::info_span!("run_token_cleanup"))
                        .await
                    {
                        tracing::error!(error = ?e, "Stale token cleanup iteration failed");
                    }
                }
                _ = shutdown.changed() => {}
            }
        }
        tracing::info!("Stale token cleanup loop shutting down...");
    }

    /// Deletes every token last registered before the stale horizon.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the token store is unavailable.
    #[tracing::instrument(skip(self), err, fields(stale_deleted = tracing::field::Empty))]
    pub async fn perform_cleanup(&self) -> Result<u64, AppError> {
        let cutoff = OffsetDateTime::now_utc() - time::Duration::days(self.stale_token_days);
        let count = self.store.remove_stale_tokens(cutoff).await?;

        if count > 0 {
            tracing::info!(count = %count, "Deleted stale device tokens");
            tracing::Span::current().record("stale_deleted", count);
        }

        Ok(count)
    }
}
