use crate::adapters::store::TokenStore;
use crate::config::HealthConfig;
use opentelemetry::{KeyValue, global, metrics::Gauge};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

#[derive(Clone, Debug)]
pub struct Metrics {
    pub status: Gauge<i64>,
}

impl Metrics {
    #[must_use]
    pub(crate) fn new() -> Self {
        let meter = global::meter("herald-server");
        Self {
            status: meter
                .i64_gauge("herald_health_status")
                .with_description("Status of health checks (1 for ok, 0 for error)")
                .build(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct HealthService {
    store: Arc<dyn TokenStore>,
    config: HealthConfig,
    metrics: Metrics,
}

impl HealthService {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, config: HealthConfig) -> Self {
        Self { store, config, metrics: Metrics::new() }
    }

    /// Checks token store connectivity.
    ///
    /// # Errors
    /// Returns a string describing the failure if the store is unreachable.
    pub async fn check_store(&self) -> Result<(), String> {
        let store_timeout = Duration::from_millis(self.config.store_timeout_ms);
        let attrs = [KeyValue::new("component", "token_store")];

        match timeout(store_timeout, self.store.check_health()).await {
            Ok(Ok(())) => {
                self.metrics.status.record(1, &attrs);
                Ok(())
            }
            Ok(Err(e)) => {
                self.metrics.status.record(0, &attrs);
                Err(format!("Token store check failed: {e}"))
            }
            Err(_) => {
                self.metrics.status.record(0, &attrs);
                Err("Token store check timed out".to_string())
            }
        }
    }
}
