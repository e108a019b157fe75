#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;
pub mod workers;

use crate::adapters::TokenStore;
use crate::adapters::push::PushProvider;
use crate::api::ServiceContainer;
use crate::config::Config;
use crate::services::dispatch::DispatchService;
use crate::services::health_service::HealthService;
use crate::services::registration_service::RegistrationService;
use crate::workers::TokenCleanupWorker;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Background loops owned by the process.
#[derive(Debug)]
pub struct Workers {
    pub token_cleanup: TokenCleanupWorker,
}

impl Workers {
    #[must_use]
    pub fn spawn_all(self, shutdown_rx: watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        vec![tokio::spawn(self.token_cleanup.run(shutdown_rx))]
    }
}

#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
    pub workers: Workers,
}

/// Wires the process-wide token store and gateway client into the services.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    store: Option<Arc<dyn TokenStore>>,
    push_provider: Option<Arc<dyn PushProvider>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, store: None, push_provider: None }
    }

    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn with_push_provider(mut self, provider: Arc<dyn PushProvider>) -> Self {
        self.push_provider = Some(provider);
        self
    }

    /// Builds the services and workers.
    ///
    /// # Errors
    /// Returns an error if the token store or push provider was not supplied.
    pub fn build(self) -> anyhow::Result<App> {
        let store = self.store.ok_or_else(|| anyhow::anyhow!("Token store is required"))?;
        let push_provider = self.push_provider.ok_or_else(|| anyhow::anyhow!("Push provider is required"))?;

        let registration_service = RegistrationService::new(Arc::clone(&store));
        let dispatch_service = DispatchService::new(Arc::clone(&store), push_provider, &self.config.dispatch);
        let health_service = HealthService::new(Arc::clone(&store), self.config.health.clone());
        let token_cleanup = TokenCleanupWorker::new(store, &self.config.cleanup);

        Ok(App {
            services: ServiceContainer { registration_service, dispatch_service },
            health_service,
            workers: Workers { token_cleanup },
        })
    }
}

/// Flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}

/// Routes panics through tracing so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        tracing::error!(panic = %info, location = %location, "Process panicked");
    }));
}
