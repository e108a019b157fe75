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

use herald_server::adapters::TokenStore;
use herald_server::adapters::database::device_token_repo::PgTokenStore;
use herald_server::adapters::memory::MemoryTokenStore;
use herald_server::adapters::push::fcm::FcmPushProvider;
use herald_server::adapters::push::{LogPushProvider, PushProvider};
use herald_server::api::MgmtState;
use herald_server::config::Config;
use herald_server::{AppBuilder, adapters, telemetry};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::Instrument;

async fn build_store(config: &Config) -> anyhow::Result<Arc<dyn TokenStore>> {
    if let Some(url) = &config.database_url {
        let pool = adapters::database::init_pool(url, &config.database).await?;
        adapters::database::run_migrations(&pool).await?;
        Ok(Arc::new(PgTokenStore::new(pool)))
    } else {
        tracing::warn!("No database configured, device tokens will not survive a restart");
        Ok(Arc::new(MemoryTokenStore::new()))
    }
}

fn build_push_provider(config: &Config) -> anyhow::Result<Arc<dyn PushProvider>> {
    match (&config.gateway.fcm_project_id, &config.gateway.fcm_access_token) {
        (Some(project_id), Some(access_token)) => {
            Ok(Arc::new(FcmPushProvider::new(&config.gateway, project_id, access_token.clone())?))
        }
        _ => {
            tracing::warn!("FCM credentials not configured, notifications will only be logged");
            Ok(Arc::new(LogPushProvider))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    herald_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, shutdown_tx, shutdown_rx, workers) = async {
        // Phase 1: Infrastructure Setup (Resources)
        let store = build_store(&config).await?;
        let push_provider = build_push_provider(&config)?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        herald_server::spawn_signal_handler(shutdown_tx.clone());

        // Phase 2: Component Wiring
        let app = AppBuilder::new(config.clone()).with_store(store).with_push_provider(push_provider).build()?;

        // Phase 3: Runtime Setup (Listeners and Routers)
        let app_router = herald_server::api::app_router(app.services);
        let mgmt_app = herald_server::api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        tracing::info!(address = %api_addr, batch_limit = config.dispatch.batch_limit.get(), "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        Ok::<
            (
                tokio::net::TcpListener,
                tokio::net::TcpListener,
                axum::Router,
                axum::Router,
                watch::Sender<bool>,
                watch::Receiver<bool>,
                herald_server::Workers,
            ),
            anyhow::Error,
        >((api_listener, mgmt_listener, app_router, mgmt_app, shutdown_tx, shutdown_rx, app.workers))
    }
    .instrument(boot_span)
    .await?;

    // Phase 4: Start Runtime
    let worker_tasks = workers.spawn_all(shutdown_rx.clone());

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
        tracing::error!(error = %e, "Server error");
    }

    // Phase 5: Graceful Shutdown Orchestration
    let _ = shutdown_tx.send(true);
    tokio::select! {
        () = async {
            futures::future::join_all(worker_tasks).await;
        } => {
            tracing::info!("Background tasks finished.");
        }
        () = tokio::time::sleep(std::time::Duration::from_secs(config.server.shutdown_timeout_secs)) => {
            tracing::warn!("Timeout waiting for background tasks to finish.");
        }
    }

    telemetry_guard.shutdown();
    Ok(())
}
