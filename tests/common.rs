#![allow(dead_code)]

use async_trait::async_trait;
use herald_server::adapters::TokenStore;
use herald_server::adapters::memory::MemoryTokenStore;
use herald_server::adapters::push::{PushError, PushProvider};
use herald_server::api::MgmtState;
use herald_server::config::Config;
use herald_server::domain::device_token::{DeviceTokenRecord, UserTokenSet};
use herald_server::domain::notification::Envelope;
use herald_server::error::{AppError, Result as StoreResult};
use herald_server::{AppBuilder, telemetry};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use time::OffsetDateTime;

/// Gateway double: tokens listed in `dead` are unregistered, tokens in `flaky`
/// fail transiently, everything else is delivered.
#[derive(Debug, Default)]
pub struct FakeGateway {
    dead: Mutex<Vec<String>>,
    flaky: Mutex<Vec<String>>,
    sent: Mutex<Vec<Envelope>>,
}

impl FakeGateway {
    pub fn mark_dead(&self, token: &str) {
        self.dead.lock().unwrap().push(token.to_string());
    }

    pub fn mark_flaky(&self, token: &str) {
        self.flaky.lock().unwrap().push(token.to_string());
    }

    pub fn sent(&self) -> Vec<Envelope> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_tokens(&self) -> Vec<String> {
        self.sent().into_iter().map(|e| e.token).collect()
    }
}

#[async_trait]
impl PushProvider for FakeGateway {
    async fn send_push(&self, envelope: &Envelope) -> Result<(), PushError> {
        self.sent.lock().unwrap().push(envelope.clone());
        if self.dead.lock().unwrap().contains(&envelope.token) {
            return Err(PushError::Unregistered);
        }
        if self.flaky.lock().unwrap().contains(&envelope.token) {
            return Err(PushError::Timeout);
        }
        Ok(())
    }
}

/// Wraps the in-memory store so a test can make every store call fail.
#[derive(Debug)]
pub struct OutageStore {
    inner: Arc<MemoryTokenStore>,
    down: AtomicBool,
}

impl OutageStore {
    fn check(&self) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl TokenStore for OutageStore {
    async fn add_token(&self, user_id: &str, token: &str, device: Option<&str>) -> StoreResult<()> {
        self.check()?;
        self.inner.add_token(user_id, token, device).await
    }

    async fn get_tokens(&self, user_id: &str) -> StoreResult<Vec<DeviceTokenRecord>> {
        self.check()?;
        self.inner.get_tokens(user_id).await
    }

    async fn get_tokens_for_many(&self, user_ids: &[String]) -> StoreResult<Vec<UserTokenSet>> {
        self.check()?;
        self.inner.get_tokens_for_many(user_ids).await
    }

    async fn remove_token(&self, user_id: &str, token: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.remove_token(user_id, token).await
    }

    async fn remove_token_everywhere(&self, token: &str) -> StoreResult<()> {
        self.check()?;
        self.inner.remove_token_everywhere(token).await
    }

    async fn remove_stale_tokens(&self, before: OffsetDateTime) -> StoreResult<u64> {
        self.check()?;
        self.inner.remove_stale_tokens(before).await
    }

    async fn check_health(&self) -> StoreResult<()> {
        self.check()?;
        self.inner.check_health().await
    }
}

pub struct TestApp {
    pub server_url: String,
    pub mgmt_url: String,
    pub client: reqwest::Client,
    pub store: Arc<MemoryTokenStore>,
    pub outage: Arc<OutageStore>,
    pub gateway: Arc<FakeGateway>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_config(Config::default()).await
    }

    pub async fn spawn_with_config(config: Config) -> Self {
        telemetry::init_test_telemetry();

        let store = Arc::new(MemoryTokenStore::new());
        let outage = Arc::new(OutageStore { inner: Arc::clone(&store), down: AtomicBool::new(false) });
        let gateway = Arc::new(FakeGateway::default());

        let app = AppBuilder::new(config)
            .with_store(Arc::clone(&outage) as Arc<dyn TokenStore>)
            .with_push_provider(Arc::clone(&gateway) as Arc<dyn PushProvider>)
            .build()
            .expect("Failed to build app");

        let router = herald_server::api::app_router(app.services);
        let mgmt = herald_server::api::mgmt_router(MgmtState { health_service: app.health_service });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let server_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let mgmt_listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mgmt_url = format!("http://{}", mgmt_listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(mgmt_listener, mgmt).await.unwrap();
        });

        Self { server_url, mgmt_url, client: reqwest::Client::new(), store, outage, gateway }
    }

    /// Makes every subsequent token store call fail.
    pub fn take_store_down(&self) {
        self.outage.down.store(true, Ordering::SeqCst);
    }

    pub async fn register(&self, user_id: &str, token: &str, device: Option<&str>) -> reqwest::Response {
        let mut payload = serde_json::json!({ "userId": user_id, "fcmToken": token });
        if let Some(device) = device {
            payload["deviceInfo"] = Value::String(device.to_string());
        }
        self.client.post(format!("{}/v1/tokens", self.server_url)).json(&payload).send().await.unwrap()
    }

    pub async fn notify(&self, user_id: &str, title: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/v1/notifications", self.server_url))
            .json(&serde_json::json!({ "userId": user_id, "title": title, "body": "body" }))
            .send()
            .await
            .unwrap()
    }

    pub async fn notify_many(&self, user_ids: &[&str], title: &str, data: HashMap<&str, &str>) -> reqwest::Response {
        self.client
            .post(format!("{}/v1/notifications/bulk", self.server_url))
            .json(&serde_json::json!({ "userIds": user_ids, "title": title, "body": "body", "data": data }))
            .send()
            .await
            .unwrap()
    }
}
