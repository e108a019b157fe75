pub mod batcher;

use crate::adapters::push::PushProvider;
use crate::adapters::store::TokenStore;
use crate::config::DispatchConfig;
use crate::domain::device_token::UserTokenSet;
use crate::domain::notification::{DeliveryOutcome, DispatchOutcome, Envelope, NotificationRequest};
use crate::error::{AppError, Result};
use batcher::batches;
use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram},
};
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::Instrument;

#[derive(Clone, Debug)]
struct Metrics {
    sent: Counter<u64>,
    errors: Counter<u64>,
    invalidated_tokens: Counter<u64>,
    batch_size: Histogram<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("herald-server");
        Self {
            sent: meter
                .u64_counter("push_sent_total")
                .with_description("Total number of push notifications successfully sent")
                .build(),
            errors: meter
                .u64_counter("push_errors_total")
                .with_description("Total number of push notification delivery errors")
                .build(),
            invalidated_tokens: meter
                .u64_counter("push_invalidated_tokens_total")
                .with_description("Total number of push tokens the gateway reported as permanently invalid")
                .build(),
            batch_size: meter
                .u64_histogram("push_dispatch_batch_size")
                .with_description("Number of concurrent sends per dispatch batch")
                .build(),
        }
    }
}

/// How a dead token is removed from the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PruneScope {
    /// Only from the user the token was resolved for.
    Owner,
    /// From whichever user holds it.
    Everywhere,
}

#[derive(Debug, Clone)]
struct Target {
    user_id: String,
    token: String,
}

/// Resolves recipients to device tokens, fans envelopes out to the gateway in
/// bounded batches, and prunes tokens the gateway reports as dead.
///
/// Holds no per-call state; clones share the same store and gateway handles.
#[derive(Clone, Debug)]
pub struct DispatchService {
    store: Arc<dyn TokenStore>,
    provider: Arc<dyn PushProvider>,
    batch_limit: NonZeroUsize,
    metrics: Metrics,
}

impl DispatchService {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>, provider: Arc<dyn PushProvider>, config: &DispatchConfig) -> Self {
        Self { store, provider, batch_limit: config.batch_limit, metrics: Metrics::new() }
    }

    /// Sends the notification to every device registered for one user.
    ///
    /// # Errors
    /// Returns `AppError::NoTokensFound` if the user has no registered devices.
    /// Returns `AppError::Database` if the token lookup fails.
    #[tracing::instrument(
        skip(self, request),
        err,
        fields(attempted = tracing::field::Empty, delivered = tracing::field::Empty)
    )]
    pub async fn dispatch_to_user(&self, user_id: &str, request: &NotificationRequest) -> Result<DispatchOutcome> {
        let tokens = self.store.get_tokens(user_id).await?;
        if tokens.is_empty() {
            return Err(AppError::NoTokensFound);
        }

        let targets = tokens.into_iter().map(|record| Target { user_id: user_id.to_string(), token: record.token });
        let outcome = self.fan_out(unique_by_token(targets), request, PruneScope::Owner).await;

        record_span(&outcome);
        Ok(outcome)
    }

    /// Sends the notification to every device of every listed user.
    ///
    /// Duplicate user ids are ignored, and a token shared by several users is
    /// sent to once.
    ///
    /// # Errors
    /// Returns `AppError::NoTokensFound` if none of the users have registered devices.
    /// Returns `AppError::Database` if the token lookup fails.
    #[tracing::instrument(
        skip(self, user_ids, request),
        err,
        fields(users = user_ids.len(), attempted = tracing::field::Empty, delivered = tracing::field::Empty)
    )]
    pub async fn dispatch_to_users(
        &self,
        user_ids: &[String],
        request: &NotificationRequest,
    ) -> Result<DispatchOutcome> {
        let user_ids = unique_users(user_ids);
        if user_ids.is_empty() {
            return Err(AppError::NoTokensFound);
        }

        let sets = self.store.get_tokens_for_many(&user_ids).await?;
        let targets = unique_by_token(flatten(sets));
        if targets.is_empty() {
            return Err(AppError::NoTokensFound);
        }

        let outcome = self.fan_out(targets, request, PruneScope::Everywhere).await;

        record_span(&outcome);
        Ok(outcome)
    }

    /// Runs batches one after another; a batch's sends and prunes all finish
    /// before the next batch starts.
    async fn fan_out(&self, targets: Vec<Target>, request: &NotificationRequest, scope: PruneScope) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        for (index, batch) in batches(targets, self.batch_limit).enumerate() {
            let batch_outcome = self
                .run_batch(batch, request, scope)
                .instrument(tracing::debug_span!("dispatch_batch", batch = index))
                .await;
            outcome.merge(batch_outcome);
        }
        outcome
    }

    async fn run_batch(&self, batch: Vec<Target>, request: &NotificationRequest, scope: PruneScope) -> DispatchOutcome {
        self.metrics.batch_size.record(batch.len() as u64, &[]);

        // Every send resolves to an outcome, so one failure never cancels its siblings.
        let deliveries = futures::future::join_all(batch.iter().map(|target| self.send_one(target, request))).await;

        let mut outcome = DispatchOutcome::default();
        let mut prunes = Vec::new();
        for (target, delivery) in batch.into_iter().zip(deliveries) {
            outcome.record(&delivery);
            if delivery.should_prune() {
                prunes.push(self.spawn_prune(target, scope));
            }
        }

        for result in futures::future::join_all(prunes).await {
            match result {
                Ok(true) => outcome.pruned += 1,
                Ok(false) => {}
                Err(e) => tracing::error!(error = %e, "Prune task panicked"),
            }
        }

        tracing::debug!(
            attempted = outcome.attempted,
            delivered = outcome.delivered,
            failed = outcome.failed,
            pruned = outcome.pruned,
            "Batch complete"
        );
        outcome
    }

    async fn send_one(&self, target: &Target, request: &NotificationRequest) -> DeliveryOutcome {
        let envelope = Envelope::for_token(target.token.as_str(), request);
        let result = self.provider.send_push(&envelope).await;

        match &result {
            Ok(()) => {
                tracing::debug!(user_id = %target.user_id, "Push notification sent successfully");
                self.metrics.sent.add(1, &[]);
            }
            Err(e) if e.is_permanent() => {
                tracing::info!(user_id = %target.user_id, reason = e.reason(), "Token rejected by gateway, pruning");
                self.metrics.invalidated_tokens.add(1, &[]);
                self.metrics.errors.add(1, &[KeyValue::new("reason", e.reason())]);
            }
            Err(e) => {
                tracing::warn!(user_id = %target.user_id, error = %e, "Push notification failed, keeping token");
                self.metrics.errors.add(1, &[KeyValue::new("reason", e.reason())]);
            }
        }

        DeliveryOutcome::from(result)
    }

    /// Removes a dead token on its own task. Failures are logged and never
    /// reach the dispatch result.
    fn spawn_prune(&self, target: Target, scope: PruneScope) -> JoinHandle<bool> {
        let store = Arc::clone(&self.store);
        let span = tracing::debug_span!("prune_token", user_id = %target.user_id, ?scope);
        tokio::spawn(
            async move {
                let res = match scope {
                    PruneScope::Owner => store.remove_token(&target.user_id, &target.token).await,
                    PruneScope::Everywhere => store.remove_token_everywhere(&target.token).await,
                };
                match res {
                    Ok(()) => {
                        tracing::debug!("Pruned invalid token");
                        true
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to prune invalid token");
                        false
                    }
                }
            }
            .instrument(span),
        )
    }
}

fn record_span(outcome: &DispatchOutcome) {
    let span = tracing::Span::current();
    span.record("attempted", outcome.attempted);
    span.record("delivered", outcome.delivered);
}

/// Drops repeated user ids, keeping the first occurrence.
fn unique_users(user_ids: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(user_ids.len());
    user_ids.iter().filter(|id| seen.insert(id.as_str())).cloned().collect()
}

fn flatten(sets: Vec<UserTokenSet>) -> impl Iterator<Item = Target> {
    sets.into_iter().flat_map(|set| {
        let user_id = set.user_id;
        set.tokens.into_iter().map(move |record| Target { user_id: user_id.clone(), token: record.token })
    })
}

/// Keeps the first target for each token so no device is sent to or pruned twice in one call.
fn unique_by_token(targets: impl Iterator<Item = Target>) -> Vec<Target> {
    let mut seen = HashSet::new();
    targets.filter(|target| seen.insert(target.token.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryTokenStore;
    use crate::adapters::push::PushError;
    use crate::domain::device_token::DeviceTokenRecord;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};
    use time::OffsetDateTime;

    const SEND_LATENCY: Duration = Duration::from_millis(1);

    /// Ordered log of gateway sends and store removals shared by both doubles.
    type Journal = Arc<Mutex<Vec<String>>>;

    #[derive(Debug, Clone, Copy)]
    enum Script {
        Deliver,
        Transient,
        Dead,
        Slow(Duration),
    }

    /// Gateway double that answers per token and tracks how many sends overlap.
    #[derive(Debug)]
    struct ScriptedProvider {
        script: HashMap<String, Script>,
        latency: Duration,
        sent: Mutex<Vec<String>>,
        journal: Journal,
        in_flight: AtomicUsize,
        peak_in_flight: AtomicUsize,
    }

    impl Default for ScriptedProvider {
        fn default() -> Self {
            Self {
                script: HashMap::new(),
                latency: SEND_LATENCY,
                sent: Mutex::default(),
                journal: Journal::default(),
                in_flight: AtomicUsize::new(0),
                peak_in_flight: AtomicUsize::new(0),
            }
        }
    }

    impl ScriptedProvider {
        fn with(script: &[(&str, Script)]) -> Self {
            Self {
                script: script.iter().map(|(token, s)| ((*token).to_string(), *s)).collect(),
                ..Self::default()
            }
        }

        fn peak(&self) -> usize {
            self.peak_in_flight.load(Ordering::SeqCst)
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().expect("lock").clone()
        }
    }

    #[async_trait]
    impl PushProvider for ScriptedProvider {
        async fn send_push(&self, envelope: &Envelope) -> std::result::Result<(), PushError> {
            self.journal.lock().expect("lock").push(format!("send:{}", envelope.token));
            let script = self.script.get(&envelope.token).copied().unwrap_or(Script::Deliver);

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
            let latency = if let Script::Slow(delay) = script { delay } else { self.latency };
            tokio::time::sleep(latency).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            self.sent.lock().expect("lock").push(envelope.token.clone());
            match script {
                Script::Deliver | Script::Slow(_) => Ok(()),
                Script::Transient => Err(PushError::QuotaExceeded),
                Script::Dead => Err(PushError::Unregistered),
            }
        }
    }

    /// Store double that records every mutation made by the dispatcher.
    #[derive(Debug, Default)]
    struct SpyStore {
        inner: MemoryTokenStore,
        removed: Mutex<Vec<String>>,
        journal: Journal,
        many_lookups: AtomicUsize,
        fail_reads: bool,
        fail_removals: bool,
    }

    impl SpyStore {
        fn removed(&self) -> Vec<String> {
            self.removed.lock().expect("lock").clone()
        }

        fn record_removal(&self, token: &str) {
            self.removed.lock().expect("lock").push(token.to_string());
            self.journal.lock().expect("lock").push(format!("remove:{token}"));
        }
    }

    #[async_trait]
    impl TokenStore for SpyStore {
        async fn add_token(&self, user_id: &str, token: &str, device: Option<&str>) -> Result<()> {
            self.inner.add_token(user_id, token, device).await
        }

        async fn get_tokens(&self, user_id: &str) -> Result<Vec<DeviceTokenRecord>> {
            if self.fail_reads {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.get_tokens(user_id).await
        }

        async fn get_tokens_for_many(&self, user_ids: &[String]) -> Result<Vec<UserTokenSet>> {
            self.many_lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail_reads {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.get_tokens_for_many(user_ids).await
        }

        async fn remove_token(&self, user_id: &str, token: &str) -> Result<()> {
            self.record_removal(token);
            if self.fail_removals {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.remove_token(user_id, token).await
        }

        async fn remove_token_everywhere(&self, token: &str) -> Result<()> {
            self.record_removal(token);
            if self.fail_removals {
                return Err(AppError::Database(sqlx::Error::PoolTimedOut));
            }
            self.inner.remove_token_everywhere(token).await
        }

        async fn remove_stale_tokens(&self, before: OffsetDateTime) -> Result<u64> {
            self.inner.remove_stale_tokens(before).await
        }

        async fn check_health(&self) -> Result<()> {
            Ok(())
        }
    }

    fn request() -> NotificationRequest {
        NotificationRequest { title: "Hi".into(), body: "There".into(), data: HashMap::new() }
    }

    fn service(store: &Arc<SpyStore>, provider: &Arc<ScriptedProvider>, batch_limit: usize) -> DispatchService {
        let config = DispatchConfig { batch_limit: NonZeroUsize::new(batch_limit).expect("non-zero") };
        DispatchService::new(Arc::clone(store) as Arc<dyn TokenStore>, Arc::clone(provider) as Arc<dyn PushProvider>, &config)
    }

    async fn seed(store: &SpyStore, user_id: &str, tokens: impl IntoIterator<Item = String>) {
        for token in tokens {
            store.add_token(user_id, &token, None).await.expect("seed");
        }
    }

    #[tokio::test]
    async fn test_user_without_tokens_is_not_found_and_sends_nothing() {
        let store = Arc::new(SpyStore::default());
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(&store, &provider, 500);

        let res = service.dispatch_to_user("u1", &request()).await;

        assert!(matches!(res, Err(AppError::NoTokensFound)));
        assert!(provider.sent().is_empty());
    }

    #[tokio::test]
    async fn test_mixed_outcomes_are_counted_exactly() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", ["ok1", "ok2", "flaky", "dead"].map(String::from)).await;
        let provider = Arc::new(ScriptedProvider::with(&[("flaky", Script::Transient), ("dead", Script::Dead)]));
        let service = service(&store, &provider, 500);

        let outcome = service.dispatch_to_user("u1", &request()).await.expect("dispatch");

        assert_eq!(outcome.attempted, 4);
        assert_eq!(outcome.delivered, 2);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.pruned, 1);
        assert_eq!(outcome.delivered + outcome.failed, outcome.attempted);
    }

    #[tokio::test]
    async fn test_transient_failure_never_prunes() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", ["flaky".to_string()]).await;
        seed(&store, "u2", ["flaky2".to_string()]).await;
        let provider =
            Arc::new(ScriptedProvider::with(&[("flaky", Script::Transient), ("flaky2", Script::Transient)]));
        let service = service(&store, &provider, 500);

        service.dispatch_to_user("u1", &request()).await.expect("dispatch");
        service.dispatch_to_users(&["u1".into(), "u2".into()], &request()).await.expect("bulk");

        assert!(store.removed().is_empty());
        assert_eq!(store.get_tokens("u1").await.expect("get").len(), 1);
    }

    #[tokio::test]
    async fn test_dead_token_is_pruned_from_owner() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", ["dead".to_string(), "alive".to_string()]).await;
        let provider = Arc::new(ScriptedProvider::with(&[("dead", Script::Dead)]));
        let service = service(&store, &provider, 500);

        service.dispatch_to_user("u1", &request()).await.expect("dispatch");

        assert_eq!(store.removed(), vec!["dead".to_string()]);
        let remaining = store.get_tokens("u1").await.expect("get");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].token, "alive");
    }

    #[tokio::test]
    async fn test_shared_dead_token_is_sent_and_pruned_once() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", ["shared".to_string()]).await;
        seed(&store, "u2", ["shared".to_string(), "other".to_string()]).await;
        let provider = Arc::new(ScriptedProvider::with(&[("shared", Script::Dead)]));
        // Batch size 1 puts every token in its own batch.
        let service = service(&store, &provider, 1);

        let outcome = service.dispatch_to_users(&["u1".into(), "u2".into()], &request()).await.expect("bulk");

        assert_eq!(outcome.attempted, 2);
        assert_eq!(store.removed(), vec!["shared".to_string()]);
        assert_eq!(provider.sent().iter().filter(|t| *t == "shared").count(), 1);
        assert!(store.get_tokens("u1").await.expect("get").is_empty());
    }

    #[tokio::test]
    async fn test_prune_failure_does_not_change_result() {
        let store = Arc::new(SpyStore { fail_removals: true, ..SpyStore::default() });
        seed(&store, "u1", ["dead".to_string(), "ok".to_string()]).await;
        let provider = Arc::new(ScriptedProvider::with(&[("dead", Script::Dead)]));
        let service = service(&store, &provider, 500);

        let outcome = service.dispatch_to_user("u1", &request()).await.expect("dispatch");

        assert_eq!(outcome.attempted, 2);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.pruned, 0);
        assert_eq!(store.removed().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_aborts_dispatch() {
        let store = Arc::new(SpyStore { fail_reads: true, ..SpyStore::default() });
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(&store, &provider, 500);

        assert!(matches!(service.dispatch_to_user("u1", &request()).await, Err(AppError::Database(_))));
        assert!(matches!(service.dispatch_to_users(&["u1".into()], &request()).await, Err(AppError::Database(_))));
        assert!(provider.sent().is_empty());
    }

    #[tokio::test]
    async fn test_empty_user_list_skips_store() {
        let store = Arc::new(SpyStore::default());
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(&store, &provider, 500);

        let res = service.dispatch_to_users(&[], &request()).await;

        assert!(matches!(res, Err(AppError::NoTokensFound)));
        assert_eq!(store.many_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_users_without_tokens_are_not_found() {
        let store = Arc::new(SpyStore::default());
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(&store, &provider, 500);

        let res = service.dispatch_to_users(&["ghost".into(), "phantom".into()], &request()).await;

        assert!(matches!(res, Err(AppError::NoTokensFound)));
        assert_eq!(store.many_lookups.load(Ordering::SeqCst), 1);
        assert!(provider.sent().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_users_are_sent_once() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", ["a".to_string(), "b".to_string()]).await;
        let provider = Arc::new(ScriptedProvider::default());
        let service = service(&store, &provider, 500);

        let outcome = service.dispatch_to_users(&["u1".into(), "u1".into()], &request()).await.expect("bulk");

        assert_eq!(outcome.attempted, 2);
        let mut sent = provider.sent();
        sent.sort();
        assert_eq!(sent, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_bulk_fanout_across_two_batches() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", ["u1-0".to_string()]).await;
        seed(&store, "u2", (0..2).map(|i| format!("u2-{i}"))).await;
        seed(&store, "u3", (0..500).map(|i| format!("u3-{i}"))).await;
        // Long enough that all 500 sends of the first batch are started before any finishes.
        let provider = Arc::new(ScriptedProvider { latency: Duration::from_millis(100), ..ScriptedProvider::default() });
        let service = service(&store, &provider, 500);

        let outcome =
            service.dispatch_to_users(&["u1".into(), "u2".into(), "u3".into()], &request()).await.expect("bulk");

        assert_eq!(outcome.attempted, 503);
        assert_eq!(outcome.delivered, 503);
        assert_eq!(provider.sent().len(), 503);
        assert_eq!(provider.peak(), 500);
    }

    #[tokio::test]
    async fn test_batches_bound_concurrency() {
        let store = Arc::new(SpyStore::default());
        seed(&store, "u1", (0..5).map(|i| format!("t{i}"))).await;
        seed(&store, "u2", (5..9).map(|i| format!("t{i}"))).await;
        let provider = Arc::new(ScriptedProvider::with(&[("t3", Script::Dead), ("t7", Script::Transient)]));
        let service = service(&store, &provider, 2);

        let outcome = service.dispatch_to_users(&["u1".into(), "u2".into()], &request()).await.expect("bulk");

        assert_eq!(outcome.attempted, 9);
        assert_eq!(outcome.delivered, 7);
        assert_eq!(outcome.failed, 2);
        assert_eq!(outcome.pruned, 1);
        assert_eq!(provider.peak(), 2);
        assert_eq!(store.removed(), vec!["t3".to_string()]);
    }

    #[tokio::test]
    async fn test_slow_send_does_not_hold_up_its_batch() {
        let store = Arc::new(SpyStore::default());
        // Tokens come back sorted, so the slow one is dispatched first.
        seed(&store, "u1", ["a-slow", "b", "c", "d"].map(String::from)).await;
        let slow = Duration::from_millis(300);
        let provider = Arc::new(ScriptedProvider::with(&[("a-slow", Script::Slow(slow))]));
        let service = service(&store, &provider, 4);

        let started = Instant::now();
        let outcome = service.dispatch_to_user("u1", &request()).await.expect("dispatch");
        let elapsed = started.elapsed();

        assert_eq!(outcome.delivered, 4);
        assert_eq!(provider.peak(), 4);
        // The fast siblings finished while the slow send was still outstanding.
        let sent = provider.sent();
        assert_eq!(sent.len(), 4);
        assert_eq!(sent.last().map(String::as_str), Some("a-slow"));
        assert!(elapsed < slow * 2, "batch took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_prunes_finish_before_next_batch_sends() {
        let journal = Journal::default();
        let store = Arc::new(SpyStore { journal: Arc::clone(&journal), ..SpyStore::default() });
        seed(&store, "u1", ["t0", "t1", "t2", "t3"].map(String::from)).await;
        let provider = Arc::new(ScriptedProvider {
            journal: Arc::clone(&journal),
            ..ScriptedProvider::with(&[("t1", Script::Dead)])
        });
        let service = service(&store, &provider, 2);

        let outcome = service.dispatch_to_user("u1", &request()).await.expect("dispatch");
        assert_eq!(outcome.pruned, 1);

        let events = journal.lock().expect("lock").clone();
        let position = |event: &str| events.iter().position(|e| e == event).expect(event);
        assert!(position("remove:t1") < position("send:t2"), "events: {events:?}");
        assert!(position("remove:t1") < position("send:t3"), "events: {events:?}");
        assert!(position("send:t0") < position("remove:t1"), "events: {events:?}");
    }

    #[test]
    fn test_unique_users_keeps_first_occurrence() {
        let ids = ["b", "a", "b", "c", "a"].map(String::from);
        assert_eq!(unique_users(&ids), vec!["b".to_string(), "a".to_string(), "c".to_string()]);
    }
}
