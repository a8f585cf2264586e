//! # Query Synchronizer
//! Keeps the published feature set in step with the alert filter: every
//! refresh snapshots the selected level, queries the remote source, and
//! publishes the result only if the level is still current when the reply
//! arrives. Stale completions are dropped, never merged or queued, so a slow
//! early query can never overwrite a faster later one.

use std::sync::{Arc, Mutex};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use once_cell::sync::OnceCell;
use tokio::task::JoinHandle;

use crate::alert::{AlertFilterState, AlertLevel};
use crate::feature::QueryResult;
use crate::source::{config::FeedConfig, RemoteFeatureSource};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("quake_queries_total", "Refresh queries issued.");
        describe_counter!(
            "quake_stale_dropped_total",
            "Query results dropped because the filter moved on."
        );
        describe_counter!("quake_query_errors_total", "Remote query failures.");
        describe_gauge!(
            "quake_last_result_features",
            "Feature count of the last published result."
        );
    });
}

/// Remote query failure for one refresh. Delivered through the error
/// listeners; the previously published result stays as-is.
#[derive(Debug, thiserror::Error)]
#[error("query for {level} alert level failed: {cause:#}")]
pub struct QueryFailed {
    pub level: AlertLevel,
    pub cause: anyhow::Error,
}

type ResultListener = Box<dyn Fn(&QueryResult) + Send + Sync>;
type ErrorListener = Box<dyn Fn(&QueryFailed) + Send + Sync>;

pub struct QuerySynchronizer {
    filter: Arc<AlertFilterState>,
    source: Arc<dyn RemoteFeatureSource>,
    feed: FeedConfig,
    subscribers: Mutex<Vec<ResultListener>>,
    error_listeners: Mutex<Vec<ErrorListener>>,
}

impl QuerySynchronizer {
    pub fn new(
        filter: Arc<AlertFilterState>,
        source: Arc<dyn RemoteFeatureSource>,
        feed: FeedConfig,
    ) -> Arc<Self> {
        ensure_metrics_described();
        Arc::new(Self {
            filter,
            source,
            feed,
            subscribers: Mutex::new(Vec::new()),
            error_listeners: Mutex::new(Vec::new()),
        })
    }

    /// Register a result subscriber (e.g. the list presenter). Called
    /// synchronously on every publish, in registration order.
    pub fn subscribe(&self, listener: impl Fn(&QueryResult) + Send + Sync + 'static) {
        self.subscribers
            .lock()
            .expect("subscriber lock poisoned")
            .push(Box::new(listener));
    }

    pub fn subscribe_errors(&self, listener: impl Fn(&QueryFailed) + Send + Sync + 'static) {
        self.error_listeners
            .lock()
            .expect("error listener lock poisoned")
            .push(Box::new(listener));
    }

    /// Re-query the source under the current filter and republish.
    ///
    /// Concurrent calls are allowed; completion order is unconstrained and
    /// only a completion whose captured level still equals the live level
    /// publishes. Failures go to the error listeners, never up the stack.
    pub async fn refresh(&self) {
        let level = self.filter.get();
        let query = self.feed.query_for(level);
        counter!("quake_queries_total").increment(1);

        match self.source.query(&query).await {
            Ok(features) => {
                // Level moved on while the request was in flight: a newer
                // refresh owns the display now.
                if self.filter.get() != level {
                    counter!("quake_stale_dropped_total").increment(1);
                    tracing::debug!(%level, "dropping stale query result");
                    return;
                }
                let result = QueryResult::new(level, features);
                gauge!("quake_last_result_features").set(result.count as f64);
                tracing::info!(%level, count = result.count, "publishing query result");
                let subscribers = self.subscribers.lock().expect("subscriber lock poisoned");
                for s in subscribers.iter() {
                    s(&result);
                }
            }
            Err(cause) => {
                counter!("quake_query_errors_total").increment(1);
                tracing::warn!(%level, error = ?cause, provider = self.source.name(), "query failed");
                let failure = QueryFailed { level, cause };
                let listeners = self
                    .error_listeners
                    .lock()
                    .expect("error listener lock poisoned");
                for l in listeners.iter() {
                    l(&failure);
                }
            }
        }
    }

    /// Fire-and-forget refresh on the runtime; used by the filter watcher
    /// and by callers that want to force a reload of the current level.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.refresh().await })
    }

    /// Subscribe to the filter state so every level change triggers a
    /// refresh task. The initial load is still the caller's `refresh()`.
    pub fn watch_filter(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.filter.subscribe(move |_| {
            this.spawn_refresh();
        });
    }
}
