// tests/support/mod.rs
// Stub sources shared by the integration tests. Not every test binary uses
// every helper.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Notify;

use quake_alert_monitor::{AlertLevel, FeatureId, FeatureQuery, Geometry, QuakeFeature, RemoteFeatureSource};

pub fn feature(id: &str, mag: f64, title: &str) -> QuakeFeature {
    QuakeFeature {
        id: FeatureId(id.into()),
        magnitude: mag,
        title: title.into(),
        time_ms: 1_700_000_000_000,
        geometry: Geometry {
            longitude: 78.9,
            latitude: 20.5,
            depth_km: 10.0,
        },
    }
}

/// Answers immediately with a canned batch per alert level.
pub struct StubSource {
    batches: Mutex<HashMap<AlertLevel, Vec<QuakeFeature>>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self {
            batches: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_batch(self, level: AlertLevel, features: Vec<QuakeFeature>) -> Self {
        self.batches.lock().unwrap().insert(level, features);
        self
    }
}

#[async_trait]
impl RemoteFeatureSource for StubSource {
    async fn query(&self, query: &FeatureQuery) -> Result<Vec<QuakeFeature>> {
        Ok(self
            .batches
            .lock()
            .unwrap()
            .get(&query.alert_level)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Like `StubSource`, but each query parks until the test releases its
/// level. Lets tests decide completion order independently of request order.
pub struct GatedSource {
    inner: StubSource,
    gates: Mutex<HashMap<AlertLevel, Arc<Notify>>>,
}

impl GatedSource {
    pub fn new(inner: StubSource) -> Self {
        Self {
            inner,
            gates: Mutex::new(HashMap::new()),
        }
    }

    fn gate(&self, level: AlertLevel) -> Arc<Notify> {
        self.gates
            .lock()
            .unwrap()
            .entry(level)
            .or_insert_with(|| Arc::new(Notify::new()))
            .clone()
    }

    /// Allow the (single) pending or future query for `level` to complete.
    pub fn release(&self, level: AlertLevel) {
        self.gate(level).notify_one();
    }
}

#[async_trait]
impl RemoteFeatureSource for GatedSource {
    async fn query(&self, query: &FeatureQuery) -> Result<Vec<QuakeFeature>> {
        let gate = self.gate(query.alert_level);
        gate.notified().await;
        self.inner.query(query).await
    }

    fn name(&self) -> &'static str {
        "gated-stub"
    }
}

/// Counts queries passing through to the wrapped source.
pub struct CountingSource<S> {
    inner: S,
    count: Mutex<usize>,
}

impl<S> CountingSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            count: Mutex::new(0),
        }
    }

    pub fn queries(&self) -> usize {
        *self.count.lock().unwrap()
    }
}

#[async_trait]
impl<S: RemoteFeatureSource> RemoteFeatureSource for CountingSource<S> {
    async fn query(&self, query: &FeatureQuery) -> Result<Vec<QuakeFeature>> {
        *self.count.lock().unwrap() += 1;
        self.inner.query(query).await
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Always fails with a transport-style error.
pub struct FailingSource;

#[async_trait]
impl RemoteFeatureSource for FailingSource {
    async fn query(&self, _query: &FeatureQuery) -> Result<Vec<QuakeFeature>> {
        Err(anyhow!("connection reset by peer"))
    }

    fn name(&self) -> &'static str {
        "failing-stub"
    }
}
