//! feature.rs — Event records as published to subscribers.
//!
//! A `QuakeFeature` is read-only once built; every refresh supersedes the
//! previous batch wholesale, nothing is mutated in place.

use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};

use crate::alert::AlertLevel;

/// Opaque feed identifier of one event (e.g. `"us7000abcd"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureId(pub String);

impl FeatureId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Epicenter location as reported by the feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    pub longitude: f64,
    pub latitude: f64,
    /// Hypocenter depth in kilometers; 0.0 when the feed omits it.
    pub depth_km: f64,
}

/// One earthquake event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeFeature {
    pub id: FeatureId,
    pub magnitude: f64,
    pub title: String,
    /// Event time, unix milliseconds.
    pub time_ms: i64,
    pub geometry: Geometry,
}

/// The batch a single refresh publishes. Created per refresh, consumed
/// synchronously by subscribers, never cached across refreshes.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// The filter level this batch was computed for.
    pub level: AlertLevel,
    pub features: Vec<QuakeFeature>,
    pub count: usize,
}

impl QueryResult {
    pub fn new(level: AlertLevel, features: Vec<QuakeFeature>) -> Self {
        let count = features.len();
        Self {
            level,
            features,
            count,
        }
    }
}

/// Local-time rendering of an event timestamp for list descriptions.
/// Fixed pattern rather than locale-dependent output, so tests are stable.
pub fn format_event_time(time_ms: i64) -> String {
    match Local.timestamp_millis_opt(time_ms).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "unknown".to_string(),
    }
}
