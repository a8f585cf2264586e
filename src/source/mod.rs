// src/source/mod.rs
pub mod config;
pub mod usgs;

use anyhow::Result;

use crate::alert::AlertLevel;
use crate::feature::QuakeFeature;

/// Sort order requested from the remote feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderBy {
    /// Descending magnitude; the list presenter relies on this pre-sort.
    Magnitude,
    Time,
}

impl OrderBy {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderBy::Magnitude => "magnitude",
            OrderBy::Time => "time",
        }
    }
}

/// One remote query, fully parameterized. No upper bound on result count.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureQuery {
    pub alert_level: AlertLevel,
    pub min_magnitude: f64,
    /// ISO date, e.g. "1905-01-01".
    pub start_time: String,
    /// ISO date; `None` means "now" on the provider side.
    pub end_time: Option<String>,
    pub order_by: OrderBy,
    /// Attribute fields the caller needs back.
    pub out_fields: Vec<String>,
    pub return_geometry: bool,
}

impl FeatureQuery {
    /// Fields the synchronizer always requests: magnitude, title, timestamp, id.
    pub fn default_out_fields() -> Vec<String> {
        ["mag", "title", "time", "id"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}

/// The remote earthquake feed the synchronizer queries. Implementations own
/// the wire protocol; the core only sees parsed features.
#[async_trait::async_trait]
pub trait RemoteFeatureSource: Send + Sync {
    async fn query(&self, query: &FeatureQuery) -> Result<Vec<QuakeFeature>>;
    fn name(&self) -> &'static str;
}
