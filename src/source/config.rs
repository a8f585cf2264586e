// src/source/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::alert::AlertLevel;
use crate::source::{FeatureQuery, OrderBy};

const ENV_PATH: &str = "QUAKE_FEED_CONFIG";

pub const DEFAULT_FEED_URL: &str = "https://earthquake.usgs.gov/fdsnws/event/1/query";

/// Feed parameters shared by every query; the alert level is supplied per
/// refresh by the synchronizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub url: String,
    pub min_magnitude: f64,
    /// ISO date lower bound, e.g. "1905-01-01".
    pub start_time: String,
    /// ISO date upper bound; `None` means the provider uses today.
    #[serde(default)]
    pub end_time: Option<String>,
    pub order_by: OrderBy,
}

impl Default for FeedConfig {
    fn default() -> Self {
        // The original scene's customParameters: all events since 1905,
        // minimum magnitude 1, ordered by magnitude.
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            min_magnitude: 1.0,
            start_time: "1905-01-01".to_string(),
            end_time: None,
            order_by: OrderBy::Magnitude,
        }
    }
}

impl FeedConfig {
    /// The query the synchronizer issues for one refresh: standard out
    /// fields, full geometry, no result cap.
    pub fn query_for(&self, level: AlertLevel) -> FeatureQuery {
        FeatureQuery {
            alert_level: level,
            min_magnitude: self.min_magnitude,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            order_by: self.order_by,
            out_fields: FeatureQuery::default_out_fields(),
            return_geometry: true,
        }
    }
}

/// Load feed config from an explicit path. Supports TOML or JSON.
pub fn load_feed_config_from(path: &Path) -> Result<FeedConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading feed config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_feed_config(&content, ext.as_str())
}

/// Load feed config using env var + fallbacks:
/// 1) $QUAKE_FEED_CONFIG
/// 2) config/feed.toml
/// 3) config/feed.json
/// 4) built-in defaults
pub fn load_feed_config_default() -> Result<FeedConfig> {
    if let Ok(p) = std::env::var(ENV_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_feed_config_from(&pb);
        } else {
            return Err(anyhow!("QUAKE_FEED_CONFIG points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/feed.toml");
    if toml_p.exists() {
        return load_feed_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/feed.json");
    if json_p.exists() {
        return load_feed_config_from(&json_p);
    }
    Ok(FeedConfig::default())
}

fn parse_feed_config(s: &str, hint_ext: &str) -> Result<FeedConfig> {
    let try_toml = hint_ext == "toml" || !s.trim_start().starts_with('{');
    if try_toml {
        if let Ok(v) = toml::from_str::<FeedConfig>(s) {
            return Ok(v);
        }
    }
    if let Ok(v) = serde_json::from_str::<FeedConfig>(s) {
        return Ok(v);
    }
    if !try_toml {
        if let Ok(v) = toml::from_str::<FeedConfig>(s) {
            return Ok(v);
        }
    }
    Err(anyhow!("unsupported feed config format"))
}
