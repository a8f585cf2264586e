//! Quake Alert Monitor — Binary Entrypoint
//! Fetches the current selection from the USGS feed once, prints the results
//! list, and logs focus actions. The map/renderer side consumes the same
//! library through `wire()` plus the `scene` configuration structs.

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use quake_alert_monitor::source::config::load_feed_config_default;
use quake_alert_monitor::source::usgs::UsgsQuakeSource;
use quake_alert_monitor::{wire, AlertFilterState, AlertLevel, LoggingFocusTarget};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quake_alert_monitor=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op elsewhere. Enables QUAKE_FEED_CONFIG.
    let _ = dotenvy::dotenv();
    init_tracing();

    let feed = load_feed_config_default()?;
    let level = std::env::args()
        .nth(1)
        .map(|s| s.parse::<AlertLevel>())
        .transpose()?
        .unwrap_or(AlertLevel::Red);

    let filter = Arc::new(AlertFilterState::new(level));
    let source = Arc::new(UsgsQuakeSource::from_url(feed.url.clone()));
    let (sync, presenter) = wire(filter, source, feed, Arc::new(LoggingFocusTarget));

    // Initial load.
    sync.refresh().await;

    println!("{}", presenter.heading());
    for entry in presenter.entries() {
        println!("  {} | {}", entry.label, entry.description);
    }

    Ok(())
}
