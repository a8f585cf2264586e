// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod alert;
pub mod feature;
pub mod presenter;
pub mod scene;
pub mod source;
pub mod sync;

// ---- Re-exports for stable public API ----
pub use crate::alert::{AlertFilterState, AlertLevel, InvalidAlertLevel};
pub use crate::feature::{FeatureId, Geometry, QuakeFeature, QueryResult};
pub use crate::presenter::{FocusTarget, ListEntry, LoggingFocusTarget, ResultsListPresenter};
pub use crate::source::{config::FeedConfig, FeatureQuery, OrderBy, RemoteFeatureSource};
pub use crate::sync::{QueryFailed, QuerySynchronizer};

use std::sync::Arc;

/// Wire the standard pipeline: the presenter subscribes to the synchronizer
/// and the synchronizer watches the filter, so every level change triggers a
/// refresh and every published result re-renders the list. The initial load
/// is the caller's `refresh()` (or `spawn_refresh()`): subscribe first, then
/// fetch.
pub fn wire(
    filter: Arc<AlertFilterState>,
    source: Arc<dyn RemoteFeatureSource>,
    feed: FeedConfig,
    focus: Arc<dyn FocusTarget>,
) -> (Arc<QuerySynchronizer>, Arc<ResultsListPresenter>) {
    let sync = QuerySynchronizer::new(filter, source, feed);
    let presenter = ResultsListPresenter::new(focus);
    presenter.attach_to(&sync);
    sync.watch_filter();
    (sync, presenter)
}
