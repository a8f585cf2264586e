//! presenter.rs — Turns published query results into a displayable list.
//!
//! The presenter replaces its whole list on every result, in the order the
//! feed returned (the feed pre-sorts by magnitude; nothing is re-sorted
//! here). Focusing an entry is delegated to an injected collaborator; the
//! presenter does not know how focusing is rendered.

use std::sync::{Arc, Mutex};

use crate::feature::{format_event_time, FeatureId, Geometry, QueryResult};
use crate::sync::QuerySynchronizer;

/// The map/popup side of a focus action.
pub trait FocusTarget: Send + Sync {
    fn focus(&self, id: &FeatureId, geometry: &Geometry);
}

/// A focus target that only logs; used by the demo binary and as a stand-in
/// wherever no map is attached.
pub struct LoggingFocusTarget;

impl FocusTarget for LoggingFocusTarget {
    fn focus(&self, id: &FeatureId, geometry: &Geometry) {
        tracing::info!(
            feature = id.as_str(),
            longitude = geometry.longitude,
            latitude = geometry.latitude,
            "focus requested"
        );
    }
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub label: String,
    pub description: String,
    pub feature_id: FeatureId,
    pub geometry: Geometry,
}

pub struct ResultsListPresenter {
    focus_target: Arc<dyn FocusTarget>,
    entries: Mutex<Vec<ListEntry>>,
    heading: Mutex<String>,
}

impl ResultsListPresenter {
    pub fn new(focus_target: Arc<dyn FocusTarget>) -> Arc<Self> {
        Arc::new(Self {
            focus_target,
            entries: Mutex::new(Vec::new()),
            heading: Mutex::new(String::new()),
        })
    }

    /// Replace the displayed list and heading with `result`.
    pub fn on_query_result(&self, result: &QueryResult) {
        let rows = result
            .features
            .iter()
            .map(|f| ListEntry {
                label: f.title.clone(),
                description: format!(
                    "Magnitude: {} - Date: {}",
                    f.magnitude,
                    format_event_time(f.time_ms)
                ),
                feature_id: f.id.clone(),
                geometry: f.geometry,
            })
            .collect::<Vec<_>>();

        *self.entries.lock().expect("entries lock poisoned") = rows;
        *self.heading.lock().expect("heading lock poisoned") = format!(
            "{} {} alert level earthquakes.",
            result.count, result.level
        );
    }

    pub fn entries(&self) -> Vec<ListEntry> {
        self.entries.lock().expect("entries lock poisoned").clone()
    }

    pub fn heading(&self) -> String {
        self.heading.lock().expect("heading lock poisoned").clone()
    }

    /// Invoke the focus collaborator for the entry at `index`. Returns false
    /// when the index no longer exists (list replaced underneath a click).
    pub fn focus_entry(&self, index: usize) -> bool {
        let entries = self.entries.lock().expect("entries lock poisoned");
        match entries.get(index) {
            Some(e) => {
                self.focus_target.focus(&e.feature_id, &e.geometry);
                true
            }
            None => false,
        }
    }

    /// Register on the synchronizer so every published result re-renders.
    pub fn attach_to(self: &Arc<Self>, sync: &QuerySynchronizer) {
        let this = Arc::clone(self);
        sync.subscribe(move |result| this.on_query_result(result));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert::AlertLevel;
    use crate::feature::QuakeFeature;

    struct RecordingFocus(Mutex<Vec<String>>);

    impl FocusTarget for RecordingFocus {
        fn focus(&self, id: &FeatureId, _geometry: &Geometry) {
            self.0.lock().unwrap().push(id.as_str().to_string());
        }
    }

    fn feature(id: &str, mag: f64, title: &str) -> QuakeFeature {
        QuakeFeature {
            id: FeatureId(id.into()),
            magnitude: mag,
            title: title.into(),
            time_ms: 1_700_000_000_000,
            geometry: Geometry {
                longitude: 78.9,
                latitude: 20.5,
                depth_km: 33.0,
            },
        }
    }

    #[test]
    fn renders_entries_in_received_order_with_heading() {
        let presenter = ResultsListPresenter::new(Arc::new(LoggingFocusTarget));
        let result = QueryResult::new(
            AlertLevel::Red,
            vec![
                feature("a", 7.1, "M 7.1 - A"),
                feature("b", 6.5, "M 6.5 - B"),
                feature("c", 4.8, "M 4.8 - C"),
            ],
        );
        presenter.on_query_result(&result);

        let entries = presenter.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "M 7.1 - A");
        assert_eq!(entries[2].label, "M 4.8 - C");
        assert!(entries[0].description.starts_with("Magnitude: 7.1 - Date: "));
        assert_eq!(presenter.heading(), "3 red alert level earthquakes.");
    }

    #[test]
    fn each_result_replaces_the_whole_list() {
        let presenter = ResultsListPresenter::new(Arc::new(LoggingFocusTarget));
        presenter.on_query_result(&QueryResult::new(
            AlertLevel::Red,
            vec![feature("a", 7.1, "M 7.1 - A"), feature("b", 6.5, "M 6.5 - B")],
        ));
        presenter.on_query_result(&QueryResult::new(
            AlertLevel::Orange,
            vec![feature("x", 5.9, "M 5.9 - X")],
        ));

        let entries = presenter.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].feature_id.as_str(), "x");
        assert_eq!(presenter.heading(), "1 orange alert level earthquakes.");
    }

    #[test]
    fn focus_entry_delegates_to_collaborator() {
        let focus = Arc::new(RecordingFocus(Mutex::new(Vec::new())));
        let presenter = ResultsListPresenter::new(focus.clone());
        presenter.on_query_result(&QueryResult::new(
            AlertLevel::Yellow,
            vec![feature("q1", 5.0, "M 5.0 - Q")],
        ));

        assert!(presenter.focus_entry(0));
        assert!(!presenter.focus_entry(5));
        assert_eq!(*focus.0.lock().unwrap(), vec!["q1".to_string()]);
    }
}
