//! alert.rs — Alert levels and the mutable filter state driving refreshes.
//!
//! The PAGER feed tags every event with one of four alert levels. The filter
//! state holds the currently selected level and notifies listeners
//! synchronously, in registration order, whenever the value actually changes.

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// PAGER alert level of an earthquake event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Red,
    Orange,
    Yellow,
    Green,
}

impl AlertLevel {
    /// All levels, in feed severity order.
    pub const ALL: [AlertLevel; 4] = [
        AlertLevel::Red,
        AlertLevel::Orange,
        AlertLevel::Yellow,
        AlertLevel::Green,
    ];

    /// Lowercase feed spelling, as sent in the `alertlevel` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Red => "red",
            AlertLevel::Orange => "orange",
            AlertLevel::Yellow => "yellow",
            AlertLevel::Green => "green",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected alert-level string. State is left unchanged on rejection.
#[derive(Debug, thiserror::Error)]
#[error("unknown alert level: {0:?} (expected red|orange|yellow|green)")]
pub struct InvalidAlertLevel(pub String);

impl FromStr for AlertLevel {
    type Err = InvalidAlertLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(AlertLevel::Red),
            "orange" => Ok(AlertLevel::Orange),
            "yellow" => Ok(AlertLevel::Yellow),
            "green" => Ok(AlertLevel::Green),
            _ => Err(InvalidAlertLevel(s.to_string())),
        }
    }
}

type LevelListener = Box<dyn Fn(AlertLevel) + Send + Sync>;

/// The single piece of mutable state in the component: the selected level.
///
/// Listeners run synchronously inside `set`, in registration order. The
/// listener list lock is held during dispatch, so subscribing from inside a
/// listener is not supported.
pub struct AlertFilterState {
    current: Mutex<AlertLevel>,
    listeners: Mutex<Vec<LevelListener>>,
}

impl AlertFilterState {
    pub fn new(initial: AlertLevel) -> Self {
        Self {
            current: Mutex::new(initial),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn get(&self) -> AlertLevel {
        *self.current.lock().expect("alert level lock poisoned")
    }

    /// Store `level` and notify listeners if it differs from the previous
    /// value. Setting an equal value is a no-op.
    pub fn set(&self, level: AlertLevel) {
        {
            let mut cur = self.current.lock().expect("alert level lock poisoned");
            if *cur == level {
                return;
            }
            *cur = level;
        }
        let listeners = self.listeners.lock().expect("listener lock poisoned");
        for l in listeners.iter() {
            l(level);
        }
    }

    /// Forward a raw UI control value (e.g. a radio group selection).
    pub fn set_str(&self, raw: &str) -> Result<(), InvalidAlertLevel> {
        let level = raw.parse::<AlertLevel>()?;
        self.set(level);
        Ok(())
    }

    pub fn subscribe(&self, listener: impl Fn(AlertLevel) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .expect("listener lock poisoned")
            .push(Box::new(listener));
    }
}
