//! Shared session counters

use serde::Serialize;
use std::sync::Mutex;

/// Point-in-time view of the session counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub requests: u64,
    pub errors: u64,
}

/// Request and error counts updated by concurrent workers.
///
/// Both counts live behind one lock so a snapshot never shows an error
/// without its request.
#[derive(Debug, Default)]
pub struct SessionCounters {
    tally: Mutex<Tally>,
}

impl SessionCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed dispatch
    pub fn record(&self, failed: bool) {
        let mut tally = self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        tally.requests += 1;
        if failed {
            tally.errors += 1;
        }
    }

    pub fn snapshot(&self) -> Tally {
        *self.tally.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
