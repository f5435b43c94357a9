//! Application state for API handlers

use crate::config::FaultProfile;
use crate::events::EventLog;
use crate::state::ProcessState;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    /// Request counter and leak buffer
    pub process: Arc<ProcessState>,

    /// Event emission handle
    pub events: EventLog,

    /// Fault model tuning
    pub profile: Arc<FaultProfile>,

    /// Name reported by the root endpoint
    pub service_name: String,

    /// Service start time
    pub started_at: chrono::DateTime<chrono::Utc>,

    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        profile: FaultProfile,
        events: EventLog,
        service_name: impl Into<String>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            process: Arc::new(ProcessState::new()),
            events,
            profile: Arc::new(profile),
            service_name: service_name.into(),
            started_at: chrono::Utc::now(),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Draw from the shared RNG; the lock is held only for `f`
    pub fn sample<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut rng)
    }

    /// Get uptime as a human-readable string
    pub fn uptime(&self) -> String {
        let duration = chrono::Utc::now() - self.started_at;
        let secs = duration.num_seconds();

        if secs < 60 {
            format!("{}s", secs)
        } else if secs < 3600 {
            format!("{}m {}s", secs / 60, secs % 60)
        } else if secs < 86400 {
            format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
        } else {
            format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
        }
    }
}
