//! faultbench service library
//!
//! An HTTP service whose endpoints each implement one synthetic failure
//! model:
//! - classified errors (`/api/process`, `/api/database`, `/api/permission`,
//!   `/api/network`)
//! - latency and CPU exhaustion (`/api/slow`, `/api/cpu-spike`)
//! - unbounded memory growth (`/api/memory-leak`)
//! - an unconditional crash (`/api/crash`) caught at the router boundary
//! - log volume (`/api/stress`)
//!
//! Each failure is paired with log lines shaped like real infrastructure
//! errors so that an external diagnosis agent has something to explain.

#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod server;
pub mod state;

pub use api::{build_router, AppState};
pub use config::{FaultProfile, ServiceConfig};
pub use error::{FaultKind, InjectedFault, ServiceError, ServiceResult};
pub use events::{EventLog, EventSink, FaultEvent, RecordingSink, Severity, TracingSink};
pub use server::Server;
pub use state::ProcessState;
