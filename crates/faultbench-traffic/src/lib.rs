//! faultbench traffic generator
//!
//! Authenticates once, probes the target service, then drives a
//! weighted-random request mix through a small bounded worker pool for a
//! fixed duration, counting successes and errors as it goes.

#![deny(unsafe_code)]

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod generator;
pub mod output;
pub mod report;
pub mod session;

pub use auth::{AuthProvider, AuthToken, GcloudAuthProvider, StaticTokenProvider};
pub use client::ServiceClient;
pub use endpoints::{EndpointSpec, EndpointTable};
pub use error::{AuthError, TrafficError, TrafficResult};
pub use generator::{GeneratorConfig, TrafficGenerator};
pub use report::{print_report, SessionReport};
pub use session::{SessionCounters, Tally};
