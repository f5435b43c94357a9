//! faultbench diagnosis boundary
//!
//! The query/response contract of an external diagnosis agent, an HTTP
//! client for agents that expose it, and the canned end-to-end suite that
//! scores an agent against a service under fault injection.

#![deny(unsafe_code)]

pub mod contract;
pub mod error;
pub mod harness;
pub mod http;
pub mod project;
pub mod render;

pub use contract::{DiagnosisAgent, DiagnosisQuery, InvestigationResult, TimeWindow};
pub use error::{DiagnosisError, DiagnosisResult};
pub use harness::{canned_queries, run_suite, CannedQuery, SuiteOutcome, SuiteSummary};
pub use http::HttpDiagnosisAgent;
pub use project::resolve_project_id;
