//! HTTP API: router, shared state, handlers and the panic boundary

pub mod boundary;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
