//! Global fault handler
//!
//! The single place where a fault that escaped its handler becomes an API
//! response. Installed around the whole router as a `CatchPanicLayer`.

use crate::error::{ErrorResponse, FaultKind};
use crate::events::{EventLog, FaultEvent, Severity};
use axum::{
    body::Body,
    http::Response,
    response::IntoResponse,
    Json,
};
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

/// Converts a caught panic into a logged 500 response
#[derive(Clone, Debug)]
pub struct FaultBoundary {
    events: EventLog,
}

impl FaultBoundary {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }

    /// Layer form, ready for `Router::layer`
    pub fn layer(events: EventLog) -> CatchPanicLayer<Self> {
        CatchPanicLayer::custom(Self::new(events))
    }
}

impl ResponseForPanic for FaultBoundary {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Self::ResponseBody> {
        let message = panic_message(err.as_ref());

        self.events.emit(
            FaultEvent::new(Severity::Error, format!("Unhandled exception: {}", message))
                .classified(FaultKind::UnhandledFault),
        );

        let body = ErrorResponse {
            error: "Internal server error".to_string(),
            message: Some(message),
        };

        (FaultKind::UnhandledFault.status(), Json(body)).into_response()
    }
}

/// Extract the text a panic was raised with
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown fault".to_string()
    }
}
