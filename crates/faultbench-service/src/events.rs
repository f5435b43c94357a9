//! Synthetic fault events and the sinks they are emitted to
//!
//! Handlers never call the logging macros directly. They describe what
//! happened through an [`EventLog`], which forwards each [`FaultEvent`] to the
//! configured [`EventSink`]. Production uses [`TracingSink`]; tests swap in a
//! [`RecordingSink`] to assert on exactly what was emitted.

use crate::error::FaultKind;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Component name stamped on every emitted log line
pub const COMPONENT: &str = "faultbench-service";

/// Severity of an emitted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
    Critical,
}

/// A single event emitted by an endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultEvent {
    pub classification: Option<FaultKind>,
    pub severity: Severity,
    pub message: String,
}

impl FaultEvent {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            classification: None,
            severity,
            message: message.into(),
        }
    }

    pub fn classified(mut self, kind: FaultKind) -> Self {
        self.classification = Some(kind);
        self
    }
}

/// Destination for emitted events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: &FaultEvent);
}

/// Sink that writes events to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &FaultEvent) {
        match (event.severity, event.classification) {
            (Severity::Info, _) => tracing::info!(target: COMPONENT, "{}", event.message),
            (Severity::Warning, _) => tracing::warn!(target: COMPONENT, "{}", event.message),
            (Severity::Error, Some(kind)) => {
                tracing::error!(target: COMPONENT, kind = %kind, "{}", event.message)
            }
            (Severity::Error, None) => tracing::error!(target: COMPONENT, "{}", event.message),
            (Severity::Critical, Some(kind)) => tracing::error!(
                target: COMPONENT,
                kind = %kind,
                severity = "critical",
                "CRITICAL: {}",
                event.message
            ),
            (Severity::Critical, None) => tracing::error!(
                target: COMPONENT,
                severity = "critical",
                "CRITICAL: {}",
                event.message
            ),
        }
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FaultEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FaultEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &FaultEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}

/// Handle injected into handlers for emitting events
#[derive(Clone)]
pub struct EventLog {
    sink: Arc<dyn EventSink>,
}

impl EventLog {
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Event log backed by the global tracing subscriber
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn emit(&self, event: FaultEvent) {
        self.sink.emit(&event);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(FaultEvent::new(Severity::Info, message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.emit(FaultEvent::new(Severity::Warning, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(FaultEvent::new(Severity::Error, message));
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.emit(FaultEvent::new(Severity::Critical, message));
    }

    /// Emit a classification line followed by a detail line, both at ERROR
    pub fn fault_pair(
        &self,
        kind: FaultKind,
        classification: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.emit(FaultEvent::new(Severity::Error, classification).classified(kind));
        self.emit(FaultEvent::new(Severity::Error, detail).classified(kind));
    }

    /// Emit a critical line followed by an ERROR detail line
    pub fn critical_pair(
        &self,
        kind: FaultKind,
        headline: impl Into<String>,
        detail: impl Into<String>,
    ) {
        self.emit(FaultEvent::new(Severity::Critical, headline).classified(kind));
        self.emit(FaultEvent::new(Severity::Error, detail).classified(kind));
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_pair_emits_classification_then_detail() {
        let sink = Arc::new(RecordingSink::new());
        let log = EventLog::new(sink.clone());

        log.fault_pair(FaultKind::Timeout, "Request failed", "Timed out after 30s");

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| e.severity == Severity::Error && e.classification == Some(FaultKind::Timeout)));
        assert_eq!(events[0].message, "Request failed");
        assert_eq!(events[1].message, "Timed out after 30s");
    }

    #[test]
    fn test_critical_pair_leads_with_critical() {
        let sink = Arc::new(RecordingSink::new());
        let log = EventLog::new(sink.clone());

        log.critical_pair(FaultKind::UnhandledFault, "crash", "detail");

        let severities: Vec<_> = sink.events().iter().map(|e| e.severity).collect();
        assert_eq!(severities, vec![Severity::Critical, Severity::Error]);
    }

    #[test]
    fn test_plain_events_are_unclassified() {
        let sink = Arc::new(RecordingSink::new());
        let log = EventLog::new(sink.clone());

        log.info("a");
        log.warning("b");

        let events = sink.events();
        assert_eq!(events[0].severity, Severity::Info);
        assert_eq!(events[1].severity, Severity::Warning);
        assert!(events.iter().all(|e| e.classification.is_none()));

        sink.clear();
        assert!(sink.events().is_empty());
    }
}
