//! Tracing subscriber setup
//!
//! The default text format mirrors the log lines diagnosis agents are tuned
//! for: `<timestamp> - <component> - <LEVEL> - <message>`. Structured fields
//! such as `kind` only appear in the JSON format.

use std::fmt::{self, Write as _};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `timestamp - component - LEVEL - message` event formatter.
///
/// Only the `message` field is written; other fields are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComponentFormat;

impl<S, N> FormatEvent<S, N> for ComponentFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            metadata.target(),
            level_name(metadata.level())
        )?;

        let mut message = MessageField::default();
        event.record(&mut message);
        writeln!(writer, "{}", message.0)
    }
}

#[derive(Default)]
struct MessageField(String);

impl Visit for MessageField {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.0, "{:?}", value);
        }
    }
}

pub fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        Level::TRACE => "TRACE",
    }
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init(level: &str, json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| level.to_string().into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .event_format(ComponentFormat),
            )
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;
    use crate::events::{EventLog, TracingSink, COMPONENT};
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(&Level::WARN), "WARNING");
        assert_eq!(level_name(&Level::ERROR), "ERROR");
        assert_eq!(level_name(&Level::INFO), "INFO");
    }

    #[test]
    fn test_component_format_layout() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .event_format(ComponentFormat)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "faultbench-service", "Memory leak: 3MB allocated");
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        let parts: Vec<&str> = output.trim_end().splitn(4, " - ").collect();
        assert_eq!(parts.len(), 4);
        assert!(chrono::DateTime::parse_from_rfc3339(parts[0]).is_ok());
        assert_eq!(parts[1], "faultbench-service");
        assert_eq!(parts[2], "WARNING");
        assert_eq!(parts[3], "Memory leak: 3MB allocated");
    }

    #[test]
    fn test_classified_events_render_message_only() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .event_format(ComponentFormat)
            .with_writer(move || writer.clone())
            .finish();

        let events = EventLog::new(Arc::new(TracingSink));
        tracing::subscriber::with_default(subscriber, || {
            events.fault_pair(
                FaultKind::Timeout,
                "Request failed with Timeout: Unable to process request",
                "TimeoutError: Request timed out after 30s",
            );
            events.critical("Memory leak over 10MB: 11MB retained");
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(!output.contains('\x1b'));

        let lines: Vec<Vec<&str>> = output
            .lines()
            .map(|line| line.splitn(4, " - ").collect())
            .collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|parts| parts.len() == 4
            && parts[1] == COMPONENT
            && parts[2] == "ERROR"));
        assert_eq!(
            lines[0][3],
            "Request failed with Timeout: Unable to process request"
        );
        assert_eq!(lines[1][3], "TimeoutError: Request timed out after 30s");
        assert_eq!(lines[2][3], "CRITICAL: Memory leak over 10MB: 11MB retained");
    }
}
