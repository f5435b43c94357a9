//! End-of-session report

use crate::output::print_rule;
use crate::session::Tally;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Totals for a finished traffic session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub requests: u64,
    pub errors: u64,
    /// errors / requests, 0 when nothing was sent
    pub error_rate: f64,
    pub elapsed: Duration,
}

impl SessionReport {
    pub fn new(tally: Tally, elapsed: Duration) -> Self {
        let error_rate = if tally.requests == 0 {
            0.0
        } else {
            tally.errors as f64 / tally.requests as f64
        };

        Self {
            requests: tally.requests,
            errors: tally.errors,
            error_rate,
            elapsed,
        }
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Requests: {}", self.requests)?;
        writeln!(f, "Errors: {}", self.errors)?;
        writeln!(f, "Error Rate: {:.1}%", self.error_rate * 100.0)?;
        write!(f, "Duration: {:.1} minutes", self.elapsed.as_secs_f64() / 60.0)
    }
}

/// Print the report with its banner
pub fn print_report(report: &SessionReport) {
    println!();
    print_rule('=');
    println!("Traffic Generation Complete!");
    print_rule('=');
    println!("{}", report);
    println!();
    println!("Wait 2-3 minutes for logs to be available in the logging backend,");
    println!("then run the diagnosis agent tests.");
    println!();
}
