//! Terminal rendering of investigation results

use crate::contract::InvestigationResult;
use crate::harness::{SuiteOutcome, SuiteSummary};
use colored::*;
use std::fmt::Write;

const WIDTH: usize = 70;

/// Shown errors per result
const MAX_ERRORS_SHOWN: usize = 3;

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDTH)
}

/// Render one result under its label
pub fn render_result(result: &InvestigationResult, label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule('='));
    let _ = writeln!(out, "🔍 {}", label);
    let _ = writeln!(out, "{}", rule('='));

    if !result.success {
        let _ = writeln!(out, "\n{} Investigation Failed", "✗".red());
        let _ = writeln!(
            out,
            "   Error: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        return out;
    }

    let _ = writeln!(out, "\n{} Investigation Successful", "✓".green());
    let _ = writeln!(out, "\nResults:");
    let _ = writeln!(out, "   Service: {}", result.service_name);
    let _ = writeln!(out, "   Root Cause: {}", result.root_cause);
    let _ = writeln!(out, "   Confidence: {:.0}%", result.confidence * 100.0);
    let _ = writeln!(out, "   Duration: {:.2}s", result.duration_seconds);
    let _ = writeln!(out, "   Metrics Analyzed: {}", result.metrics_analyzed);
    let _ = writeln!(out, "   Logs Analyzed: {}", result.logs_analyzed);

    if let Some(window) = &result.time_window {
        let _ = writeln!(out, "\nTime Window:");
        let _ = writeln!(out, "   From: {}", window.start.to_rfc3339());
        let _ = writeln!(out, "   To:   {}", window.end.to_rfc3339());
    }

    let _ = writeln!(out, "\nFull Summary:");
    let _ = writeln!(out, "{}", rule('-'));
    if result.summary.is_empty() {
        let _ = writeln!(out, "No summary available");
    } else {
        let _ = writeln!(out, "{}", result.summary);
    }

    if !result.errors.is_empty() {
        let _ = writeln!(
            out,
            "\n{} Errors encountered: {}",
            "⚠".yellow(),
            result.errors.len()
        );
        for error in result.errors.iter().take(MAX_ERRORS_SHOWN) {
            let _ = writeln!(out, "   • {}", error);
        }
    }

    out
}

/// Render the suite summary and per-test findings
pub fn render_summary(outcomes: &[SuiteOutcome]) -> String {
    let summary = SuiteSummary::from_outcomes(outcomes);
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", rule('='));
    let _ = writeln!(out, "Test Summary");
    let _ = writeln!(out, "{}", rule('='));
    let _ = writeln!(out, "\nTests Run: {}", summary.total);
    let _ = writeln!(out, "Successful: {}", summary.successful);
    let _ = writeln!(out, "Failed: {}", summary.failed);

    let _ = writeln!(out, "\nKey Findings:");
    for (index, outcome) in outcomes.iter().enumerate() {
        if outcome.result.success {
            let _ = writeln!(
                out,
                "  Test {}: {} logs, {} metrics analyzed",
                index + 1,
                outcome.result.logs_analyzed,
                outcome.result.metrics_analyzed
            );
        }
    }

    out
}

pub fn print_result(result: &InvestigationResult, label: &str) {
    print!("{}", render_result(result, label));
}

pub fn print_summary(outcomes: &[SuiteOutcome]) {
    print!("{}", render_summary(outcomes));
}
