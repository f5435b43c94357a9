//! Canned end-to-end investigation suite

use crate::contract::{DiagnosisAgent, InvestigationResult};
use serde::Serialize;

/// One scripted question put to the agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CannedQuery {
    /// Section heading, e.g. "Error Investigation"
    pub title: &'static str,
    /// Short name used when printing the result
    pub label: &'static str,
    pub query: String,
}

/// The four standard investigations for `service_name`
pub fn canned_queries(service_name: &str) -> Vec<CannedQuery> {
    vec![
        CannedQuery {
            title: "General Health Investigation",
            label: "General Health Check",
            query: format!("Check the health of {}", service_name),
        },
        CannedQuery {
            title: "Error Investigation",
            label: "Error Investigation",
            query: format!("{} is throwing errors", service_name),
        },
        CannedQuery {
            title: "Performance Investigation",
            label: "Performance Investigation",
            query: format!("Why is {} so slow?", service_name),
        },
        CannedQuery {
            title: "Crash Investigation",
            label: "Crash Investigation",
            query: format!("{} keeps crashing!", service_name),
        },
    ]
}

#[derive(Debug, Clone)]
pub struct SuiteOutcome {
    pub query: CannedQuery,
    pub result: InvestigationResult,
}

/// Tests run / successful / failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl SuiteSummary {
    pub fn from_outcomes(outcomes: &[SuiteOutcome]) -> Self {
        let successful = outcomes.iter().filter(|o| o.result.success).count();
        Self {
            total: outcomes.len(),
            successful,
            failed: outcomes.len() - successful,
        }
    }
}

/// Put every canned query to `agent` in order.
///
/// `on_result` sees each outcome (1-based index) as soon as it arrives.
pub async fn run_suite<F>(
    agent: &dyn DiagnosisAgent,
    service_name: &str,
    mut on_result: F,
) -> Vec<SuiteOutcome>
where
    F: FnMut(usize, &SuiteOutcome),
{
    let mut outcomes = Vec::new();

    for (index, query) in canned_queries(service_name).into_iter().enumerate() {
        tracing::info!(test = index + 1, query = %query.query, "Running investigation");
        let result = agent.handle_query(&query.query, service_name).await;

        let outcome = SuiteOutcome { query, result };
        on_result(index + 1, &outcome);
        outcomes.push(outcome);
    }

    outcomes
}
