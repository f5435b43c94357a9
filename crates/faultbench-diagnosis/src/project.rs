//! Cloud project resolution

use crate::error::{DiagnosisError, DiagnosisResult};
use tokio::process::Command;

/// Resolve the project id: an explicit value wins, otherwise ask `program`
/// (normally `gcloud`) for its configured project.
pub async fn resolve_project_id(explicit: Option<String>, program: &str) -> DiagnosisResult<String> {
    if let Some(id) = explicit.map(|id| id.trim().to_string()).filter(|id| !id.is_empty()) {
        return Ok(id);
    }

    let output = Command::new(program)
        .args(["config", "get-value", "project"])
        .output()
        .await
        .map_err(|e| DiagnosisError::ProjectLookup(format!("failed to run {}: {}", program, e)))?;

    if !output.status.success() {
        return Err(DiagnosisError::ProjectLookup(format!(
            "{} exited with {}: {}",
            program,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if id.is_empty() {
        return Err(DiagnosisError::ProjectLookup(
            "no project configured".to_string(),
        ));
    }

    tracing::debug!(project = %id, "Resolved project via {}", program);
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_project_wins() {
        let id = resolve_project_id(Some(" demo-project \n".to_string()), "faultbench-no-such-binary")
            .await
            .unwrap();
        assert_eq!(id, "demo-project");
    }

    #[tokio::test]
    async fn test_missing_program() {
        let result = resolve_project_id(None, "faultbench-no-such-binary").await;
        assert!(matches!(result, Err(DiagnosisError::ProjectLookup(_))));
    }

    #[tokio::test]
    async fn test_blank_explicit_falls_back() {
        let result = resolve_project_id(Some("  ".to_string()), "faultbench-no-such-binary").await;
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_program_output() {
        // echo prints its arguments, standing in for gcloud
        let id = resolve_project_id(None, "echo").await.unwrap();
        assert_eq!(id, "config get-value project");
    }
}
