//! Job status as reported by the control plane, and the per-poll report.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a remote job (training or batch transform).
///
/// ```text
///   create ──→ Pending ──→ InProgress ──→ Completed
///                              │
///                              ├──→ Failed
///                              └──→ Stopping ──→ Stopped
/// ```
///
/// `Stopping` is already treated as a failure: once a stop is requested the job
/// will not produce an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
    Stopping,
    Stopped,
    /// A status string this crate does not know about. Treated as non-terminal.
    Unknown(String),
}

impl JobStatus {
    /// Parse the service's wire representation (e.g. `"InProgress"`).
    pub fn parse(s: &str) -> Self {
        match s {
            "Pending" => JobStatus::Pending,
            "InProgress" => JobStatus::InProgress,
            "Completed" => JobStatus::Completed,
            "Failed" => JobStatus::Failed,
            "Stopping" => JobStatus::Stopping,
            "Stopped" => JobStatus::Stopped,
            other => JobStatus::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Pending => "Pending",
            JobStatus::InProgress => "InProgress",
            JobStatus::Completed => "Completed",
            JobStatus::Failed => "Failed",
            JobStatus::Stopping => "Stopping",
            JobStatus::Stopped => "Stopped",
            JobStatus::Unknown(s) => s,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            JobStatus::Failed | JobStatus::Stopping | JobStatus::Stopped
        )
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        JobStatus::parse(s)
    }
}

/// Which kind of job a name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Training,
    Transform,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Training => f.write_str("training"),
            JobKind::Transform => f.write_str("transform"),
        }
    }
}

/// Result of one status query. Produced fresh on every poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub status: JobStatus,
    /// Output location reported by the service (model artifacts for training
    /// jobs, output prefix for transform jobs). Usually only set once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
}

impl JobReport {
    pub fn new(status: JobStatus) -> Self {
        Self {
            status,
            artifact_location: None,
            failure_reason: None,
        }
    }

    pub fn with_artifact(mut self, location: impl Into<String>) -> Self {
        self.artifact_location = Some(location.into());
        self
    }

    pub fn with_failure_reason(mut self, reason: impl Into<String>) -> Self {
        self.failure_reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_sets() {
        assert!(!JobStatus::Pending.is_terminal());
        assert!(!JobStatus::InProgress.is_terminal());
        assert!(JobStatus::Completed.is_success());
        assert!(JobStatus::Failed.is_failure());
        assert!(JobStatus::Stopping.is_failure());
        assert!(JobStatus::Stopped.is_failure());
        assert!(!JobStatus::Unknown("Starting".into()).is_terminal());
    }

    #[test]
    fn parses_wire_strings() {
        assert_eq!(JobStatus::parse("InProgress"), JobStatus::InProgress);
        assert_eq!(JobStatus::parse("Stopping"), JobStatus::Stopping);
        assert_eq!(
            JobStatus::parse("Downloading"),
            JobStatus::Unknown("Downloading".to_string())
        );
        assert_eq!(JobStatus::Unknown("Downloading".into()).to_string(), "Downloading");
        assert_eq!(JobStatus::Completed.to_string(), "Completed");
    }
}
