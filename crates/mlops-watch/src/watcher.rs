//! Bounded sleep/poll loop over a [`JobStatusSource`].

use crate::delay::{Delay, TokioDelay};
use mlops_types::{ControlPlaneError, JobReport, JobStatus, JobStatusSource};
use std::time::Duration;

/// Default number of status queries before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 60;
/// Default wait between two status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// What to do when the attempt budget runs out while the job is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Fail with [`WatchError::Timeout`].
    #[default]
    Fail,
    /// Return the artifact location of the last report as if the job had
    /// succeeded. Kept for pipelines written against the older behaviour.
    ReturnLastReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Upper bound on status queries; must be at least 1.
    pub max_attempts: u32,
    pub poll_interval: Duration,
    pub on_exhausted: ExhaustionPolicy,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            on_exhausted: ExhaustionPolicy::Fail,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    #[error("job {job_name} ended with status {status}: {}", .reason.as_deref().unwrap_or("no reason given"))]
    JobFailure {
        job_name: String,
        status: JobStatus,
        reason: Option<String>,
    },
    #[error("job {job_name} still {last_status} after {attempts} status checks")]
    Timeout {
        job_name: String,
        attempts: u32,
        last_status: JobStatus,
    },
    #[error("job {job_name} reported {status} without an artifact location")]
    MissingArtifact { job_name: String, status: JobStatus },
    #[error("status query failed: {0}")]
    Query(#[from] ControlPlaneError),
    #[error("invalid watch config: {0}")]
    InvalidConfig(String),
}

/// Polls one job until it completes, fails, or the budget is spent.
pub struct JobWatcher<D = TokioDelay> {
    config: WatchConfig,
    delay: D,
}

impl JobWatcher<TokioDelay> {
    pub fn new(config: WatchConfig) -> Self {
        Self::with_delay(config, TokioDelay)
    }
}

impl<D: Delay> JobWatcher<D> {
    pub fn with_delay(config: WatchConfig, delay: D) -> Self {
        Self { config, delay }
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    /// Wait for `job_name` to reach a terminal state and return its artifact location.
    ///
    /// Queries `source` at most `max_attempts` times, waiting `poll_interval`
    /// between queries (never after the last one). A failure-like status or a
    /// query error ends the loop immediately.
    pub async fn await_completion(
        &self,
        source: &dyn JobStatusSource,
        job_name: &str,
    ) -> Result<String, WatchError> {
        let max_attempts = self.config.max_attempts;
        if max_attempts == 0 {
            return Err(WatchError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            let report = source.job_report(job_name).await?;

            if report.status.is_success() {
                tracing::info!(job = %job_name, attempt, "job completed");
                return artifact_of(job_name, report);
            }
            if report.status.is_failure() {
                tracing::warn!(
                    job = %job_name,
                    status = %report.status,
                    reason = report.failure_reason.as_deref().unwrap_or(""),
                    "job did not complete"
                );
                return Err(WatchError::JobFailure {
                    job_name: job_name.to_string(),
                    status: report.status,
                    reason: report.failure_reason,
                });
            }
            if attempt >= max_attempts {
                return self.exhausted(job_name, attempt, report);
            }

            tracing::info!(
                job = %job_name,
                status = %report.status,
                attempt,
                max_attempts,
                "waiting for job, checking again in {:?}",
                self.config.poll_interval
            );
            self.delay.sleep(self.config.poll_interval).await;
        }
    }

    fn exhausted(
        &self,
        job_name: &str,
        attempts: u32,
        last: JobReport,
    ) -> Result<String, WatchError> {
        match self.config.on_exhausted {
            ExhaustionPolicy::Fail => {
                tracing::warn!(job = %job_name, attempts, status = %last.status, "gave up waiting for job");
                Err(WatchError::Timeout {
                    job_name: job_name.to_string(),
                    attempts,
                    last_status: last.status,
                })
            }
            ExhaustionPolicy::ReturnLastReport => {
                tracing::warn!(
                    job = %job_name,
                    attempts,
                    status = %last.status,
                    "attempts exhausted, using last report as result"
                );
                artifact_of(job_name, last)
            }
        }
    }
}

fn artifact_of(job_name: &str, report: JobReport) -> Result<String, WatchError> {
    report
        .artifact_location
        .ok_or_else(|| WatchError::MissingArtifact {
            job_name: job_name.to_string(),
            status: report.status,
        })
}
