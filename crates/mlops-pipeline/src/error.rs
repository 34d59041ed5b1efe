use mlops_types::{ControlPlaneError, JobKind};
use mlops_watch::WatchError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("could not resolve account id: {0}")]
    Account(ControlPlaneError),
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    /// The create call itself failed; nothing was watched.
    #[error("unable to create {kind} job {job_name}: {source}")]
    Submission {
        kind: JobKind,
        job_name: String,
        source: ControlPlaneError,
    },
    #[error(transparent)]
    Watch(#[from] WatchError),
    #[error("{operation} failed: {source}")]
    ControlPlane {
        operation: &'static str,
        source: ControlPlaneError,
    },
    #[error("payload: {0}")]
    Payload(String),
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub(crate) fn control_plane(operation: &'static str) -> impl FnOnce(ControlPlaneError) -> Self {
        move |source| PipelineError::ControlPlane { operation, source }
    }
}
