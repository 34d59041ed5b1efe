//! Status sources over the control plane, one per job kind.

use crate::error::PipelineError;
use async_trait::async_trait;
use mlops_types::{ControlPlaneError, JobKind, JobReport, JobStatusSource, SageMakerApi};
use mlops_watch::{Delay, JobWatcher};

/// DescribeTrainingJob as a status source.
pub struct TrainingJobs<'a> {
    api: &'a dyn SageMakerApi,
}

impl<'a> TrainingJobs<'a> {
    pub fn new(api: &'a dyn SageMakerApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<'a> JobStatusSource for TrainingJobs<'a> {
    async fn job_report(&self, job_name: &str) -> Result<JobReport, ControlPlaneError> {
        self.api.describe_training_job(job_name).await
    }
}

/// DescribeTransformJob as a status source.
pub struct TransformJobs<'a> {
    api: &'a dyn SageMakerApi,
}

impl<'a> TransformJobs<'a> {
    pub fn new(api: &'a dyn SageMakerApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<'a> JobStatusSource for TransformJobs<'a> {
    async fn job_report(&self, job_name: &str) -> Result<JobReport, ControlPlaneError> {
        self.api.describe_transform_job(job_name).await
    }
}

/// Wait for an already submitted job and return its artifact location.
pub async fn watch_job<D: Delay>(
    api: &dyn SageMakerApi,
    watcher: &JobWatcher<D>,
    kind: JobKind,
    job_name: &str,
) -> Result<String, PipelineError> {
    let location = match kind {
        JobKind::Training => {
            watcher
                .await_completion(&TrainingJobs::new(api), job_name)
                .await?
        }
        JobKind::Transform => {
            watcher
                .await_completion(&TransformJobs::new(api), job_name)
                .await?
        }
    };
    Ok(location)
}
