//! Traits for the control plane, the runtime plane, and job status lookups.

use crate::{
    EndpointConfigRequest, InvokeRequest, JobReport, ModelRequest, TrainingJobRequest,
    TransformJobRequest,
};
use async_trait::async_trait;

/// SageMaker control-plane operations used by the lifecycle pipelines.
///
/// `create_*` and `update_*` calls return the ARN of the affected resource.
#[async_trait]
pub trait SageMakerApi: Send + Sync {
    async fn create_training_job(
        &self,
        req: &TrainingJobRequest,
    ) -> Result<String, ControlPlaneError>;

    async fn describe_training_job(&self, job_name: &str) -> Result<JobReport, ControlPlaneError>;

    async fn create_model(&self, req: &ModelRequest) -> Result<String, ControlPlaneError>;

    async fn create_endpoint_config(
        &self,
        req: &EndpointConfigRequest,
    ) -> Result<String, ControlPlaneError>;

    async fn create_endpoint(
        &self,
        endpoint_name: &str,
        config_name: &str,
    ) -> Result<String, ControlPlaneError>;

    async fn update_endpoint(
        &self,
        endpoint_name: &str,
        config_name: &str,
    ) -> Result<String, ControlPlaneError>;

    async fn create_transform_job(
        &self,
        req: &TransformJobRequest,
    ) -> Result<String, ControlPlaneError>;

    async fn describe_transform_job(&self, job_name: &str)
        -> Result<JobReport, ControlPlaneError>;
}

/// Runtime plane: send a payload to a live endpoint, get the raw response body.
#[async_trait]
pub trait EndpointRuntime: Send + Sync {
    async fn invoke_endpoint(&self, req: &InvokeRequest) -> Result<Vec<u8>, ControlPlaneError>;
}

/// Resolves the account id of the caller's credentials.
#[async_trait]
pub trait AccountResolver: Send + Sync {
    async fn caller_account(&self) -> Result<String, ControlPlaneError>;
}

/// Read-only status lookup for one kind of job; what the completion watcher polls.
///
/// Contract: every call queries the service afresh; implementations must not cache.
#[async_trait]
pub trait JobStatusSource: Send + Sync {
    async fn job_report(&self, job_name: &str) -> Result<JobReport, ControlPlaneError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ControlPlaneError {
    #[error("service error: {0}")]
    Service(String),
    #[error("response missing field: {0}")]
    MissingField(&'static str),
}
