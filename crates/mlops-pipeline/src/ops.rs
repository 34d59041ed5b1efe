//! The lifecycle operations. Each is a short, linear sequence of control-plane calls.

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::jobs::{watch_job, TrainingJobs};
use crate::requests::{self, CSV_CONTENT_TYPE};
use crate::sample::sample_payload;
use mlops_types::{EndpointDeployment, EndpointRuntime, InvokeRequest, JobKind, SageMakerApi};
use mlops_watch::{Delay, JobWatcher, TokioDelay};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrainingOutcome {
    pub job_name: String,
    pub training_job_arn: String,
    pub model_data_url: String,
    pub model_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformOutcome {
    pub job_name: String,
    pub transform_job_arn: String,
    /// Set only when the job was watched to completion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_location: Option<String>,
}

/// Control-plane operations bound to one resolved configuration.
pub struct Pipeline<'a, D = TokioDelay> {
    api: &'a dyn SageMakerApi,
    config: PipelineConfig,
    watcher: JobWatcher<D>,
}

impl<'a, D: Delay> Pipeline<'a, D> {
    pub fn new(api: &'a dyn SageMakerApi, config: PipelineConfig, watcher: JobWatcher<D>) -> Self {
        Self {
            api,
            config,
            watcher,
        }
    }

    /// Submit the training job, wait for it, then register the trained model
    /// under the job's name.
    pub async fn train_and_register(&self) -> Result<TrainingOutcome, PipelineError> {
        let req = requests::training_job(&self.config);
        tracing::info!(job = %req.job_name, image = %req.training_image, "creating training job");
        let training_job_arn =
            self.api
                .create_training_job(&req)
                .await
                .map_err(|source| PipelineError::Submission {
                    kind: JobKind::Training,
                    job_name: req.job_name.clone(),
                    source,
                })?;

        let model_data_url = self
            .watcher
            .await_completion(&TrainingJobs::new(self.api), &req.job_name)
            .await?;
        tracing::info!(job = %req.job_name, model_data_url = %model_data_url, "training finished");

        let model = requests::model(&self.config, &req.job_name, &model_data_url);
        let model_arn = self
            .api
            .create_model(&model)
            .await
            .map_err(PipelineError::control_plane("CreateModel"))?;
        tracing::info!(model = %model.model_name, arn = %model_arn, "model registered");

        Ok(TrainingOutcome {
            job_name: req.job_name,
            training_job_arn,
            model_data_url,
            model_arn,
        })
    }

    /// First deployment: one variant serving `model_name`.
    pub async fn deploy_endpoint(
        &self,
        model_name: &str,
    ) -> Result<EndpointDeployment, PipelineError> {
        let req = requests::single_variant_config(&self.config, model_name);
        let endpoint_config_arn = self
            .api
            .create_endpoint_config(&req)
            .await
            .map_err(PipelineError::control_plane("CreateEndpointConfig"))?;
        let endpoint_arn = self
            .api
            .create_endpoint(&self.config.endpoint_name(), &req.config_name)
            .await
            .map_err(PipelineError::control_plane("CreateEndpoint"))?;
        tracing::info!(endpoint = %self.config.endpoint_name(), config = %req.config_name, "endpoint created");
        Ok(EndpointDeployment {
            endpoint_config_arn,
            endpoint_arn,
        })
    }

    /// Switch the endpoint to a config serving both the live and the new model.
    pub async fn update_endpoint(
        &self,
        live_model: &str,
        new_model: &str,
    ) -> Result<EndpointDeployment, PipelineError> {
        let req = requests::two_variant_config(&self.config, live_model, new_model);
        let endpoint_config_arn = self
            .api
            .create_endpoint_config(&req)
            .await
            .map_err(PipelineError::control_plane("CreateEndpointConfig"))?;
        let endpoint_arn = self
            .api
            .update_endpoint(&self.config.endpoint_name(), &req.config_name)
            .await
            .map_err(PipelineError::control_plane("UpdateEndpoint"))?;
        tracing::info!(endpoint = %self.config.endpoint_name(), config = %req.config_name, "endpoint updated");
        Ok(EndpointDeployment {
            endpoint_config_arn,
            endpoint_arn,
        })
    }

    /// Start a batch transform over `input_uri`; with `wait`, also watch it to
    /// completion and report where the predictions landed.
    pub async fn run_transform_job(
        &self,
        model_name: &str,
        input_uri: &str,
        wait: bool,
    ) -> Result<TransformOutcome, PipelineError> {
        let req = requests::transform_job(&self.config, model_name, input_uri);
        tracing::info!(job = %req.job_name, model = %model_name, input = %input_uri, "creating transform job");
        let transform_job_arn =
            self.api
                .create_transform_job(&req)
                .await
                .map_err(|source| PipelineError::Submission {
                    kind: JobKind::Transform,
                    job_name: req.job_name.clone(),
                    source,
                })?;

        let output_location = if wait {
            Some(watch_job(self.api, &self.watcher, JobKind::Transform, &req.job_name).await?)
        } else {
            None
        };
        Ok(TransformOutcome {
            job_name: req.job_name,
            transform_job_arn,
            output_location,
        })
    }
}

/// Send the sampled iris rows to a live endpoint and return its decoded response.
pub async fn smoke_test_endpoint(
    runtime: &dyn EndpointRuntime,
    endpoint_name: &str,
    dataset: &Path,
) -> Result<String, PipelineError> {
    let raw = tokio::fs::read(dataset).await?;
    let payload = sample_payload(raw.as_slice())?;
    tracing::info!(endpoint = %endpoint_name, dataset = %dataset.display(), "invoking endpoint");
    let req = InvokeRequest {
        endpoint_name: endpoint_name.to_string(),
        content_type: CSV_CONTENT_TYPE.to_string(),
        accept: CSV_CONTENT_TYPE.to_string(),
        body: payload.into_bytes(),
    };
    let body = runtime
        .invoke_endpoint(&req)
        .await
        .map_err(PipelineError::control_plane("InvokeEndpoint"))?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
