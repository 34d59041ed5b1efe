//! SageMaker control-plane client on top of `aws-sdk-sagemaker`.

use crate::sdk::{required, service_error, Member};
use aws_config::SdkConfig;
use aws_sdk_sagemaker::types::{
    AlgorithmSpecification, BatchStrategy, Channel, CompressionType, ContainerDefinition,
    DataProcessing, DataSource, OutputDataConfig, ProductionVariant as SdkProductionVariant,
    ProductionVariantInstanceType, ResourceConfig, S3DataDistribution, S3DataSource, S3DataType,
    SplitType, StoppingCondition, TrainingInputMode, TrainingInstanceType, TransformDataSource,
    TransformInput, TransformInstanceType, TransformOutput, TransformResources,
    TransformS3DataSource,
};
use mlops_types::{
    ControlPlaneError, EndpointConfigRequest, JobReport, JobStatus, ModelRequest,
    ProductionVariant, SageMakerApi, TrainingJobRequest, TransformJobRequest,
};

/// [`SageMakerApi`] backed by the AWS SDK.
#[derive(Clone, Debug)]
pub struct SageMakerClient {
    client: aws_sdk_sagemaker::Client,
}

impl SageMakerClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sagemaker::Client::new(config),
        }
    }

    pub fn from_client(client: aws_sdk_sagemaker::Client) -> Self {
        Self { client }
    }
}

fn training_channel(req: &TrainingJobRequest) -> Channel {
    let s3 = S3DataSource::builder()
        .s3_data_type(S3DataType::S3Prefix)
        .s3_uri(&req.input.s3_uri)
        .s3_data_distribution_type(S3DataDistribution::FullyReplicated)
        .build();
    Channel::builder()
        .channel_name(&req.input.channel_name)
        .data_source(DataSource::builder().s3_data_source(s3).build())
        .content_type(&req.input.content_type)
        .compression_type(CompressionType::None)
        .build()
}

fn sdk_variant(v: &ProductionVariant) -> SdkProductionVariant {
    SdkProductionVariant::builder()
        .variant_name(&v.variant_name)
        .model_name(&v.model_name)
        .initial_instance_count(v.initial_instance_count)
        .instance_type(ProductionVariantInstanceType::from(v.instance_type.as_str()))
        .build()
}

fn transform_input(req: &TransformJobRequest) -> TransformInput {
    let s3 = TransformS3DataSource::builder()
        .s3_data_type(S3DataType::S3Prefix)
        .s3_uri(&req.input_uri)
        .build();
    let source = TransformDataSource::builder().s3_data_source(s3).build();
    TransformInput::builder()
        .data_source(source)
        .content_type(&req.content_type)
        .split_type(SplitType::from(req.split_type.as_str()))
        .build()
}

#[async_trait::async_trait]
impl SageMakerApi for SageMakerClient {
    async fn create_training_job(
        &self,
        req: &TrainingJobRequest,
    ) -> Result<String, ControlPlaneError> {
        let algorithm = AlgorithmSpecification::builder()
            .training_image(&req.training_image)
            .training_input_mode(TrainingInputMode::File)
            .build();
        let output = OutputDataConfig::builder()
            .s3_output_path(&req.output_path)
            .build();
        let resources = ResourceConfig::builder()
            .instance_type(TrainingInstanceType::from(req.instance_type.as_str()))
            .instance_count(req.instance_count)
            .volume_size_in_gb(req.volume_size_gb)
            .build();
        let mut stopping =
            StoppingCondition::builder().max_runtime_in_seconds(req.max_runtime_secs);
        if req.managed_spot {
            stopping = stopping.max_wait_time_in_seconds(req.max_wait_secs);
        }

        tracing::debug!(job = %req.job_name, "CreateTrainingJob");
        let out = self
            .client
            .create_training_job()
            .training_job_name(&req.job_name)
            .algorithm_specification(algorithm)
            .role_arn(&req.role_arn)
            .input_data_config(training_channel(req))
            .output_data_config(output)
            .resource_config(resources)
            .stopping_condition(stopping.build())
            .enable_managed_spot_training(req.managed_spot)
            .send()
            .await
            .map_err(service_error)?;
        Ok(required(out.training_job_arn(), "TrainingJobArn")?.to_string())
    }

    async fn describe_training_job(&self, job_name: &str) -> Result<JobReport, ControlPlaneError> {
        let out = self
            .client
            .describe_training_job()
            .training_job_name(job_name)
            .send()
            .await
            .map_err(service_error)?;
        let status = required(out.training_job_status(), "TrainingJobStatus")?;
        Ok(JobReport {
            status: JobStatus::parse(status.as_str()),
            artifact_location: out
                .model_artifacts()
                .member()
                .and_then(|a| a.s3_model_artifacts().member())
                .map(str::to_string),
            failure_reason: out.failure_reason().member().map(str::to_string),
        })
    }

    async fn create_model(&self, req: &ModelRequest) -> Result<String, ControlPlaneError> {
        let container = ContainerDefinition::builder()
            .image(&req.image)
            .model_data_url(&req.model_data_url)
            .build();
        tracing::debug!(model = %req.model_name, "CreateModel");
        let out = self
            .client
            .create_model()
            .model_name(&req.model_name)
            .execution_role_arn(&req.execution_role_arn)
            .primary_container(container)
            .send()
            .await
            .map_err(service_error)?;
        Ok(required(out.model_arn(), "ModelArn")?.to_string())
    }

    async fn create_endpoint_config(
        &self,
        req: &EndpointConfigRequest,
    ) -> Result<String, ControlPlaneError> {
        let mut call = self
            .client
            .create_endpoint_config()
            .endpoint_config_name(&req.config_name);
        for v in &req.variants {
            call = call.production_variants(sdk_variant(v));
        }
        tracing::debug!(config = %req.config_name, variants = req.variants.len(), "CreateEndpointConfig");
        let out = call.send().await.map_err(service_error)?;
        Ok(required(out.endpoint_config_arn(), "EndpointConfigArn")?.to_string())
    }

    async fn create_endpoint(
        &self,
        endpoint_name: &str,
        config_name: &str,
    ) -> Result<String, ControlPlaneError> {
        tracing::debug!(endpoint = %endpoint_name, config = %config_name, "CreateEndpoint");
        let out = self
            .client
            .create_endpoint()
            .endpoint_name(endpoint_name)
            .endpoint_config_name(config_name)
            .send()
            .await
            .map_err(service_error)?;
        Ok(required(out.endpoint_arn(), "EndpointArn")?.to_string())
    }

    async fn update_endpoint(
        &self,
        endpoint_name: &str,
        config_name: &str,
    ) -> Result<String, ControlPlaneError> {
        tracing::debug!(endpoint = %endpoint_name, config = %config_name, "UpdateEndpoint");
        let out = self
            .client
            .update_endpoint()
            .endpoint_name(endpoint_name)
            .endpoint_config_name(config_name)
            .send()
            .await
            .map_err(service_error)?;
        Ok(required(out.endpoint_arn(), "EndpointArn")?.to_string())
    }

    async fn create_transform_job(
        &self,
        req: &TransformJobRequest,
    ) -> Result<String, ControlPlaneError> {
        let output = TransformOutput::builder()
            .s3_output_path(&req.output_path)
            .build();
        let resources = TransformResources::builder()
            .instance_type(TransformInstanceType::from(req.instance_type.as_str()))
            .instance_count(req.instance_count)
            .build();

        let mut call = self
            .client
            .create_transform_job()
            .transform_job_name(&req.job_name)
            .model_name(&req.model_name)
            .max_concurrent_transforms(req.max_concurrent_transforms)
            .max_payload_in_mb(req.max_payload_mb)
            .batch_strategy(BatchStrategy::from(req.batch_strategy.as_str()))
            .transform_input(transform_input(req))
            .transform_output(output)
            .transform_resources(resources);
        if let Some(filter) = &req.input_filter {
            call = call.data_processing(DataProcessing::builder().input_filter(filter).build());
        }

        tracing::debug!(job = %req.job_name, model = %req.model_name, "CreateTransformJob");
        let out = call.send().await.map_err(service_error)?;
        Ok(required(out.transform_job_arn(), "TransformJobArn")?.to_string())
    }

    async fn describe_transform_job(
        &self,
        job_name: &str,
    ) -> Result<JobReport, ControlPlaneError> {
        let out = self
            .client
            .describe_transform_job()
            .transform_job_name(job_name)
            .send()
            .await
            .map_err(service_error)?;
        let status = required(out.transform_job_status(), "TransformJobStatus")?;
        Ok(JobReport {
            status: JobStatus::parse(status.as_str()),
            artifact_location: out
                .transform_output()
                .member()
                .and_then(|o| o.s3_output_path().member())
                .map(str::to_string),
            failure_reason: out.failure_reason().member().map(str::to_string),
        })
    }
}
