//! Request descriptions for the control-plane calls (SageMaker API shapes).

use serde::{Deserialize, Serialize};

/// One S3 input channel of a training job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct S3Channel {
    pub channel_name: String,
    pub s3_uri: String,
    pub content_type: String,
}

/// CreateTrainingJob request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingJobRequest {
    pub job_name: String,
    pub training_image: String,
    pub role_arn: String,
    pub input: S3Channel,
    pub output_path: String,
    pub instance_type: String,
    pub instance_count: i32,
    pub volume_size_gb: i32,
    pub max_runtime_secs: i32,
    /// Only meaningful with managed spot training.
    pub max_wait_secs: i32,
    pub managed_spot: bool,
}

/// CreateModel request: a single primary container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRequest {
    pub model_name: String,
    pub execution_role_arn: String,
    pub image: String,
    pub model_data_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionVariant {
    pub variant_name: String,
    pub model_name: String,
    pub initial_instance_count: i32,
    pub instance_type: String,
}

/// CreateEndpointConfig request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfigRequest {
    pub config_name: String,
    pub variants: Vec<ProductionVariant>,
}

/// CreateTransformJob request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformJobRequest {
    pub job_name: String,
    pub model_name: String,
    pub max_concurrent_transforms: i32,
    pub max_payload_mb: i32,
    /// `MultiRecord` or `SingleRecord`.
    pub batch_strategy: String,
    pub input_uri: String,
    pub content_type: String,
    /// `Line`, `RecordIO`, `TFRecord` or `None`.
    pub split_type: String,
    pub output_path: String,
    pub instance_type: String,
    pub instance_count: i32,
    /// JSONPath applied to each input record, e.g. `$[1:]` to drop the label column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_filter: Option<String>,
}

/// InvokeEndpoint request (runtime plane).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvokeRequest {
    pub endpoint_name: String,
    pub content_type: String,
    pub accept: String,
    pub body: Vec<u8>,
}

/// ARNs returned when an endpoint is created or switched to a new config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointDeployment {
    pub endpoint_config_arn: String,
    pub endpoint_arn: String,
}
