//! Request builders for each lifecycle step.

use crate::config::PipelineConfig;
use mlops_types::{
    EndpointConfigRequest, ModelRequest, ProductionVariant, S3Channel, TrainingJobRequest,
    TransformJobRequest,
};

pub const TRAINING_INSTANCE_TYPE: &str = "ml.c4.xlarge";
pub const TRAINING_VOLUME_GB: i32 = 20;
pub const TRAINING_MAX_RUNTIME_SECS: i32 = 3600;
pub const TRAINING_MAX_WAIT_SECS: i32 = 3600;
pub const ENDPOINT_INSTANCE_TYPE: &str = "ml.t2.medium";
pub const TRANSFORM_INSTANCE_TYPE: &str = "ml.c4.xlarge";
pub const TRANSFORM_MAX_CONCURRENT: i32 = 2;
pub const TRANSFORM_MAX_PAYLOAD_MB: i32 = 50;
/// Drops the first (label) column of every record before it reaches the model.
pub const TRANSFORM_INPUT_FILTER: &str = "$[1:]";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// Spot training job reading the iris CSV from the data lake.
pub fn training_job(config: &PipelineConfig) -> TrainingJobRequest {
    TrainingJobRequest {
        job_name: config.training_job_name(),
        training_image: config.image_uri(),
        role_arn: config.execution_role_arn(),
        input: S3Channel {
            channel_name: "training".to_string(),
            s3_uri: config.training_input_uri(),
            content_type: CSV_CONTENT_TYPE.to_string(),
        },
        output_path: config.training_output_uri(),
        instance_type: TRAINING_INSTANCE_TYPE.to_string(),
        instance_count: 1,
        volume_size_gb: TRAINING_VOLUME_GB,
        max_runtime_secs: TRAINING_MAX_RUNTIME_SECS,
        max_wait_secs: TRAINING_MAX_WAIT_SECS,
        managed_spot: true,
    }
}

/// Model served by the training image, loading `model_data_url`.
pub fn model(config: &PipelineConfig, model_name: &str, model_data_url: &str) -> ModelRequest {
    ModelRequest {
        model_name: model_name.to_string(),
        execution_role_arn: config.execution_role_arn(),
        image: config.image_uri(),
        model_data_url: model_data_url.to_string(),
    }
}

fn variant(config: &PipelineConfig, role: &str, model_name: &str) -> ProductionVariant {
    ProductionVariant {
        variant_name: config.variant_name(role),
        model_name: model_name.to_string(),
        initial_instance_count: 1,
        instance_type: ENDPOINT_INSTANCE_TYPE.to_string(),
    }
}

/// Endpoint config serving a single model (first deployment).
pub fn single_variant_config(config: &PipelineConfig, model_name: &str) -> EndpointConfigRequest {
    EndpointConfigRequest {
        config_name: config.endpoint_config_name(),
        variants: vec![variant(config, "default", model_name)],
    }
}

/// Endpoint config splitting traffic between the live model and a new one.
pub fn two_variant_config(
    config: &PipelineConfig,
    live_model: &str,
    new_model: &str,
) -> EndpointConfigRequest {
    EndpointConfigRequest {
        config_name: config.endpoint_config_name(),
        variants: vec![
            variant(config, "live", live_model),
            variant(config, "new", new_model),
        ],
    }
}

/// Batch transform over every object under `input_uri`.
pub fn transform_job(
    config: &PipelineConfig,
    model_name: &str,
    input_uri: &str,
) -> TransformJobRequest {
    TransformJobRequest {
        job_name: config.transform_job_name(),
        model_name: model_name.to_string(),
        max_concurrent_transforms: TRANSFORM_MAX_CONCURRENT,
        max_payload_mb: TRANSFORM_MAX_PAYLOAD_MB,
        batch_strategy: "MultiRecord".to_string(),
        input_uri: input_uri.to_string(),
        content_type: CSV_CONTENT_TYPE.to_string(),
        split_type: "Line".to_string(),
        output_path: config.transform_output_uri(),
        instance_type: TRANSFORM_INSTANCE_TYPE.to_string(),
        instance_count: 1,
        input_filter: Some(TRANSFORM_INPUT_FILTER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig::new("111122223333", "eu-west-1", "7", "20240102")
    }

    #[test]
    fn training_job_uses_spot_and_csv_channel() {
        let req = training_job(&config());
        assert_eq!(req.job_name, "scikit-bring-your-own-20240102-v7");
        assert_eq!(req.input.channel_name, "training");
        assert_eq!(req.input.content_type, "text/csv");
        assert_eq!(
            req.input.s3_uri,
            "s3://sagemaker-datalake-eu-west-1-111122223333/iris/input/iris.csv"
        );
        assert!(req.managed_spot);
        assert_eq!(req.max_wait_secs, 3600);
        assert_eq!(req.volume_size_gb, 20);
        assert_eq!(req.instance_type, "ml.c4.xlarge");
    }

    #[test]
    fn update_config_has_live_and_new_variants() {
        let req = two_variant_config(&config(), "model-a", "model-b");
        assert_eq!(req.config_name, "scikit-bring-your-own-v7");
        let names: Vec<_> = req
            .variants
            .iter()
            .map(|v| (v.variant_name.as_str(), v.model_name.as_str()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("live-scikit-bring-your-own", "model-a"),
                ("new-scikit-bring-your-own", "model-b"),
            ]
        );
        assert!(req
            .variants
            .iter()
            .all(|v| v.instance_type == "ml.t2.medium" && v.initial_instance_count == 1));
    }

    #[test]
    fn transform_job_filters_label_column() {
        let req = transform_job(&config(), "model-a", "s3://in/prefix/");
        assert_eq!(req.input_filter.as_deref(), Some("$[1:]"));
        assert_eq!(req.batch_strategy, "MultiRecord");
        assert_eq!(req.split_type, "Line");
        assert_eq!(req.max_payload_mb, 50);
        assert_eq!(
            req.output_path,
            "s3://sagemaker-datalake-eu-west-1-111122223333/transform-prediction/output"
        );
    }
}
