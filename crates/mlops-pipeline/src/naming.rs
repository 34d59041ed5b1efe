//! Resource names and locations derived from [`PipelineConfig`].

use crate::config::PipelineConfig;

impl PipelineConfig {
    /// Data lake bucket, as an `s3://` URI without trailing slash.
    pub fn bucket_uri(&self) -> String {
        format!("s3://sagemaker-datalake-{}-{}", self.region, self.account_id)
    }

    pub fn training_input_uri(&self) -> String {
        format!("{}/iris/input/iris.csv", self.bucket_uri())
    }

    pub fn training_output_uri(&self) -> String {
        format!("{}/iris/output", self.bucket_uri())
    }

    pub fn transform_output_uri(&self) -> String {
        format!("{}/transform-prediction/output", self.bucket_uri())
    }

    /// ECR image used both for training and for serving.
    pub fn image_uri(&self) -> String {
        format!(
            "{}.dkr.ecr.{}.amazonaws.com/{}:{}",
            self.account_id, self.region, self.image_repository, self.image_tag
        )
    }

    pub fn execution_role_arn(&self) -> String {
        format!(
            "arn:aws:iam::{}:role/{}",
            self.account_id, self.execution_role_name
        )
    }

    /// Training job name; the registered model reuses it.
    pub fn training_job_name(&self) -> String {
        format!(
            "{}-{}-v{}",
            self.project_name, self.job_date, self.build_number
        )
    }

    pub fn endpoint_config_name(&self) -> String {
        format!("{}-v{}", self.project_name, self.build_number)
    }

    pub fn transform_job_name(&self) -> String {
        format!("{}-v{}", self.project_name, self.build_number)
    }

    pub fn endpoint_name(&self) -> String {
        self.project_name.clone()
    }

    /// Variant name with a role prefix: `default`, `live` or `new`.
    pub fn variant_name(&self, role: &str) -> String {
        format!("{}-{}", role, self.project_name)
    }
}
