//! Pipeline configuration, read once from the environment and passed down explicitly.

use crate::error::ConfigError;
use mlops_types::AccountResolver;

pub const DEFAULT_PROJECT_NAME: &str = "scikit-bring-your-own";
pub const DEFAULT_IMAGE_REPOSITORY: &str = "sagemaker-scikit_bring_your_own";
pub const DEFAULT_IMAGE_TAG: &str = "latest";
pub const DEFAULT_EXECUTION_ROLE: &str = "SageMakerExecutionRole";

/// Settings as found in the environment. The account id may still be missing;
/// [`PipelineEnv::into_config`] resolves it from the caller's credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineEnv {
    pub account_id: Option<String>,
    pub region: Option<String>,
    pub build_number: Option<String>,
    pub project_name: String,
    pub image_repository: String,
    pub image_tag: String,
    pub execution_role_name: String,
    pub job_date: String,
}

impl PipelineEnv {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            account_id: get("AWS_ACCOUNT_ID"),
            region: get("AWS_DEFAULT_REGION").or_else(|| get("AWS_REGION")),
            build_number: get("CODEBUILD_BUILD_NUMBER"),
            project_name: get("MLOPS_PROJECT_NAME")
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
            image_repository: get("MLOPS_IMAGE_REPOSITORY")
                .unwrap_or_else(|| DEFAULT_IMAGE_REPOSITORY.to_string()),
            image_tag: get("MLOPS_IMAGE_TAG").unwrap_or_else(|| DEFAULT_IMAGE_TAG.to_string()),
            execution_role_name: get("MLOPS_EXECUTION_ROLE")
                .unwrap_or_else(|| DEFAULT_EXECUTION_ROLE.to_string()),
            job_date: get("MLOPS_JOB_DATE")
                .unwrap_or_else(|| chrono::Utc::now().format("%Y%m%d").to_string()),
        }
    }

    /// Validate and complete the settings. `fallback_region` is used when no region
    /// variable is set (typically the SDK's resolved region); the account id comes
    /// from `resolver` only when `AWS_ACCOUNT_ID` is unset.
    pub async fn into_config(
        self,
        fallback_region: Option<String>,
        resolver: &dyn AccountResolver,
    ) -> Result<PipelineConfig, ConfigError> {
        let build_number = self
            .build_number
            .ok_or(ConfigError::MissingVar("CODEBUILD_BUILD_NUMBER"))?;
        if !build_number.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Invalid {
                name: "CODEBUILD_BUILD_NUMBER",
                reason: format!("{:?} is not alphanumeric", build_number),
            });
        }
        let region = self
            .region
            .or(fallback_region)
            .ok_or(ConfigError::MissingVar("AWS_DEFAULT_REGION"))?;
        let account_id = match self.account_id {
            Some(id) => id,
            None => {
                tracing::debug!("AWS_ACCOUNT_ID not set, asking STS");
                resolver
                    .caller_account()
                    .await
                    .map_err(ConfigError::Account)?
            }
        };
        Ok(PipelineConfig {
            account_id,
            region,
            build_number,
            project_name: self.project_name,
            image_repository: self.image_repository,
            image_tag: self.image_tag,
            execution_role_name: self.execution_role_name,
            job_date: self.job_date,
        })
    }
}

/// Fully resolved configuration; every resource name derives from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub account_id: String,
    pub region: String,
    pub build_number: String,
    pub project_name: String,
    pub image_repository: String,
    pub image_tag: String,
    pub execution_role_name: String,
    /// `YYYYMMDD` stamp embedded in training job names.
    pub job_date: String,
}

impl PipelineConfig {
    /// Config with the default project settings, for tests and examples.
    pub fn new(
        account_id: impl Into<String>,
        region: impl Into<String>,
        build_number: impl Into<String>,
        job_date: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            region: region.into(),
            build_number: build_number.into(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            image_repository: DEFAULT_IMAGE_REPOSITORY.to_string(),
            image_tag: DEFAULT_IMAGE_TAG.to_string(),
            execution_role_name: DEFAULT_EXECUTION_ROLE.to_string(),
            job_date: job_date.into(),
        }
    }
}
