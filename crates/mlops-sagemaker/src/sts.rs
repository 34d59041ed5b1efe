//! Caller identity lookup, used when the account id is not configured.

use crate::sdk::{required, service_error};
use aws_config::SdkConfig;
use mlops_types::{AccountResolver, ControlPlaneError};

#[derive(Clone, Debug)]
pub struct StsAccountResolver {
    client: aws_sdk_sts::Client,
}

impl StsAccountResolver {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sts::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl AccountResolver for StsAccountResolver {
    async fn caller_account(&self) -> Result<String, ControlPlaneError> {
        let out = self
            .client
            .get_caller_identity()
            .send()
            .await
            .map_err(service_error)?;
        Ok(required(out.account(), "Account")?.to_string())
    }
}
