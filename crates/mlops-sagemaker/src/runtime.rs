//! SageMaker Runtime client (InvokeEndpoint).

use crate::sdk::{required, service_error};
use aws_config::SdkConfig;
use aws_sdk_sagemakerruntime::primitives::Blob;
use mlops_types::{ControlPlaneError, EndpointRuntime, InvokeRequest};

#[derive(Clone, Debug)]
pub struct SageMakerRuntimeClient {
    client: aws_sdk_sagemakerruntime::Client,
}

impl SageMakerRuntimeClient {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sagemakerruntime::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl EndpointRuntime for SageMakerRuntimeClient {
    async fn invoke_endpoint(&self, req: &InvokeRequest) -> Result<Vec<u8>, ControlPlaneError> {
        tracing::debug!(endpoint = %req.endpoint_name, bytes = req.body.len(), "InvokeEndpoint");
        let out = self
            .client
            .invoke_endpoint()
            .endpoint_name(&req.endpoint_name)
            .content_type(&req.content_type)
            .accept(&req.accept)
            .body(Blob::new(req.body.clone()))
            .send()
            .await
            .map_err(service_error)?;
        let body = required(out.body(), "Body")?;
        Ok(body.clone().into_inner())
    }
}
