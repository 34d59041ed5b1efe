//! SageMaker control plane, runtime plane and STS clients.

mod client;
#[cfg(feature = "test-util")]
pub mod mock;
mod runtime;
mod sdk;
mod sts;

pub use aws_config::SdkConfig;
pub use client::SageMakerClient;
pub use mlops_types::{AccountResolver, ControlPlaneError, EndpointRuntime, SageMakerApi};
pub use runtime::SageMakerRuntimeClient;
pub use sdk::load_sdk_config;
pub use sts::StsAccountResolver;

#[cfg(feature = "test-util")]
pub use mock::{MockCall, MockSageMaker};
