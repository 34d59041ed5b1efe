//! Shared AWS SDK plumbing: config loading and response/error helpers.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use mlops_types::ControlPlaneError;
use std::error::Error as StdError;

/// Load credentials and region from the default provider chain (env, profile,
/// container/instance metadata). An explicit `region` wins over the chain.
pub async fn load_sdk_config(region: Option<String>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    loader.load().await
}

/// SDK accessors return `&T` for members the service model marks required and
/// `Option<&T>` for the rest.
pub(crate) trait Member<'a> {
    type Target: ?Sized + 'a;

    fn member(self) -> Option<&'a Self::Target>;
}

impl<'a, T: ?Sized + 'a> Member<'a> for &'a T {
    type Target = T;

    fn member(self) -> Option<&'a T> {
        Some(self)
    }
}

impl<'a, T: ?Sized + 'a> Member<'a> for Option<&'a T> {
    type Target = T;

    fn member(self) -> Option<&'a T> {
        self
    }
}

pub(crate) fn required<'a, M: Member<'a>>(
    value: M,
    field: &'static str,
) -> Result<&'a M::Target, ControlPlaneError> {
    value.member().ok_or(ControlPlaneError::MissingField(field))
}

/// Flatten an `SdkError` (or any error chain) into one line, service code included.
pub(crate) fn service_error<E: StdError>(err: E) -> ControlPlaneError {
    ControlPlaneError::Service(aws_sdk_sagemaker::error::DisplayErrorContext(err).to_string())
}
