//! Lifecycle operations for a SageMaker bring-your-own-container model: train and
//! register, deploy or update the endpoint, batch transform, smoke test.

mod config;
mod error;
mod jobs;
mod naming;
mod ops;
pub mod requests;
mod sample;

pub use config::{PipelineConfig, PipelineEnv};
pub use error::{ConfigError, PipelineError};
pub use jobs::{watch_job, TrainingJobs, TransformJobs};
pub use ops::{smoke_test_endpoint, Pipeline, TrainingOutcome, TransformOutcome};
pub use sample::{sample_indices, sample_payload};
