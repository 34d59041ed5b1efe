//! Core types and traits for mlops-kit.
//!
//! Request descriptions mirror the SageMaker API payloads field for field, so the
//! adapter crate only has to translate them into SDK builders.

mod dto;
mod status;
mod traits;

pub use dto::*;
pub use status::*;
pub use traits::*;
