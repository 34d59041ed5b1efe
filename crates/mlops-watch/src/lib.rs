//! Job completion watcher: polls a job's status until it reaches a terminal state
//! or the attempt budget runs out.

mod delay;
mod watcher;

pub use delay::{Delay, TokioDelay};
pub use mlops_types::{JobReport, JobStatus, JobStatusSource};
pub use watcher::{
    ExhaustionPolicy, JobWatcher, WatchConfig, WatchError, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_POLL_INTERVAL,
};
