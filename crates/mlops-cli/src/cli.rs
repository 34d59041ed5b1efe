//! Command-line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use mlops_types::JobKind;
use mlops_watch::{ExhaustionPolicy, WatchConfig};
use std::path::PathBuf;
use std::time::Duration;

/// SageMaker lifecycle automation: train, register, deploy, transform, smoke test.
///
/// Account, region and build number come from AWS_ACCOUNT_ID, AWS_DEFAULT_REGION
/// and CODEBUILD_BUILD_NUMBER (a .env file in the working directory is honoured).
#[derive(Parser, Debug)]
#[command(name = "mlops", author, version, about)]
pub struct Cli {
    /// Log level used when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Maximum number of job status checks
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..), global = true)]
    pub max_attempts: u32,

    /// Seconds between two job status checks
    #[arg(long, default_value_t = 10, global = true)]
    pub poll_interval: u64,

    /// What to do when a job is still running after the last status check
    #[arg(long, value_enum, default_value_t = OnExhausted::Fail, global = true)]
    pub on_exhausted: OnExhausted,

    /// Print results as JSON instead of one value per line
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run a training job, wait for it, and register the trained model
    Train,

    /// Wait for an existing job and print its output location
    Watch {
        /// Job name
        job_name: String,

        #[arg(long, value_enum, default_value_t = KindArg::Training)]
        kind: KindArg,
    },

    /// Create the endpoint with a single model variant
    DeployEndpoint {
        /// Registered model name
        model_name: String,
    },

    /// Move the endpoint to a config serving the live and the new model
    UpdateEndpoint {
        /// Model currently serving traffic
        live_model: String,
        /// Model to add next to it
        new_model: String,
    },

    /// Start a batch transform job over an S3 prefix
    Transform {
        /// Registered model name
        model_name: String,
        /// Input prefix, e.g. s3://bucket/input-data-prediction/
        input_uri: String,
        /// Wait for the job and print its output location
        #[arg(long)]
        wait: bool,
    },

    /// Send a sample of the iris dataset to a live endpoint
    TestEndpoint {
        /// Endpoint name
        endpoint_name: String,
        /// Headerless iris CSV, label in the first column
        #[arg(long, default_value = "./data/iris.csv")]
        data: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnExhausted {
    /// Exit with a timeout error
    Fail,
    /// Use whatever the last status check reported
    ReturnLast,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Training,
    Transform,
}

impl From<KindArg> for JobKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Training => JobKind::Training,
            KindArg::Transform => JobKind::Transform,
        }
    }
}

impl Cli {
    pub fn watch_config(&self) -> WatchConfig {
        WatchConfig {
            max_attempts: self.max_attempts,
            poll_interval: Duration::from_secs(self.poll_interval),
            on_exhausted: match self.on_exhausted {
                OnExhausted::Fail => ExhaustionPolicy::Fail,
                OnExhausted::ReturnLast => ExhaustionPolicy::ReturnLastReport,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_watcher_defaults() {
        let cli = Cli::try_parse_from(["mlops", "train"]).unwrap();
        assert_eq!(cli.command, Command::Train);
        assert_eq!(cli.watch_config(), WatchConfig::default());
        assert!(!cli.json);
    }

    #[test]
    fn watch_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mlops",
            "watch",
            "batch-7",
            "--kind",
            "transform",
            "--max-attempts",
            "3",
            "--poll-interval",
            "1",
            "--on-exhausted",
            "return-last",
        ])
        .unwrap();
        let config = cli.watch_config();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.on_exhausted, ExhaustionPolicy::ReturnLastReport);
        assert_eq!(
            cli.command,
            Command::Watch {
                job_name: "batch-7".to_string(),
                kind: KindArg::Transform,
            }
        );
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(Cli::try_parse_from(["mlops", "--max-attempts", "0", "train"]).is_err());
    }

    #[test]
    fn update_endpoint_takes_two_models() {
        let cli = Cli::try_parse_from(["mlops", "update-endpoint", "m1", "m2"]).unwrap();
        assert_eq!(
            cli.command,
            Command::UpdateEndpoint {
                live_model: "m1".to_string(),
                new_model: "m2".to_string(),
            }
        );
        assert!(Cli::try_parse_from(["mlops", "update-endpoint", "m1"]).is_err());
    }

    #[test]
    fn test_endpoint_default_dataset() {
        let cli = Cli::try_parse_from(["mlops", "test-endpoint", "ep"]).unwrap();
        match cli.command {
            Command::TestEndpoint { data, .. } => {
                assert_eq!(data, PathBuf::from("./data/iris.csv"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
