//! `mlops`: SageMaker lifecycle automation for build pipelines.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use mlops_pipeline::{smoke_test_endpoint, watch_job, Pipeline, PipelineConfig, PipelineEnv};
use mlops_sagemaker::{
    load_sdk_config, SageMakerClient, SageMakerRuntimeClient, SdkConfig, StsAccountResolver,
};
use mlops_watch::JobWatcher;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e).context("reading .env");
        }
    }
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let env = PipelineEnv::from_env();
    let sdk = load_sdk_config(env.region.clone()).await;
    let watcher = JobWatcher::new(cli.watch_config());
    let json = cli.json;

    match cli.command {
        Command::Train => {
            let client = SageMakerClient::new(&sdk);
            let pipeline = Pipeline::new(&client, resolve_config(env, &sdk).await?, watcher);
            let out = pipeline
                .train_and_register()
                .await
                .context("training pipeline failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", out.model_data_url);
                println!("{}", out.model_arn);
            }
        }
        Command::Watch { job_name, kind } => {
            let client = SageMakerClient::new(&sdk);
            let location = watch_job(&client, &watcher, kind.into(), &job_name)
                .await
                .with_context(|| format!("waiting for job {}", job_name))?;
            if json {
                println!("{}", json!({ "job_name": job_name, "location": location }));
            } else {
                println!("{}", location);
            }
        }
        Command::DeployEndpoint { model_name } => {
            let client = SageMakerClient::new(&sdk);
            let pipeline = Pipeline::new(&client, resolve_config(env, &sdk).await?, watcher);
            let out = pipeline
                .deploy_endpoint(&model_name)
                .await
                .with_context(|| format!("deploying model {}", model_name))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", out.endpoint_config_arn);
                println!("{}", out.endpoint_arn);
            }
        }
        Command::UpdateEndpoint {
            live_model,
            new_model,
        } => {
            let client = SageMakerClient::new(&sdk);
            let pipeline = Pipeline::new(&client, resolve_config(env, &sdk).await?, watcher);
            let out = pipeline
                .update_endpoint(&live_model, &new_model)
                .await
                .with_context(|| format!("adding model {} next to {}", new_model, live_model))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", out.endpoint_config_arn);
                println!("{}", out.endpoint_arn);
            }
        }
        Command::Transform {
            model_name,
            input_uri,
            wait,
        } => {
            let client = SageMakerClient::new(&sdk);
            let pipeline = Pipeline::new(&client, resolve_config(env, &sdk).await?, watcher);
            let out = pipeline
                .run_transform_job(&model_name, &input_uri, wait)
                .await
                .context("batch transform failed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{}", out.transform_job_arn);
                if let Some(location) = &out.output_location {
                    println!("{}", location);
                }
            }
        }
        Command::TestEndpoint {
            endpoint_name,
            data,
        } => {
            let runtime = SageMakerRuntimeClient::new(&sdk);
            let response = smoke_test_endpoint(&runtime, &endpoint_name, &data)
                .await
                .with_context(|| format!("invoking endpoint {}", endpoint_name))?;
            if json {
                println!("{}", json!({ "endpoint_name": endpoint_name, "response": response }));
            } else {
                println!("{}", response);
            }
        }
    }
    Ok(())
}

async fn resolve_config(env: PipelineEnv, sdk: &SdkConfig) -> anyhow::Result<PipelineConfig> {
    let fallback_region = sdk.region().map(|r| r.to_string());
    let config = env
        .into_config(fallback_region, &StsAccountResolver::new(sdk))
        .await
        .context("loading pipeline configuration")?;
    tracing::debug!(?config, "pipeline configuration");
    Ok(config)
}
