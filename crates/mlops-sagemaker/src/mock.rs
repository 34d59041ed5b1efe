//! Scripted in-memory SageMaker for tests: records every call, no network.

use mlops_types::{
    AccountResolver, ControlPlaneError, EndpointConfigRequest, EndpointRuntime, InvokeRequest,
    JobReport, JobStatus, ModelRequest, SageMakerApi, TrainingJobRequest, TransformJobRequest,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// One recorded control-plane or runtime call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    CreateTrainingJob(TrainingJobRequest),
    DescribeTrainingJob(String),
    CreateModel(ModelRequest),
    CreateEndpointConfig(EndpointConfigRequest),
    CreateEndpoint { endpoint: String, config: String },
    UpdateEndpoint { endpoint: String, config: String },
    CreateTransformJob(TransformJobRequest),
    DescribeTransformJob(String),
    InvokeEndpoint(InvokeRequest),
    GetCallerIdentity,
}

impl MockCall {
    fn operation(&self) -> &'static str {
        match self {
            MockCall::CreateTrainingJob(_) => "CreateTrainingJob",
            MockCall::DescribeTrainingJob(_) => "DescribeTrainingJob",
            MockCall::CreateModel(_) => "CreateModel",
            MockCall::CreateEndpointConfig(_) => "CreateEndpointConfig",
            MockCall::CreateEndpoint { .. } => "CreateEndpoint",
            MockCall::UpdateEndpoint { .. } => "UpdateEndpoint",
            MockCall::CreateTransformJob(_) => "CreateTransformJob",
            MockCall::DescribeTransformJob(_) => "DescribeTransformJob",
            MockCall::InvokeEndpoint(_) => "InvokeEndpoint",
            MockCall::GetCallerIdentity => "GetCallerIdentity",
        }
    }
}

/// Fake control plane. Describe calls replay a scripted list of reports and keep
/// returning the last one once the script runs out.
pub struct MockSageMaker {
    account: String,
    calls: Mutex<Vec<MockCall>>,
    training_reports: Mutex<VecDeque<JobReport>>,
    transform_reports: Mutex<VecDeque<JobReport>>,
    failing: Mutex<HashSet<&'static str>>,
    invoke_response: Mutex<Vec<u8>>,
}

impl MockSageMaker {
    pub fn new() -> Self {
        Self {
            account: "123456789012".to_string(),
            calls: Mutex::new(Vec::new()),
            training_reports: Mutex::new(VecDeque::new()),
            transform_reports: Mutex::new(VecDeque::new()),
            failing: Mutex::new(HashSet::new()),
            invoke_response: Mutex::new(Vec::new()),
        }
    }

    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = account.into();
        self
    }

    pub fn with_training_reports(self, reports: Vec<JobReport>) -> Self {
        *self.training_reports.lock().unwrap() = reports.into();
        self
    }

    pub fn with_transform_reports(self, reports: Vec<JobReport>) -> Self {
        *self.transform_reports.lock().unwrap() = reports.into();
        self
    }

    pub fn with_invoke_response(self, body: impl Into<Vec<u8>>) -> Self {
        *self.invoke_response.lock().unwrap() = body.into();
        self
    }

    /// Make every call to `operation` (e.g. `"CreateTrainingJob"`) fail.
    pub fn failing(self, operation: &'static str) -> Self {
        self.failing.lock().unwrap().insert(operation);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls to `operation`.
    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.operation() == operation)
            .count()
    }

    fn record(&self, call: MockCall) -> Result<(), ControlPlaneError> {
        let op = call.operation();
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(op) {
            return Err(ControlPlaneError::Service(format!(
                "ValidationException: {} rejected by mock",
                op
            )));
        }
        Ok(())
    }

    fn arn(&self, resource: &str, name: &str) -> String {
        format!("arn:aws:sagemaker:us-east-1:{}:{}/{}", self.account, resource, name)
    }

    fn next_report(script: &Mutex<VecDeque<JobReport>>) -> JobReport {
        let mut guard = script.lock().unwrap();
        if guard.len() > 1 {
            guard.pop_front().unwrap_or_else(|| JobReport::new(JobStatus::InProgress))
        } else {
            guard
                .front()
                .cloned()
                .unwrap_or_else(|| JobReport::new(JobStatus::InProgress))
        }
    }
}

impl Default for MockSageMaker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SageMakerApi for MockSageMaker {
    async fn create_training_job(
        &self,
        req: &TrainingJobRequest,
    ) -> Result<String, ControlPlaneError> {
        self.record(MockCall::CreateTrainingJob(req.clone()))?;
        Ok(self.arn("training-job", &req.job_name))
    }

    async fn describe_training_job(&self, job_name: &str) -> Result<JobReport, ControlPlaneError> {
        self.record(MockCall::DescribeTrainingJob(job_name.to_string()))?;
        Ok(Self::next_report(&self.training_reports))
    }

    async fn create_model(&self, req: &ModelRequest) -> Result<String, ControlPlaneError> {
        self.record(MockCall::CreateModel(req.clone()))?;
        Ok(self.arn("model", &req.model_name))
    }

    async fn create_endpoint_config(
        &self,
        req: &EndpointConfigRequest,
    ) -> Result<String, ControlPlaneError> {
        self.record(MockCall::CreateEndpointConfig(req.clone()))?;
        Ok(self.arn("endpoint-config", &req.config_name))
    }

    async fn create_endpoint(
        &self,
        endpoint_name: &str,
        config_name: &str,
    ) -> Result<String, ControlPlaneError> {
        self.record(MockCall::CreateEndpoint {
            endpoint: endpoint_name.to_string(),
            config: config_name.to_string(),
        })?;
        Ok(self.arn("endpoint", endpoint_name))
    }

    async fn update_endpoint(
        &self,
        endpoint_name: &str,
        config_name: &str,
    ) -> Result<String, ControlPlaneError> {
        self.record(MockCall::UpdateEndpoint {
            endpoint: endpoint_name.to_string(),
            config: config_name.to_string(),
        })?;
        Ok(self.arn("endpoint", endpoint_name))
    }

    async fn create_transform_job(
        &self,
        req: &TransformJobRequest,
    ) -> Result<String, ControlPlaneError> {
        self.record(MockCall::CreateTransformJob(req.clone()))?;
        Ok(self.arn("transform-job", &req.job_name))
    }

    async fn describe_transform_job(
        &self,
        job_name: &str,
    ) -> Result<JobReport, ControlPlaneError> {
        self.record(MockCall::DescribeTransformJob(job_name.to_string()))?;
        Ok(Self::next_report(&self.transform_reports))
    }
}

#[async_trait::async_trait]
impl EndpointRuntime for MockSageMaker {
    async fn invoke_endpoint(&self, req: &InvokeRequest) -> Result<Vec<u8>, ControlPlaneError> {
        self.record(MockCall::InvokeEndpoint(req.clone()))?;
        Ok(self.invoke_response.lock().unwrap().clone())
    }
}

#[async_trait::async_trait]
impl AccountResolver for MockSageMaker {
    async fn caller_account(&self) -> Result<String, ControlPlaneError> {
        self.record(MockCall::GetCallerIdentity)?;
        Ok(self.account.clone())
    }
}
