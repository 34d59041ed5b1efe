//! Watcher tests: scripted status sequences, no wall-clock waits.

use async_trait::async_trait;
use mlops_types::ControlPlaneError;
use mlops_watch::{
    Delay, ExhaustionPolicy, JobReport, JobStatus, JobStatusSource, JobWatcher, WatchConfig,
    WatchError,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Replays a fixed list of reports; repeats the last one when the list runs out.
struct ScriptedSource {
    script: Mutex<VecDeque<Result<JobReport, String>>>,
    last: Mutex<Option<JobReport>>,
    polls: AtomicU32,
}

impl ScriptedSource {
    fn new(reports: Vec<JobReport>) -> Self {
        Self::with_results(reports.into_iter().map(Ok).collect())
    }

    fn with_results(results: Vec<Result<JobReport, String>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            last: Mutex::new(None),
            polls: AtomicU32::new(0),
        }
    }

    fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JobStatusSource for ScriptedSource {
    async fn job_report(&self, _job_name: &str) -> Result<JobReport, ControlPlaneError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Ok(report)) => {
                *self.last.lock().unwrap() = Some(report.clone());
                Ok(report)
            }
            Some(Err(msg)) => Err(ControlPlaneError::Service(msg)),
            None => Ok(self
                .last
                .lock()
                .unwrap()
                .clone()
                .unwrap_or_else(|| JobReport::new(JobStatus::InProgress))),
        }
    }
}

#[derive(Default)]
struct RecordingDelay {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingDelay {
    fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Delay for RecordingDelay {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

fn watcher(max_attempts: u32, on_exhausted: ExhaustionPolicy) -> JobWatcher<RecordingDelay> {
    JobWatcher::with_delay(
        WatchConfig {
            max_attempts,
            poll_interval: Duration::from_secs(10),
            on_exhausted,
        },
        RecordingDelay::default(),
    )
}

#[tokio::test]
async fn returns_location_from_completed_report() {
    let source = ScriptedSource::new(vec![
        JobReport::new(JobStatus::Pending),
        JobReport::new(JobStatus::InProgress),
        JobReport::new(JobStatus::Completed).with_artifact("s3://bucket/model.tar.gz"),
    ]);
    let w = watcher(3, ExhaustionPolicy::Fail);

    let location = w.await_completion(&source, "job-1").await.unwrap();

    assert_eq!(location, "s3://bucket/model.tar.gz");
    assert_eq!(source.polls(), 3);
    assert_eq!(w.delay().sleeps(), vec![Duration::from_secs(10); 2]);
}

#[tokio::test]
async fn stops_polling_once_completed() {
    let source = ScriptedSource::new(vec![
        JobReport::new(JobStatus::InProgress),
        JobReport::new(JobStatus::Completed).with_artifact("s3://bucket/out"),
        JobReport::new(JobStatus::InProgress),
    ]);
    let w = watcher(60, ExhaustionPolicy::Fail);

    let location = w.await_completion(&source, "job-2").await.unwrap();

    assert_eq!(location, "s3://bucket/out");
    assert_eq!(source.polls(), 2);
    assert_eq!(w.delay().sleeps().len(), 1);
}

#[tokio::test]
async fn failure_halts_without_consuming_budget() {
    let source = ScriptedSource::new(vec![
        JobReport::new(JobStatus::Pending),
        JobReport::new(JobStatus::Failed).with_failure_reason("AlgorithmError: bad csv"),
        JobReport::new(JobStatus::Completed).with_artifact("s3://never"),
    ]);
    let w = watcher(60, ExhaustionPolicy::Fail);

    let err = w.await_completion(&source, "job-3").await.unwrap_err();

    match err {
        WatchError::JobFailure {
            job_name,
            status,
            reason,
        } => {
            assert_eq!(job_name, "job-3");
            assert_eq!(status, JobStatus::Failed);
            assert_eq!(reason.as_deref(), Some("AlgorithmError: bad csv"));
        }
        other => panic!("expected JobFailure, got {other:?}"),
    }
    assert_eq!(source.polls(), 2);
    assert_eq!(w.delay().sleeps().len(), 1);
}

#[tokio::test]
async fn stopping_and_stopped_are_failures() {
    for status in [JobStatus::Stopping, JobStatus::Stopped] {
        let source = ScriptedSource::new(vec![JobReport::new(status.clone())]);
        let w = watcher(5, ExhaustionPolicy::ReturnLastReport);

        let err = w.await_completion(&source, "job-4").await.unwrap_err();

        assert!(
            matches!(err, WatchError::JobFailure { status: ref s, .. } if *s == status),
            "{status}: {err:?}"
        );
        assert_eq!(source.polls(), 1);
        assert!(w.delay().sleeps().is_empty());
    }
}

#[tokio::test]
async fn exhaustion_times_out_by_default() {
    let source = ScriptedSource::new(vec![JobReport::new(JobStatus::InProgress)]);
    let w = watcher(4, ExhaustionPolicy::Fail);

    let err = w.await_completion(&source, "job-5").await.unwrap_err();

    match err {
        WatchError::Timeout {
            attempts,
            last_status,
            ..
        } => {
            assert_eq!(attempts, 4);
            assert_eq!(last_status, JobStatus::InProgress);
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
    assert_eq!(source.polls(), 4);
    assert_eq!(w.delay().sleeps(), vec![Duration::from_secs(10); 3]);
}

#[tokio::test]
async fn exhaustion_can_return_last_report() {
    let source = ScriptedSource::new(vec![
        JobReport::new(JobStatus::InProgress),
        JobReport::new(JobStatus::InProgress).with_artifact("s3://bucket/partial"),
    ]);
    let w = watcher(2, ExhaustionPolicy::ReturnLastReport);

    let location = w.await_completion(&source, "job-6").await.unwrap();

    assert_eq!(location, "s3://bucket/partial");
    assert_eq!(source.polls(), 2);
}

#[tokio::test]
async fn exhaustion_without_location_is_missing_artifact() {
    let source = ScriptedSource::new(vec![JobReport::new(JobStatus::Pending)]);
    let w = watcher(3, ExhaustionPolicy::ReturnLastReport);

    let err = w.await_completion(&source, "job-7").await.unwrap_err();

    assert!(matches!(err, WatchError::MissingArtifact { .. }), "{err:?}");
    assert_eq!(source.polls(), 3);
}

#[tokio::test]
async fn completed_without_location_is_missing_artifact() {
    let source = ScriptedSource::new(vec![JobReport::new(JobStatus::Completed)]);
    let w = watcher(3, ExhaustionPolicy::Fail);

    let err = w.await_completion(&source, "job-8").await.unwrap_err();

    assert!(
        matches!(err, WatchError::MissingArtifact { status: JobStatus::Completed, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn unknown_status_keeps_polling() {
    let source = ScriptedSource::new(vec![
        JobReport::new(JobStatus::parse("Downloading")),
        JobReport::new(JobStatus::Completed).with_artifact("s3://bucket/model.tar.gz"),
    ]);
    let w = watcher(3, ExhaustionPolicy::Fail);

    let location = w.await_completion(&source, "job-9").await.unwrap();

    assert_eq!(location, "s3://bucket/model.tar.gz");
    assert_eq!(source.polls(), 2);
}

#[tokio::test]
async fn query_error_is_propagated_immediately() {
    let source = ScriptedSource::with_results(vec![
        Ok(JobReport::new(JobStatus::InProgress)),
        Err("ThrottlingException".to_string()),
        Ok(JobReport::new(JobStatus::Completed).with_artifact("s3://never")),
    ]);
    let w = watcher(10, ExhaustionPolicy::Fail);

    let err = w.await_completion(&source, "job-10").await.unwrap_err();

    assert!(matches!(err, WatchError::Query(_)), "{err:?}");
    assert_eq!(source.polls(), 2);
}

#[tokio::test]
async fn zero_attempts_is_rejected_before_polling() {
    let source = ScriptedSource::new(vec![JobReport::new(JobStatus::Completed)]);
    let w = watcher(0, ExhaustionPolicy::Fail);

    let err = w.await_completion(&source, "job-11").await.unwrap_err();

    assert!(matches!(err, WatchError::InvalidConfig(_)));
    assert_eq!(source.polls(), 0);
}

#[tokio::test(start_paused = true)]
async fn tokio_delay_waits_the_poll_interval() {
    let source = ScriptedSource::new(vec![
        JobReport::new(JobStatus::InProgress),
        JobReport::new(JobStatus::Completed).with_artifact("s3://bucket/model.tar.gz"),
    ]);
    let w = JobWatcher::new(WatchConfig {
        max_attempts: 2,
        poll_interval: Duration::from_secs(10),
        on_exhausted: ExhaustionPolicy::Fail,
    });
    let start = tokio::time::Instant::now();

    w.await_completion(&source, "job-12").await.unwrap();

    assert!(start.elapsed() >= Duration::from_secs(10));
}

#[test]
fn default_config_matches_pipeline_defaults() {
    let c = WatchConfig::default();
    assert_eq!(c.max_attempts, 60);
    assert_eq!(c.poll_interval, Duration::from_secs(10));
    assert_eq!(c.on_exhausted, ExhaustionPolicy::Fail);
}
