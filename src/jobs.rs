use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Opaque handle to a submitted vendor job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Queued,
    InProgress,
    Completed,
    Failed(String),
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("job failed: {0}")]
    Failed(String),
    #[error("job did not complete within the poll timeout")]
    TimedOut,
    #[error("job cancelled")]
    Cancelled,
    #[error("transport error: {0}")]
    Transport(String),
}

/// Capability seam for long-running vendor jobs (assistant runs, vector
/// store ingestion). Adapters own the vendor specifics; callers only see
/// submit/poll/cancel.
pub trait JobRunner {
    type Job;

    fn submit(
        &self,
        job: Self::Job,
    ) -> impl std::future::Future<Output = Result<JobHandle, JobError>> + Send;

    fn poll(
        &self,
        handle: &JobHandle,
    ) -> impl std::future::Future<Output = Result<JobStatus, JobError>> + Send;

    fn cancel(
        &self,
        handle: &JobHandle,
    ) -> impl std::future::Future<Output = Result<(), JobError>> + Send;
}

/// Exponential backoff schedule for [`await_completion`].
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    pub initial: Duration,
    pub max: Duration,
    pub multiplier: f64,
    pub timeout: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            max: Duration::from_secs(8),
            multiplier: 2.0,
            timeout: Duration::from_secs(300),
        }
    }
}

#[derive(Debug, Default)]
struct CancelInner {
    flag: AtomicBool,
    notify: Notify,
}

/// Cloneable cancellation signal. Cancelling any clone cancels them all.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<CancelInner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.flag.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.flag.load(Ordering::SeqCst)
    }

    /// Resolve once the token is cancelled.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a cancel between the
            // check and the await cannot be missed.
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Poll a job to completion with exponential backoff, a hard timeout, and
/// cooperative cancellation.
///
/// On timeout or cancellation the job is cancelled upstream before the error
/// is returned, so abandoned runs do not keep billing. Backoff is jittered
/// ±20% to keep many concurrent waiters from polling in lockstep.
pub async fn await_completion<R: JobRunner>(
    runner: &R,
    handle: &JobHandle,
    policy: PollPolicy,
    token: &CancelToken,
) -> Result<(), JobError> {
    let deadline = Instant::now() + policy.timeout;
    let mut delay = policy.initial;

    loop {
        if token.is_cancelled() {
            let _ = runner.cancel(handle).await;
            return Err(JobError::Cancelled);
        }

        match runner.poll(handle).await? {
            JobStatus::Completed => return Ok(()),
            JobStatus::Failed(reason) => return Err(JobError::Failed(reason)),
            JobStatus::Cancelled => return Err(JobError::Cancelled),
            JobStatus::Queued | JobStatus::InProgress => {}
        }

        if Instant::now() + delay >= deadline {
            tracing::warn!(job = %handle.id, "poll timeout reached, cancelling job");
            let _ = runner.cancel(handle).await;
            return Err(JobError::TimedOut);
        }

        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        let wait = delay.mul_f64(jitter).min(deadline - Instant::now());
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = token.cancelled() => {
                let _ = runner.cancel(handle).await;
                return Err(JobError::Cancelled);
            }
        }

        delay = delay.mul_f64(policy.multiplier).min(policy.max);
    }
}
