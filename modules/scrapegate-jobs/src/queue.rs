use std::sync::{Arc, Weak};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use uuid::Uuid;

use scrapegate_common::{Config, ScrapeError};
use scrapegate_platforms::{execute, ActorGateway};

use crate::spec::JobSpec;
use crate::store::{JobState, JobStatus, JobStore};

/// Returned immediately on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub job_id: String,
    pub status: JobState,
    pub message: String,
}

struct QueuedJob {
    id: Uuid,
    spec: JobSpec,
}

/// Handle to the broker. Cheap to clone; workers stop once every handle is dropped.
#[derive(Clone)]
pub struct JobQueue {
    store: Arc<JobStore>,
    sender: mpsc::UnboundedSender<QueuedJob>,
}

impl JobQueue {
    /// Spawn the worker pool and sweeper on the current tokio runtime.
    pub fn start(gateway: Arc<dyn ActorGateway>, config: &Config) -> Self {
        Self::with_settings(
            gateway,
            config.job_workers,
            config.job_time_limit,
            config.job_result_ttl,
        )
    }

    pub fn with_settings(
        gateway: Arc<dyn ActorGateway>,
        workers: usize,
        time_limit: Duration,
        result_ttl: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let receiver = Arc::new(Mutex::new(receiver));
        let store = Arc::new(JobStore::new(result_ttl));

        let workers = workers.max(1);
        for worker in 0..workers {
            tokio::spawn(run_worker(
                worker,
                receiver.clone(),
                gateway.clone(),
                store.clone(),
                time_limit,
            ));
        }
        tokio::spawn(run_sweeper(Arc::downgrade(&store)));

        info!(
            workers,
            time_limit_secs = time_limit.as_secs(),
            result_ttl_secs = result_ttl.as_secs(),
            "Job queue started"
        );
        Self { store, sender }
    }

    /// Validate and enqueue. Invalid jobs are rejected without being recorded.
    pub fn submit(&self, spec: JobSpec) -> Result<JobSubmission, ScrapeError> {
        spec.validate()?;

        let id = Uuid::new_v4();
        let name = spec.name();
        self.store.insert_pending(id);
        if self.sender.send(QueuedJob { id, spec }).is_err() {
            self.store.fail(id, "Job queue is shut down".to_string());
            return Err(anyhow::anyhow!("Job queue is shut down").into());
        }

        info!(job_id = %id, job = name, "Job submitted");
        Ok(JobSubmission {
            job_id: id.to_string(),
            status: JobState::Pending,
            message: format!("Job submitted. Check status at /api/v1/jobs/{id}"),
        })
    }

    pub fn status(&self, job_id: &str) -> JobStatus {
        self.store.status(job_id)
    }
}

async fn run_worker(
    worker: usize,
    receiver: Arc<Mutex<mpsc::UnboundedReceiver<QueuedJob>>>,
    gateway: Arc<dyn ActorGateway>,
    store: Arc<JobStore>,
    time_limit: Duration,
) {
    loop {
        // Hold the receiver only while waiting, so each worker takes one job at a time.
        let next = receiver.lock().await.recv().await;
        let Some(job) = next else {
            debug!(worker, "Job channel closed, worker exiting");
            return;
        };
        run_job(worker, job, gateway.as_ref(), &store, time_limit).await;
    }
}

async fn run_job(
    worker: usize,
    job: QueuedJob,
    gateway: &dyn ActorGateway,
    store: &JobStore,
    time_limit: Duration,
) {
    let QueuedJob { id, spec } = job;
    let name = spec.name();
    store.mark_started(id);
    info!(job_id = %id, job = name, worker, "Job started");

    let request = spec.request();
    match tokio::time::timeout(time_limit, execute(gateway, request.as_ref())).await {
        Ok(Ok(response)) => {
            info!(job_id = %id, job = name, count = response.total_results, "Job succeeded");
            store.complete(id, response);
        }
        Ok(Err(e)) => {
            warn!(job_id = %id, job = name, error = %e, "Job failed");
            store.fail(id, e.to_string());
        }
        Err(_) => {
            // The remote run keeps going; only our wait is abandoned.
            warn!(job_id = %id, job = name, "Job exceeded time limit");
            store.fail(
                id,
                format!("Job exceeded time limit of {}s", time_limit.as_secs()),
            );
        }
    }
}

async fn run_sweeper(store: Weak<JobStore>) {
    let period = match store.upgrade() {
        Some(store) => sweep_period(store.ttl()),
        None => return,
    };
    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let Some(store) = store.upgrade() else {
            return;
        };
        let removed = store.sweep();
        if removed > 0 {
            debug!(removed, "Swept expired job results");
        }
    }
}

fn sweep_period(ttl: Duration) -> Duration {
    (ttl / 2).clamp(Duration::from_secs(1), Duration::from_secs(60))
}
