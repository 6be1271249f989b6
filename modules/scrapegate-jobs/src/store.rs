use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use uuid::Uuid;

use scrapegate_common::ScrapeResponse;

pub const EXPIRED_MESSAGE: &str = "Job result not found or expired";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Pending,
    Started,
    Success,
    Failure,
    /// Unknown id, or a result older than the retention window.
    Expired,
}

impl JobState {
    pub fn is_finished(&self) -> bool {
        matches!(self, JobState::Success | JobState::Failure)
    }
}

/// Wire shape of a status check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    pub job_id: String,
    pub status: JobState,
    pub result: Option<ScrapeResponse>,
    pub error: Option<String>,
}

impl JobStatus {
    fn expired(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            status: JobState::Expired,
            result: None,
            error: Some(EXPIRED_MESSAGE.to_string()),
        }
    }
}

#[derive(Debug)]
struct JobRecord {
    state: JobState,
    result: Option<ScrapeResponse>,
    error: Option<String>,
    finished_at: Option<Instant>,
}

/// In-memory result store. Finished records are retained for `ttl`.
pub struct JobStore {
    ttl: Duration,
    records: Mutex<HashMap<Uuid, JobRecord>>,
}

impl JobStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn insert_pending(&self, id: Uuid) {
        self.lock().insert(
            id,
            JobRecord {
                state: JobState::Pending,
                result: None,
                error: None,
                finished_at: None,
            },
        );
    }

    pub fn mark_started(&self, id: Uuid) {
        if let Some(record) = self.lock().get_mut(&id) {
            record.state = JobState::Started;
        }
    }

    pub fn complete(&self, id: Uuid, result: ScrapeResponse) {
        self.finish(id, JobState::Success, Some(result), None);
    }

    pub fn fail(&self, id: Uuid, error: String) {
        self.finish(id, JobState::Failure, None, Some(error));
    }

    fn finish(&self, id: Uuid, state: JobState, result: Option<ScrapeResponse>, error: Option<String>) {
        self.lock().insert(
            id,
            JobRecord {
                state,
                result,
                error,
                finished_at: Some(Instant::now()),
            },
        );
    }

    /// Current status. Aged results are evicted and reported as expired.
    pub fn status(&self, job_id: &str) -> JobStatus {
        let Ok(id) = Uuid::parse_str(job_id) else {
            return JobStatus::expired(job_id);
        };

        let mut records = self.lock();
        let aged = records
            .get(&id)
            .is_some_and(|record| self.is_aged(record, Instant::now()));
        if aged {
            records.remove(&id);
        }

        match records.get(&id) {
            Some(record) => JobStatus {
                job_id: job_id.to_string(),
                status: record.state,
                result: record.result.clone(),
                error: record.error.clone(),
            },
            None => JobStatus::expired(job_id),
        }
    }

    /// Evict every finished record past the retention window. Returns the count removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut records = self.lock();
        let before = records.len();
        records.retain(|_, record| !self.is_aged(record, now));
        before - records.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_aged(&self, record: &JobRecord, now: Instant) -> bool {
        record
            .finished_at
            .is_some_and(|finished| now.duration_since(finished) >= self.ttl)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, JobRecord>> {
        // A panic while holding the lock leaves the map itself intact.
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
