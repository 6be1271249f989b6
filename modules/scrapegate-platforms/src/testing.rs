// Test mocks for the platform services.
//
// MockGateway (ActorGateway) returns a scripted run descriptor, serves
// registered datasets, and records every invocation so tests can assert on
// the exact actor input a builder produced.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

use scrapegate_common::Record;

use crate::gateway::{into_record, ActorGateway, ActorRun};

/// Scripted gateway. Builder pattern: `.with_run()`, `.on_dataset()`,
/// `.failing()`, `.with_delay()`.
pub struct MockGateway {
    run: ActorRun,
    datasets: HashMap<String, Vec<Record>>,
    failure: Option<String>,
    delay: Option<Duration>,
    invocations: Mutex<Vec<(String, Value)>>,
    fetches: Mutex<Vec<String>>,
}

impl MockGateway {
    /// A gateway whose runs succeed with id `run-1` and no dataset.
    pub fn new() -> Self {
        Self {
            run: ActorRun {
                id: Some("run-1".to_string()),
                default_dataset_id: None,
            },
            datasets: HashMap::new(),
            failure: None,
            delay: None,
            invocations: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_run(mut self, run_id: Option<&str>, dataset_id: Option<&str>) -> Self {
        self.run = ActorRun {
            id: run_id.map(str::to_string),
            default_dataset_id: dataset_id.map(str::to_string),
        };
        self
    }

    pub fn on_dataset(mut self, dataset_id: &str, records: Vec<Record>) -> Self {
        self.datasets.insert(dataset_id.to_string(), records);
        self
    }

    /// Every invocation fails with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Every invocation sleeps (on the tokio clock) before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn invocations(&self) -> Vec<(String, Value)> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.lock().unwrap().len()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    /// Input of the most recent invocation.
    pub fn last_input(&self) -> Option<Value> {
        self.invocations
            .lock()
            .unwrap()
            .last()
            .map(|(_, input)| input.clone())
    }

    /// Actor id of the most recent invocation.
    pub fn last_actor(&self) -> Option<String> {
        self.invocations
            .lock()
            .unwrap()
            .last()
            .map(|(actor, _)| actor.clone())
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ActorGateway for MockGateway {
    async fn invoke(&self, actor_id: &str, input: &Value) -> Result<ActorRun> {
        self.invocations
            .lock()
            .unwrap()
            .push((actor_id.to_string(), input.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.failure {
            bail!("{message}");
        }
        Ok(self.run.clone())
    }

    async fn fetch(&self, dataset_id: &str) -> Result<Vec<Record>> {
        self.fetches.lock().unwrap().push(dataset_id.to_string());
        self.datasets
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("MockGateway: no dataset registered for {dataset_id}"))
    }
}

// ---------------------------------------------------------------------------
// Record helpers
// ---------------------------------------------------------------------------

/// `n` records shaped `{"id": "item-<i>"}`.
pub fn records(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| into_record(json!({ "id": format!("item-{i}") })))
        .collect()
}
