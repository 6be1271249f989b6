// Remote actor gateway.
//
// The only seam between the platform services and the remote execution
// platform. Services see two calls: run an actor to completion, and read the
// records out of a dataset. ApifyClient is the production implementation;
// MockGateway (testing.rs) scripts both calls for tests.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};

use apify_client::ApifyClient;
use scrapegate_common::Record;

/// Run descriptor returned once an actor run completes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorRun {
    pub id: Option<String>,
    pub default_dataset_id: Option<String>,
}

#[async_trait]
pub trait ActorGateway: Send + Sync {
    /// Run `actor_id` with `input` and wait for it to finish.
    async fn invoke(&self, actor_id: &str, input: &Value) -> Result<ActorRun>;

    /// Fetch every record from a dataset.
    async fn fetch(&self, dataset_id: &str) -> Result<Vec<Record>>;
}

#[async_trait]
impl ActorGateway for ApifyClient {
    async fn invoke(&self, actor_id: &str, input: &Value) -> Result<ActorRun> {
        let run = self.call_actor(actor_id, input).await?;
        Ok(ActorRun {
            id: Some(run.id),
            default_dataset_id: run.default_dataset_id,
        })
    }

    async fn fetch(&self, dataset_id: &str) -> Result<Vec<Record>> {
        let items: Vec<Value> = self.get_dataset_items(dataset_id).await?;
        Ok(items.into_iter().map(into_record).collect())
    }
}

/// Dataset items are usually objects; anything else is wrapped as `{"value": item}`.
pub fn into_record(item: Value) -> Record {
    match item {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_items_pass_through() {
        let record = into_record(json!({"id": "7", "likes": 3}));
        assert_eq!(Value::Object(record), json!({"id": "7", "likes": 3}));
    }

    #[test]
    fn scalar_items_are_wrapped() {
        let record = into_record(json!("just a string"));
        assert_eq!(Value::Object(record), json!({"value": "just a string"}));
    }
}
