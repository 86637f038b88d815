use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::models::{Employee, PointEntry, Task, TaskStatus};

/// Default database URL, overridable via the `WORKPULSE_DB` environment
/// variable.
const DEFAULT_BASE_URL: &str = "https://hackathon-bf312-default-rtdb.firebaseio.com";

/// Errors surfaced by remote store calls. One attempt per call, no retries;
/// callers report the failure and move on.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("request to remote store failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote store returned {status} for {url}")]
    Status { status: StatusCode, url: String },
    #[error("task '{0}' not found")]
    TaskNotFound(String),
    #[error("task '{0}' is already completed")]
    AlreadyCompleted(String),
}

/// Partial task update, merged into the stored record by a PATCH call.
#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// POST responses carry the key the store assigned to the new record.
#[derive(Deserialize)]
struct CreatedKey {
    name: String,
}

/// Client for the hosted JSON database.
///
/// Three collections live under the base URL: `tasks`, `points` and
/// `employees`. Listings come back as a JSON object keyed by opaque record
/// id (or `null` when the collection is empty); the key becomes the record's
/// `id` where the model carries one. Last write wins at the store.
pub struct RemoteStore {
    client: Client,
    base: String,
}

impl RemoteStore {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        RemoteStore {
            client: Client::new(),
            base,
        }
    }

    /// Builds a store from `WORKPULSE_DB`, falling back to the built-in URL.
    pub fn from_env() -> Self {
        let base = std::env::var("WORKPULSE_DB").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        RemoteStore::new(base)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/{}.json", self.base, collection)
    }

    fn record_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}.json", self.base, collection, id)
    }

    /// Fetches a whole collection as `(key, record)` pairs.
    fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<(String, T)>, StoreError> {
        let url = self.collection_url(collection);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status(),
                url,
            });
        }
        // An empty collection is `null`, not `{}`.
        let body: Option<BTreeMap<String, T>> = response.json()?;
        Ok(body.map(|m| m.into_iter().collect()).unwrap_or_default())
    }

    /// Appends a record to a collection and returns the assigned key.
    fn create<T: Serialize>(&self, collection: &str, record: &T) -> Result<String, StoreError> {
        let url = self.collection_url(collection);
        let response = self.client.post(&url).json(record).send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status(),
                url,
            });
        }
        let created: CreatedKey = response.json()?;
        Ok(created.name)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<Task> = self
            .list::<Task>("tasks")?
            .into_iter()
            .map(|(id, mut task)| {
                task.id = id;
                task
            })
            .collect();
        // Newest first, matching the dashboard ordering.
        tasks.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(tasks)
    }

    pub fn list_points(&self) -> Result<Vec<PointEntry>, StoreError> {
        Ok(self
            .list::<PointEntry>("points")?
            .into_iter()
            .map(|(_, entry)| entry)
            .collect())
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self
            .list::<Employee>("employees")?
            .into_iter()
            .map(|(_, employee)| employee)
            .collect())
    }

    pub fn create_task(&self, task: &Task) -> Result<String, StoreError> {
        self.create("tasks", task)
    }

    pub fn add_points(&self, entry: &PointEntry) -> Result<String, StoreError> {
        self.create("points", entry)
    }

    pub fn add_employee(&self, employee: &Employee) -> Result<String, StoreError> {
        self.create("employees", employee)
    }

    /// Merges the given fields into one task record.
    pub fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<(), StoreError> {
        let url = self.record_url("tasks", id);
        let response = self.client.patch(&url).json(update).send()?;
        if !response.status().is_success() {
            return Err(StoreError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(())
    }
}
