//! In-memory record store for testing, development and mock backends

use crate::core::error::{ListError, ListResult, SourceError};
use crate::core::events::{EventBus, RecordEvent};
use crate::core::pipeline::Pipeline;
use crate::core::query::{Page, QueryState};
use crate::core::record::{Record, RecordId};
use crate::core::source::{RecordSource, RecordStore};
use async_trait::async_trait;
use chrono::Utc;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Artificial delays applied before each kind of operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Latency {
    pub list: Duration,
    pub get: Duration,
    pub write: Duration,
}

impl Latency {
    /// Same delay for every operation
    pub fn uniform(delay: Duration) -> Self {
        Self {
            list: delay,
            get: delay,
            write: delay,
        }
    }

    /// Delays of a typical mock backend: 800 ms lists, 500 ms lookups,
    /// 1 s writes
    pub fn mock_backend() -> Self {
        Self {
            list: Duration::from_millis(800),
            get: Duration::from_millis(500),
            write: Duration::from_millis(1000),
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// In-memory record store
///
/// Records keep insertion order. The pipeline runs locally on every fetch.
/// Uses RwLock for thread-safe access; clones share the same records.
#[derive(Clone)]
pub struct InMemoryRecordStore<R: Record> {
    records: Arc<RwLock<IndexMap<RecordId, R>>>,
    pipeline: Pipeline,
    latency: Latency,
    events: Option<EventBus>,
}

impl<R: Record> InMemoryRecordStore<R> {
    /// Create an empty store searching the record type's default fields
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
            pipeline: Pipeline::for_record::<R>(),
            latency: Latency::default(),
            events: None,
        }
    }

    /// Create a store seeded with records (later duplicates of an ID win)
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.records.write() {
            map.extend(records.into_iter().map(|r| (r.id(), r)));
        }
        store
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Number of stored records
    pub fn len(&self) -> ListResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> ListResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Copy of every record, in insertion order
    pub fn snapshot(&self) -> ListResult<Vec<R>> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn read(&self) -> ListResult<std::sync::RwLockReadGuard<'_, IndexMap<RecordId, R>>> {
        self.records.read().map_err(|e| {
            ListError::Source(SourceError::Unavailable {
                message: format!("Failed to acquire read lock: {}", e),
            })
        })
    }

    fn write(&self) -> ListResult<std::sync::RwLockWriteGuard<'_, IndexMap<RecordId, R>>> {
        self.records.write().map_err(|e| {
            ListError::Source(SourceError::Unavailable {
                message: format!("Failed to acquire write lock: {}", e),
            })
        })
    }

    fn publish(&self, event: RecordEvent) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}

impl<R: Record> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordSource<R> for InMemoryRecordStore<R> {
    async fn fetch_page(&self, state: &QueryState) -> ListResult<Page<R>> {
        pause(self.latency.list).await;
        let records = self.read()?;
        Ok(self.pipeline.run(records.values(), state))
    }

    async fn fetch_one(&self, id: RecordId) -> ListResult<Option<R>> {
        pause(self.latency.get).await;
        Ok(self.read()?.get(&id).cloned())
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    async fn create(&self, mut record: R) -> ListResult<R> {
        pause(self.latency.write).await;
        {
            let mut records = self.write()?;
            let id = records.keys().max().map_or(1, |max| max + 1);
            record.set_id(id);
            record.touch(Utc::now());
            records.insert(id, record.clone());
        }

        tracing::info!(collection = R::resource_name(), id = record.id(), "record created");
        self.publish(RecordEvent::Created {
            collection: R::resource_name().to_string(),
            record_id: record.id(),
            data: serde_json::to_value(&record).unwrap_or_default(),
        });
        Ok(record)
    }

    async fn update(&self, id: RecordId, mut record: R) -> ListResult<R> {
        pause(self.latency.write).await;
        {
            let mut records = self.write()?;
            if !records.contains_key(&id) {
                return Err(ListError::not_found(R::resource_name(), id));
            }
            record.set_id(id);
            record.touch(Utc::now());
            records.insert(id, record.clone());
        }

        tracing::info!(collection = R::resource_name(), id, "record updated");
        self.publish(RecordEvent::Updated {
            collection: R::resource_name().to_string(),
            record_id: id,
            data: serde_json::to_value(&record).unwrap_or_default(),
        });
        Ok(record)
    }

    async fn delete(&self, id: RecordId) -> ListResult<()> {
        pause(self.latency.write).await;
        self.write()?
            .shift_remove(&id)
            .ok_or_else(|| ListError::not_found(R::resource_name(), id))?;

        tracing::info!(collection = R::resource_name(), id, "record deleted");
        self.publish(RecordEvent::Deleted {
            collection: R::resource_name().to_string(),
            record_id: id,
        });
        Ok(())
    }
}
