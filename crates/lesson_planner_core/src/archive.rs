//! crates/lesson_planner_core/src/archive.rs
//!
//! The lesson archive: an ordered list of saved lessons persisted as one JSON
//! blob under a single key of a `KeyValueStore`.
//!
//! Every mutation writes the whole list before returning. If the write fails
//! the in-memory list is restored, so it always mirrors what is stored.

use std::sync::Arc;

use tracing::{info, warn};

use crate::analytics::{aggregate, FleetSummary};
use crate::domain::{LessonMetrics, LessonRecord};
use crate::error::{LessonError, LessonResult};
use crate::metrics::compute_metrics;
use crate::ports::{KeyValueStore, PortError, PortResult};
use crate::scores::parse_scores;

/// Store key used when none is configured.
pub const DEFAULT_ARCHIVE_KEY: &str = "lessonArchive";

pub struct LessonArchive {
    store: Arc<dyn KeyValueStore>,
    key: String,
    records: Vec<LessonRecord>,
}

impl LessonArchive {
    /// Loads the archive stored under `key`.
    ///
    /// A missing key yields an empty archive. So does a blob that cannot be
    /// deserialized; that case is logged and the blob is overwritten on the
    /// next mutation. Only a failure to read from the store is returned.
    pub async fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> PortResult<Self> {
        let key = key.into();
        let records = match store.get(&key).await? {
            None => Vec::new(),
            Some(blob) => match serde_json::from_str::<Vec<LessonRecord>>(&blob) {
                Ok(records) => records,
                Err(e) => {
                    warn!(key = %key, error = %e, "Malformed lesson archive, starting empty");
                    Vec::new()
                }
            },
        };
        info!(key = %key, lessons = records.len(), "Lesson archive loaded");
        Ok(Self { store, key, records })
    }

    pub fn records(&self) -> &[LessonRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> LessonResult<&LessonRecord> {
        self.records.get(index).ok_or(LessonError::IndexOutOfRange {
            index,
            len: self.records.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Adds a lesson at the end and returns its position.
    pub async fn append(&mut self, record: LessonRecord) -> LessonResult<usize> {
        self.records.push(record);
        if let Err(e) = self.persist().await {
            self.records.pop();
            return Err(e.into());
        }
        Ok(self.records.len() - 1)
    }

    /// Replaces the score data of the lesson at `index` and recomputes its metrics.
    ///
    /// Nothing changes and nothing is written when the index is out of range or
    /// the text holds no valid score.
    pub async fn update_scores(
        &mut self,
        index: usize,
        scores_text: &str,
    ) -> LessonResult<LessonMetrics> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(LessonError::IndexOutOfRange { index, len })?;

        let metrics = compute_metrics(&parse_scores(scores_text)?);

        let previous_text = std::mem::replace(&mut record.scores_text, scores_text.to_string());
        let previous_metrics = record.metrics.replace(metrics);

        if let Err(e) = self.persist().await {
            let record = &mut self.records[index];
            record.scores_text = previous_text;
            record.metrics = previous_metrics;
            return Err(e.into());
        }
        Ok(metrics)
    }

    /// Removes the lesson at `index`, shifting later lessons down by one.
    pub async fn delete_at(&mut self, index: usize) -> LessonResult<LessonRecord> {
        if index >= self.records.len() {
            return Err(LessonError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        let removed = self.records.remove(index);
        if let Err(e) = self.persist().await {
            self.records.insert(index, removed);
            return Err(e.into());
        }
        Ok(removed)
    }

    pub fn summary(&self) -> FleetSummary {
        aggregate(&self.records)
    }

    async fn persist(&self) -> PortResult<()> {
        let blob = serde_json::to_string(&self.records)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store.set(&self.key, &blob).await
    }
}
