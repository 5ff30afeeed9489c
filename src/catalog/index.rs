//! In-memory content index
//!
//! Primary id -> record map plus a category -> id-set auxiliary map, both
//! built at load and append-only at runtime. Category retrieval is O(1)
//! amortized through the auxiliary map.

use dashmap::DashMap;
use std::collections::HashSet;
use tracing::{debug, info};

use super::models::ContentRecord;
use crate::error::{RecommendError, Result};

/// Read-mostly catalog of content records
pub struct ContentIndex {
    records: DashMap<String, ContentRecord>,
    by_category: DashMap<String, HashSet<String>>,
}

impl ContentIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            by_category: DashMap::new(),
        }
    }

    /// Build an index from an initial load of records
    pub fn from_records(records: Vec<ContentRecord>) -> Result<Self> {
        let index = Self::new();
        for record in records {
            index.upsert(record)?;
        }
        info!("Content index loaded: {} records", index.len());
        Ok(index)
    }

    /// Add or replace a record
    ///
    /// Administrative operation; validates the indexing invariants and
    /// re-links the category sets when an existing record's tags changed.
    pub fn upsert(&self, record: ContentRecord) -> Result<()> {
        record.validate()?;

        if let Some(previous) = self.records.get(&record.id) {
            for category in &previous.categories {
                if let Some(mut ids) = self.by_category.get_mut(category) {
                    ids.remove(&record.id);
                }
            }
        }

        for category in &record.categories {
            self.by_category
                .entry(category.clone())
                .or_default()
                .insert(record.id.clone());
        }

        debug!("Indexed content: id={}, categories={:?}", record.id, record.categories);
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Snapshot of every record, no implied ordering
    pub fn all_candidates(&self) -> Vec<ContentRecord> {
        self.records.iter().map(|r| r.value().clone()).collect()
    }

    /// Records carrying the given category tag
    pub fn by_category(&self, category: &str) -> Vec<ContentRecord> {
        match self.by_category.get(category) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.records.get(id).map(|r| r.value().clone()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Fetch a record by id
    pub fn get(&self, id: &str) -> Option<ContentRecord> {
        self.records.get(id).map(|r| r.value().clone())
    }

    /// Increment a record's view counter
    pub fn record_view(&self, id: &str) -> Result<()> {
        match self.records.get_mut(id) {
            Some(mut record) => {
                record.view_count += 1;
                Ok(())
            }
            None => Err(RecommendError::UnknownContent(id.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for ContentIndex {
    fn default() -> Self {
        Self::new()
    }
}
