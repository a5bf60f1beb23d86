//! Session-scoped snapshot cache.
//!
//! [`SnapshotCache`] holds the latest resolved outcome (snapshot or
//! failure) of each cacheable [`Operation`]. Entries never expire on
//! their own; the orchestrator invalidates one only when the user asks
//! for a retry. Predictions are never cached.
//!
//! The cache is shareable (`Arc<SnapshotCache>`) so several orchestrators
//! in one session see the same analytics and model-performance data.

use std::sync::Arc;

use moka::sync::Cache;

use crate::ChurnLensError;
use crate::client::Operation;
use crate::telemetry;
use crate::types::{AnalyticsSnapshot, ModelPerformance};

/// Upper bound on entries; one per cacheable operation is all that is used.
const MAX_ENTRIES: u64 = 8;

/// A cached resolution for one operation.
#[derive(Debug, Clone)]
pub enum CachedSnapshot {
    Analytics(Arc<AnalyticsSnapshot>),
    ModelPerformance(Arc<ModelPerformance>),
    Failed(ChurnLensError),
}

impl CachedSnapshot {
    pub fn is_failure(&self) -> bool {
        matches!(self, CachedSnapshot::Failed(_))
    }
}

/// Thread-safe store keyed on [`Operation`].
pub struct SnapshotCache {
    entries: Cache<Operation, CachedSnapshot>,
}

impl SnapshotCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: Cache::new(MAX_ENTRIES),
        }
    }

    /// Look up the latest resolution for an operation.
    ///
    /// Returns `None` on cache miss. Emits cache hit/miss metrics.
    pub fn get(&self, operation: Operation) -> Option<CachedSnapshot> {
        let entry = self.entries.get(&operation);
        let metric = if entry.is_some() {
            telemetry::CACHE_HITS_TOTAL
        } else {
            telemetry::CACHE_MISSES_TOTAL
        };
        metrics::counter!(metric, "operation" => operation.as_str()).increment(1);
        entry
    }

    /// Record (or overwrite) the latest resolution.
    pub fn insert(&self, operation: Operation, snapshot: CachedSnapshot) {
        self.entries.insert(operation, snapshot);
    }

    /// Drop the entry for one operation.
    pub fn invalidate(&self, operation: Operation) {
        self.entries.invalidate(&operation);
    }

    /// Whether an entry exists, without touching metrics.
    pub fn contains(&self, operation: Operation) -> bool {
        self.entries.contains_key(&operation)
    }

    /// Evict all entries.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl Default for SnapshotCache {
    fn default() -> Self {
        Self::new()
    }
}
