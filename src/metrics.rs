//! Basic Metrics
//!
//! Operation counters and latency tracking for load, evaluation and
//! analogy queries.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector
#[derive(Debug)]
pub struct Metrics {
    /// Total operations count
    total_ops: AtomicU64,

    /// Failed operations count
    failed_ops: AtomicU64,

    /// Operations per kind ("load", "evaluate", "analogy", ...)
    ops_by_kind: RwLock<HashMap<String, u64>>,

    latency_sum_us: AtomicU64,
    latency_min_us: AtomicU64,
    latency_max_us: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self {
            total_ops: AtomicU64::new(0),
            failed_ops: AtomicU64::new(0),
            ops_by_kind: RwLock::new(HashMap::new()),
            latency_sum_us: AtomicU64::new(0),
            latency_min_us: AtomicU64::new(u64::MAX),
            latency_max_us: AtomicU64::new(0),
        }
    }

    /// Record an operation
    pub fn record_operation(&self, kind: &str, latency: Duration, ok: bool) {
        self.total_ops.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failed_ops.fetch_add(1, Ordering::Relaxed);
        }

        *self.ops_by_kind.write().entry(kind.to_string()).or_insert(0) += 1;

        let latency_us = latency.as_micros() as u64;
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.latency_min_us.fetch_min(latency_us, Ordering::Relaxed);
        self.latency_max_us.fetch_max(latency_us, Ordering::Relaxed);
    }

    pub fn total_ops(&self) -> u64 {
        self.total_ops.load(Ordering::Relaxed)
    }

    pub fn failed_ops(&self) -> u64 {
        self.failed_ops.load(Ordering::Relaxed)
    }

    /// Operations recorded under `kind`
    pub fn ops_for(&self, kind: &str) -> u64 {
        self.ops_by_kind.read().get(kind).copied().unwrap_or(0)
    }

    /// Snapshot of the current counters
    pub fn summary(&self) -> MetricsSummary {
        let total_ops = self.total_ops();
        let min = self.latency_min_us.load(Ordering::Relaxed);
        MetricsSummary {
            total_ops,
            failed_ops: self.failed_ops(),
            avg_latency_us: if total_ops > 0 {
                self.latency_sum_us.load(Ordering::Relaxed) / total_ops
            } else {
                0
            },
            min_latency_us: if min == u64::MAX { 0 } else { min },
            max_latency_us: self.latency_max_us.load(Ordering::Relaxed),
            ops_by_kind: self.ops_by_kind.read().clone(),
        }
    }
}

/// Point-in-time view of [`Metrics`]
#[derive(Debug, Clone)]
pub struct MetricsSummary {
    pub total_ops: u64,
    pub failed_ops: u64,
    pub avg_latency_us: u64,
    pub min_latency_us: u64,
    pub max_latency_us: u64,
    pub ops_by_kind: HashMap<String, u64>,
}
