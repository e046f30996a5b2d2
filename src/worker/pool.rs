//! Worker Pool
//!
//! Multi-threaded analogy worker pool with optional CPU core affinity.

use crossbeam::channel::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::eval::{AnalogyQuery, AnalogyResult, AnalogySolver};
use crate::metrics::Metrics;

/// Worker pool configuration
#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    /// Number of worker threads (0 = auto-detect)
    pub num_workers: usize,
    /// Whether to pin workers to CPU cores
    pub pin_to_cores: bool,
    /// Job queue capacity
    pub queue_capacity: usize,
}

impl Default for WorkerPoolConfig {
    fn default() -> Self {
        Self {
            num_workers: 0,
            pin_to_cores: false,
            queue_capacity: 1024,
        }
    }
}

impl WorkerPoolConfig {
    /// Worker count for a batch of `jobs` queries
    pub fn effective_workers(&self, jobs: usize) -> usize {
        let wanted = if self.num_workers == 0 {
            num_cpus::get()
        } else {
            self.num_workers
        };
        wanted.min(jobs).max(1)
    }
}

type Job = (usize, AnalogyQuery);
type Outcome = (usize, Result<AnalogyResult>);

/// Runs a batch of analogy queries across worker threads
pub struct WorkerPool {
    config: WorkerPoolConfig,
    metrics: Arc<Metrics>,
}

impl WorkerPool {
    pub fn new(config: WorkerPoolConfig, metrics: Arc<Metrics>) -> Self {
        Self { config, metrics }
    }

    /// Solve every query, returning outcomes in query order
    pub fn run(
        &self,
        solver: &AnalogySolver,
        queries: &[AnalogyQuery],
    ) -> Result<Vec<Result<AnalogyResult>>> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }

        let num_workers = self.config.effective_workers(queries.len());
        info!(
            "Solving {} analogies with {} worker threads",
            queries.len(),
            num_workers
        );

        let core_ids = if self.config.pin_to_cores {
            core_affinity::get_core_ids().unwrap_or_default()
        } else {
            Vec::new()
        };

        let (job_tx, job_rx) = channel::bounded::<Job>(self.config.queue_capacity.max(1));
        let (result_tx, result_rx) = channel::unbounded::<Outcome>();

        let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(num_workers);
        for i in 0..num_workers {
            let receiver = job_rx.clone();
            let results = result_tx.clone();
            let solver = solver.clone();
            let metrics = self.metrics.clone();
            let core_id = core_ids.get(i).copied();

            let handle = thread::Builder::new()
                .name(format!("analogy-worker-{}", i))
                .spawn(move || {
                    if let Some(core) = core_id {
                        if core_affinity::set_for_current(core) {
                            debug!("Worker {} pinned to core {:?}", i, core);
                        }
                    }

                    debug!("Worker {} started", i);
                    Self::worker_loop(i, receiver, results, &solver, &metrics);
                    debug!("Worker {} stopped", i);
                })
                .map_err(|e| Error::Worker(format!("failed to spawn worker {}: {}", i, e)))?;

            handles.push(handle);
        }
        drop(job_rx);
        drop(result_tx);

        for (index, query) in queries.iter().enumerate() {
            // Fails only if every worker has exited
            if job_tx.send((index, query.clone())).is_err() {
                break;
            }
        }
        drop(job_tx);

        let mut slots: Vec<Option<Result<AnalogyResult>>> =
            (0..queries.len()).map(|_| None).collect();
        for (index, outcome) in result_rx.iter() {
            slots[index] = Some(outcome);
        }

        for handle in handles {
            handle
                .join()
                .map_err(|_| Error::Worker("analogy worker panicked".to_string()))?;
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.ok_or_else(|| Error::Worker(format!("no result for query {}", index)))
            })
            .collect()
    }

    /// Worker main loop
    fn worker_loop(
        worker_id: usize,
        receiver: Receiver<Job>,
        results: Sender<Outcome>,
        solver: &AnalogySolver,
        metrics: &Metrics,
    ) {
        while let Ok((index, query)) = receiver.recv() {
            let start = Instant::now();
            let outcome = solver.solve(&query);
            metrics.record_operation("analogy", start.elapsed(), outcome.is_ok());

            match &outcome {
                Ok(result) => debug!(
                    "Worker {}: {} -> {:?} ({:.4})",
                    worker_id, query, result.best_term, result.best_score
                ),
                Err(e) => debug!("Worker {}: {} failed: {}", worker_id, query, e),
            }

            if results.send((index, outcome)).is_err() {
                debug!("Worker {}: result channel closed", worker_id);
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::VectorStore;

    fn solver() -> AnalogySolver {
        let store = VectorStore::from_entries(vec![
            ("north", vec![0.0, 1.0]),
            ("south", vec![0.0, -1.0]),
            ("east", vec![1.0, 0.0]),
            ("west", vec![-1.0, 0.0]),
            ("up", vec![0.1, 0.9]),
        ])
        .unwrap();
        AnalogySolver::new(store)
    }

    #[test]
    fn test_effective_workers() {
        let config = WorkerPoolConfig {
            num_workers: 8,
            ..Default::default()
        };
        assert_eq!(config.effective_workers(3), 3);
        assert_eq!(config.effective_workers(20), 8);
        assert_eq!(config.effective_workers(0), 1);
        assert!(WorkerPoolConfig::default().effective_workers(1000) >= 1);
    }

    #[test]
    fn test_results_in_query_order() {
        let solver = solver();
        let queries: Vec<AnalogyQuery> = (0..32)
            .map(|i| {
                if i % 5 == 0 {
                    AnalogyQuery::new("north", "nowhere", "east")
                } else if i % 2 == 0 {
                    AnalogyQuery::new("north", "south", "east")
                } else {
                    AnalogyQuery::new("east", "west", "north")
                }
            })
            .collect();

        for num_workers in [1, 4, 16] {
            let config = WorkerPoolConfig {
                num_workers,
                queue_capacity: 2,
                ..Default::default()
            };
            let pool = WorkerPool::new(config, Arc::new(Metrics::new()));
            let results = pool.run(&solver, &queries).unwrap();

            assert_eq!(results.len(), queries.len());
            for (query, result) in queries.iter().zip(&results) {
                match solver.solve(query) {
                    Ok(expected) => assert_eq!(result.as_ref().unwrap(), &expected),
                    Err(_) => assert!(matches!(result, Err(Error::TermNotFound(_)))),
                }
            }
        }
    }

    #[test]
    fn test_empty_batch() {
        let pool = WorkerPool::new(WorkerPoolConfig::default(), Arc::new(Metrics::new()));
        assert!(pool.run(&solver(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_metrics_recorded() {
        let metrics = Arc::new(Metrics::new());
        let pool = WorkerPool::new(WorkerPoolConfig::default(), metrics.clone());
        let queries = vec![
            AnalogyQuery::new("north", "south", "east"),
            AnalogyQuery::new("north", "nowhere", "east"),
        ];

        pool.run(&solver(), &queries).unwrap();

        assert_eq!(metrics.ops_for("analogy"), 2);
        assert_eq!(metrics.failed_ops(), 1);
    }
}
