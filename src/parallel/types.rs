//! Type definitions for the threaded pipeline
//!
//! Contains configuration, the stop flag shared by all stages and the
//! messages that travel between them.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::{ErrorStrategy, DEFAULT_QUEUE_SIZE};
use crate::error::Error;
use crate::model::MatchStats;
use crate::stats::ProcessingStats;

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    /// Aggregator threads draining the batch queue
    pub num_workers: usize,
    /// Capacity of both hand-off queues
    pub queue_size: usize,
    pub on_error: ErrorStrategy,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: 1,
            queue_size: DEFAULT_QUEUE_SIZE,
            on_error: ErrorStrategy::Abort,
        }
    }
}

impl From<&crate::config::FraglogConfig> for ParallelConfig {
    fn from(config: &crate::config::FraglogConfig) -> Self {
        Self {
            num_workers: config.performance.effective_threads(),
            queue_size: config.performance.effective_queue_size(),
            on_error: config.processing.on_error,
        }
    }
}

/// Set by the first stage that fails so the others stop picking up work
#[derive(Debug, Clone, Default)]
pub(crate) struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of aggregating one batch
#[derive(Debug)]
pub(crate) struct BatchResult {
    pub batch_id: u64,
    pub outcome: Result<MatchStats, Error>,
    pub worker_stats: ProcessingStats,
}
