//! Main parallel processor orchestration
//!
//! Wires the segmenter, aggregator workers and ordered sink together with
//! bounded channels and joins every stage before reporting.

use crossbeam_channel::bounded;
use std::io::BufRead;
use std::thread::{self, JoinHandle};
use tracing::debug;

use crate::aggregator::Aggregator;
use crate::error::{Error, Result};
use crate::pipeline::PipelineResult;

use super::batching::segmenter_thread;
use super::sink::ordered_result_sink;
use super::types::{ParallelConfig, StopFlag};
use super::worker::worker_thread;

/// Parallel processor for match aggregation
pub struct ParallelProcessor {
    config: ParallelConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self { config }
    }

    /// Segment `reader` on its own thread and aggregate matches on
    /// `num_workers` threads while the calling thread collects results.
    ///
    /// Every stage is joined before returning. When more than one stage
    /// failed, the error of the earliest failing match wins over a scan
    /// failure, which always happens later in the input.
    pub fn process<R: BufRead + Send + 'static>(&self, reader: R) -> Result<PipelineResult> {
        let queue_size = self.config.queue_size.max(1);
        let num_workers = self.config.num_workers.max(1);
        let (batch_sender, batch_receiver) = bounded(queue_size);
        let (result_sender, result_receiver) = bounded(queue_size);
        let stop = StopFlag::default();

        debug!(num_workers, queue_size, "starting parallel pipeline");

        let segmenter_handle = {
            let stop = stop.clone();
            thread::spawn(move || segmenter_thread(reader, batch_sender, stop))
        };

        let worker_handles: Vec<JoinHandle<()>> = (0..num_workers)
            .map(|worker_id| {
                let batch_receiver = batch_receiver.clone();
                let result_sender = result_sender.clone();
                let aggregator = Aggregator::new(self.config.on_error);
                let stop = stop.clone();
                thread::spawn(move || {
                    worker_thread(worker_id, batch_receiver, result_sender, aggregator, stop)
                })
            })
            .collect();

        // The sink must see the result queue close once the workers are done
        drop(batch_receiver);
        drop(result_sender);

        let outcome = ordered_result_sink(result_receiver, &stop);

        let segmenter_result = segmenter_handle.join();

        let mut worker_panicked = false;
        for handle in worker_handles {
            worker_panicked |= handle.join().is_err();
        }

        if let Some((batch_id, err)) = outcome.error {
            debug!(match_id = batch_id, "reporting aggregation failure");
            return Err(err);
        }
        let mut stats = segmenter_result.map_err(|_| Error::StagePanicked("segmenter"))??;
        if worker_panicked {
            return Err(Error::StagePanicked("aggregator"));
        }

        stats.merge(&outcome.stats);
        Ok(PipelineResult {
            matches: outcome.matches,
            stats,
        })
    }
}
