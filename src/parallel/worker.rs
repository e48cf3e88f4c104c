//! Aggregator worker thread.

use crossbeam_channel::{Receiver, Sender};
use tracing::debug;

use crate::aggregator::Aggregator;
use crate::segmenter::MatchBatch;
use crate::stats::ProcessingStats;

use super::types::{BatchResult, StopFlag};

/// Drain batches until the segmenter closes the queue or a stage fails.
///
/// Each batch is owned by exactly one worker for the duration of its pass.
/// After forwarding an error the worker raises the stop flag and exits,
/// dropping its end of both queues.
pub(crate) fn worker_thread(
    worker_id: usize,
    batch_receiver: Receiver<MatchBatch>,
    result_sender: Sender<BatchResult>,
    aggregator: Aggregator,
    stop: StopFlag,
) {
    // A batch that has been received is always aggregated, so every batch
    // ahead of a failing one in the queue still gets its own verdict
    while !stop.is_raised() {
        let batch = match batch_receiver.recv() {
            Ok(batch) => batch,
            Err(_) => break,
        };

        let (outcome, worker_stats) = match aggregator.aggregate(&batch) {
            Ok(aggregated) => {
                let stats = ProcessingStats {
                    malformed_skipped: aggregated.skipped,
                    ..Default::default()
                };
                (Ok(aggregated.stats), stats)
            }
            Err(err) => (Err(err), ProcessingStats::default()),
        };
        let failed = outcome.is_err();
        debug!(worker_id, match_id = batch.id, failed, "match aggregated");

        let result = BatchResult {
            batch_id: batch.id,
            outcome,
            worker_stats,
        };
        if result_sender.send(result).is_err() || failed {
            stop.raise();
            break;
        }
    }
}
