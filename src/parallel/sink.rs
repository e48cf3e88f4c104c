//! Result sink for parallel processing
//!
//! Re-sequences aggregated matches into detection order and merges the
//! per-worker counters.

use crossbeam_channel::Receiver;
use std::collections::HashMap;
use tracing::debug;

use crate::error::Error;
use crate::model::{MatchCollection, MatchStats};
use crate::stats::ProcessingStats;

use super::types::{BatchResult, StopFlag};

/// Everything the sink collected once every worker has hung up
#[derive(Debug, Default)]
pub(crate) struct SinkOutcome {
    pub matches: MatchCollection,
    pub stats: ProcessingStats,
    /// Failure of the earliest failing batch, if any
    pub error: Option<(u64, Error)>,
}

/// Collect results until the result queue closes.
///
/// Matches are appended strictly by batch id, never by arrival. After a
/// failure the sink keeps draining so that no worker blocks on a full queue,
/// but only the lowest failing batch id is kept.
pub(crate) fn ordered_result_sink(
    result_receiver: Receiver<BatchResult>,
    stop: &StopFlag,
) -> SinkOutcome {
    let mut outcome = SinkOutcome::default();
    let mut pending_batches: HashMap<u64, MatchStats> = HashMap::new();
    let mut next_expected_id = 0u64;

    while let Ok(batch_result) = result_receiver.recv() {
        let batch_id = batch_result.batch_id;
        outcome.stats.merge(&batch_result.worker_stats);

        match batch_result.outcome {
            Ok(stats) => {
                if outcome.error.is_some() {
                    continue;
                }
                pending_batches.insert(batch_id, stats);
            }
            Err(err) => {
                stop.raise();
                debug!(match_id = batch_id, "aggregation failed: {}", err);
                match &outcome.error {
                    Some((first_id, _)) if *first_id < batch_id => {}
                    _ => outcome.error = Some((batch_id, err)),
                }
                pending_batches.clear();
                continue;
            }
        }

        // Emit all consecutive batches starting from next_expected_id
        while let Some(stats) = pending_batches.remove(&next_expected_id) {
            outcome.matches.push(stats);
            next_expected_id += 1;
        }
    }

    if !pending_batches.is_empty() && outcome.error.is_none() {
        // Only reachable when a batch id went missing, i.e. a worker died
        debug!(
            missing = next_expected_id,
            stranded = pending_batches.len(),
            "result stream ended with a gap"
        );
    }

    outcome
}
