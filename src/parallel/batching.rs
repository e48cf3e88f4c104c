//! Segmenter thread: the only stage that reads input.

use crossbeam_channel::Sender;
use std::io::BufRead;
use tracing::debug;

use crate::error::Result;
use crate::readers::LineScanner;
use crate::segmenter::{MatchBatch, MatchSegmenter};
use crate::stats::ProcessingStats;

use super::types::StopFlag;

/// Scan `reader` line by line and send one batch per detected match.
///
/// Returning drops `batch_sender`, which is how workers learn that no more
/// batches are coming. A scan error is returned after the batches emitted so
/// far have been handed off.
pub(crate) fn segmenter_thread<R: BufRead>(
    reader: R,
    batch_sender: Sender<MatchBatch>,
    stop: StopFlag,
) -> Result<ProcessingStats> {
    let mut segmenter = MatchSegmenter::new();

    for line in LineScanner::new(reader) {
        let line = line?;
        if let Some(batch) = segmenter.feed_line(line) {
            if !send_batch(&batch_sender, batch, &stop) {
                return Ok(segmenter.into_stats());
            }
        }
    }

    if let Some(batch) = segmenter.finish() {
        if !send_batch(&batch_sender, batch, &stop) {
            debug!("trailing match not delivered; aggregation stopped");
        }
    }
    Ok(segmenter.into_stats())
}

/// Returns false once downstream has stopped accepting batches
fn send_batch(batch_sender: &Sender<MatchBatch>, batch: MatchBatch, stop: &StopFlag) -> bool {
    if stop.is_raised() {
        debug!("aggregation stopped; segmenter exiting early");
        return false;
    }
    debug!(match_id = batch.id, lines = batch.lines.len(), "match detected");
    batch_sender.send(batch).is_ok()
}
