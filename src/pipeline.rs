//! Runs segmentation and aggregation over one input, either on the calling
//! thread or through the threaded [`ParallelProcessor`](crate::parallel::ParallelProcessor).

use std::io::BufRead;
use std::time::Instant;
use tracing::{debug, info};

use crate::aggregator::Aggregator;
use crate::config::{ErrorStrategy, FraglogConfig};
use crate::error::Result;
use crate::model::MatchCollection;
use crate::parallel::{ParallelConfig, ParallelProcessor};
use crate::readers::LineScanner;
use crate::segmenter::{MatchBatch, MatchSegmenter};
use crate::stats::ProcessingStats;

/// Finished matches plus the counters gathered while producing them
#[derive(Debug, Clone, Default)]
pub struct PipelineResult {
    pub matches: MatchCollection,
    pub stats: ProcessingStats,
}

/// Process `reader` according to the performance settings in `config`
pub fn run_pipeline<R: BufRead + Send + 'static>(
    reader: R,
    config: &FraglogConfig,
) -> Result<PipelineResult> {
    let start = Instant::now();

    let mut result = if config.performance.sequential {
        debug!("running sequential pipeline");
        run_sequential(reader, config.processing.on_error)?
    } else {
        ParallelProcessor::new(ParallelConfig::from(config)).process(reader)?
    };

    result.stats.finish_timer(start);
    info!(
        matches = result.matches.len(),
        lines = result.stats.lines_read,
        "processing complete"
    );
    Ok(result)
}

/// Single pass on the calling thread: each match is aggregated as soon as
/// its closing boundary is seen.
pub fn run_sequential<R: BufRead>(reader: R, on_error: ErrorStrategy) -> Result<PipelineResult> {
    let aggregator = Aggregator::new(on_error);
    let mut segmenter = MatchSegmenter::new();
    let mut result = PipelineResult::default();

    let fold = |batch: MatchBatch, result: &mut PipelineResult| -> Result<()> {
        let aggregated = aggregator.aggregate(&batch)?;
        debug!(match_id = batch.id, kills = aggregated.stats.total_kills(), "match aggregated");
        result.stats.malformed_skipped += aggregated.skipped;
        result.matches.push(aggregated.stats);
        Ok(())
    };

    for line in LineScanner::new(reader) {
        if let Some(batch) = segmenter.feed_line(line?) {
            fold(batch, &mut result)?;
        }
    }
    if let Some(batch) = segmenter.finish() {
        fold(batch, &mut result)?;
    }

    result.stats.merge(&segmenter.into_stats());
    Ok(result)
}
