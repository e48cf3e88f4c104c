#![no_main]

use fraglog::aggregator::Aggregator;
use fraglog::config::ErrorStrategy;
use fraglog::event::LogLine;
use fraglog::segmenter::MatchBatch;
use libfuzzer_sys::fuzz_target;

const MAX_LINES: usize = 128;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let lines: Vec<LogLine> = text
        .lines()
        .take(MAX_LINES)
        .enumerate()
        .map(|(idx, raw)| LogLine::new(idx + 1, raw))
        .collect();
    let batch = MatchBatch { id: 0, lines };

    // Abort mode may fail on malformed input but must never panic
    let _ = Aggregator::new(ErrorStrategy::Abort).aggregate(&batch);

    if let Ok(aggregated) = Aggregator::new(ErrorStrategy::Skip).aggregate(&batch) {
        let stats = aggregated.stats;
        let by_means: u64 = stats.kills_by_means().values().sum();
        assert_eq!(stats.total_kills(), by_means);

        let credited: u64 = stats.players().values().map(|p| p.kills).sum();
        assert!(credited <= stats.total_kills());
    }
});
