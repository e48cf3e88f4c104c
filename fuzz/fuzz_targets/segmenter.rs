#![no_main]

use fraglog::event::{classify, LogLine};
use fraglog::segmenter::MatchSegmenter;
use libfuzzer_sys::fuzz_target;

const MAX_LINES: usize = 256;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let mut segmenter = MatchSegmenter::new();
    let mut expected_id = 0u64;

    for (idx, raw) in text.lines().take(MAX_LINES).enumerate() {
        let _ = classify(raw);
        if let Some(batch) = segmenter.feed_line(LogLine::new(idx + 1, raw)) {
            assert!(!batch.lines.is_empty(), "segmenter emitted an empty match");
            assert_eq!(batch.id, expected_id);
            expected_id += 1;
        }
    }

    if let Some(batch) = segmenter.finish() {
        assert!(!batch.lines.is_empty());
        assert_eq!(batch.id, expected_id);
        expected_id += 1;
    }

    assert_eq!(segmenter.stats().matches as u64, expected_id);
});
