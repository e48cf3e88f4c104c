use std::time::{Duration, Instant};

/// Counters collected while processing one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub lines_read: usize,
    pub lines_ignored: usize,
    pub boundaries: usize,
    pub kill_events: usize,
    pub userinfo_events: usize,
    pub matches: usize,
    pub malformed_skipped: usize,
    pub processing_time: Duration,
}

impl ProcessingStats {
    /// Fold in the counters reported by another pipeline stage
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.lines_read += other.lines_read;
        self.lines_ignored += other.lines_ignored;
        self.boundaries += other.boundaries;
        self.kill_events += other.kill_events;
        self.userinfo_events += other.userinfo_events;
        self.matches += other.matches;
        self.malformed_skipped += other.malformed_skipped;
        self.processing_time = self.processing_time.max(other.processing_time);
    }

    pub fn finish_timer(&mut self, start: Instant) {
        self.processing_time = start.elapsed();
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Lines processed: {} total, {} ignored; Events: {} kills, {} userinfo changes; Matches: {}",
            self.lines_read, self.lines_ignored, self.kill_events, self.userinfo_events, self.matches
        );

        if self.malformed_skipped > 0 {
            output.push_str(&format!(", {} malformed lines skipped", self.malformed_skipped));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.lines_read > 0 {
            let lines_per_sec = (self.lines_read as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} lines/s)", lines_per_sec));
        }

        output
    }
}
