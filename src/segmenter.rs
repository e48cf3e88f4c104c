//! Splits the line stream into one batch per match.

use crate::event::{classify, LineKind, LogLine};
use crate::stats::ProcessingStats;

/// The lines of one match that aggregation needs (kills and userinfo changes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBatch {
    /// Detection order, starting at 0
    pub id: u64,
    pub lines: Vec<LogLine>,
}

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentState {
    /// No batch open
    Idle,
    /// A batch is open, possibly still empty
    InMatch,
}

/// Groups event lines into per-match batches using `InitGame:` boundaries.
///
/// Consecutive boundaries with no event in between never produce an empty
/// batch, and whatever is buffered when input ends becomes the last batch.
pub struct MatchSegmenter {
    state: SegmentState,
    buffer: Vec<LogLine>,
    next_id: u64,
    stats: ProcessingStats,
}

impl Default for MatchSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchSegmenter {
    pub fn new() -> Self {
        Self {
            state: SegmentState::Idle,
            buffer: Vec::new(),
            next_id: 0,
            stats: ProcessingStats::default(),
        }
    }

    /// Feed the next line in input order; returns a batch when a boundary closes one
    pub fn feed_line(&mut self, line: LogLine) -> Option<MatchBatch> {
        self.stats.lines_read += 1;

        match classify(&line.text) {
            LineKind::Boundary => {
                self.stats.boundaries += 1;
                match self.state {
                    SegmentState::InMatch if !self.buffer.is_empty() => {
                        self.state = SegmentState::Idle;
                        Some(self.take_batch())
                    }
                    _ => {
                        self.state = SegmentState::InMatch;
                        None
                    }
                }
            }
            LineKind::Kill => {
                self.stats.kill_events += 1;
                self.push(line);
                None
            }
            LineKind::IdentityChange { .. } => {
                self.stats.userinfo_events += 1;
                self.push(line);
                None
            }
            LineKind::Irrelevant => {
                self.stats.lines_ignored += 1;
                None
            }
        }
    }

    /// Emit the trailing batch at end of input, if anything is buffered
    pub fn finish(&mut self) -> Option<MatchBatch> {
        self.state = SegmentState::Idle;
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.take_batch())
        }
    }

    /// Counters collected so far
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    pub fn into_stats(self) -> ProcessingStats {
        self.stats
    }

    fn push(&mut self, line: LogLine) {
        self.state = SegmentState::InMatch;
        self.buffer.push(line);
    }

    fn take_batch(&mut self) -> MatchBatch {
        let id = self.next_id;
        self.next_id += 1;
        self.stats.matches += 1;
        MatchBatch {
            id,
            lines: std::mem::take(&mut self.buffer),
        }
    }
}
