// Core library for the fraglog match statistics tool
//
// Quake III Arena server logs are split into matches at `InitGame:` lines,
// every match is folded into kill statistics and the collection is rendered
// as a `game-N` keyed JSON report.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod config_file;
pub mod decompression;
pub mod error;
pub mod event;
pub mod logging;
pub mod means;
pub mod model;
pub mod output;
pub mod parallel;
pub mod pipeline;
pub mod platform;
pub mod readers;
pub mod segmenter;
pub mod stats;

pub use aggregator::{aggregate, Aggregator};
pub use config::{ErrorStrategy, FraglogConfig};
pub use error::{Error, Result};
pub use event::{classify, Actor, Event, LineKind, LogLine, PlayerId};
pub use means::MeansOfDeath;
pub use model::{MatchCollection, MatchStats, PlayerStat};
pub use pipeline::{run_pipeline, run_sequential, PipelineResult};
pub use segmenter::{MatchBatch, MatchSegmenter};
pub use stats::ProcessingStats;
