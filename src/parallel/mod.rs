//! Parallel processing module for fraglog
//!
//! Matches are independent once segmented, so aggregation is spread over
//! worker threads while a single thread keeps reading the input in order.
//!
//! # Module Structure
//!
//! - `types`: Configuration, stop flag and batch results
//! - `batching`: Segmenter thread that owns the input reader
//! - `worker`: Aggregator worker threads
//! - `sink`: Result sink that restores detection order
//! - `processor`: Main ParallelProcessor orchestration

mod batching;
mod processor;
mod sink;
mod types;
mod worker;

// Re-export public types
pub use processor::ParallelProcessor;
pub use types::ParallelConfig;
