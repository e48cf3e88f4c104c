use clap::ValueEnum;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::output::{OutputTarget, DEFAULT_OUTPUT_PATH};

/// Default capacity of the batch and result channels
pub const DEFAULT_QUEUE_SIZE: usize = 16;

/// Main configuration struct for fraglog
#[derive(Debug, Clone, Default)]
pub struct FraglogConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub processing: ProcessingConfig,
    pub performance: PerformanceConfig,
}

/// Input configuration
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// `None` reads stdin
    pub file: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub target: OutputTarget,
    pub summary: bool,
    pub stats: bool,
    pub verbosity: Verbosity,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            target: OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_PATH)),
            summary: false,
            stats: false,
            verbosity: Verbosity::default(),
        }
    }
}

/// Processing configuration
#[derive(Debug, Clone, Default)]
pub struct ProcessingConfig {
    pub on_error: ErrorStrategy,
}

/// Performance configuration
#[derive(Debug, Clone)]
pub struct PerformanceConfig {
    pub sequential: bool,
    pub threads: usize,
    pub queue_size: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            sequential: false,
            threads: 1,
            queue_size: DEFAULT_QUEUE_SIZE,
        }
    }
}

impl PerformanceConfig {
    /// Aggregator worker count, resolving 0 to the number of CPUs
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }

    pub fn effective_queue_size(&self) -> usize {
        self.queue_size.max(1)
    }
}

/// What to do with a kill or userinfo line that cannot be decoded
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorStrategy {
    /// Fail the whole run on the first malformed line
    #[default]
    Abort,
    /// Drop the line with a warning and keep going
    Skip,
}

/// Diagnostic verbosity derived from -v/-q
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Normal,
            (false, 1) => Verbosity::Verbose,
            (false, _) => Verbosity::Debug,
        }
    }

    /// Default `tracing` filter directive for this verbosity
    pub fn filter_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::Debug => "debug",
        }
    }
}

impl FraglogConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let file = cli
            .file
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
            .cloned();

        Self {
            input: InputConfig { file },
            output: OutputConfig {
                target: OutputTarget::from_arg(&cli.output_file),
                summary: cli.summary,
                stats: cli.stats,
                verbosity: Verbosity::from_flags(cli.verbose, cli.quiet),
            },
            processing: ProcessingConfig {
                on_error: cli.on_error,
            },
            performance: PerformanceConfig {
                sequential: cli.sequential,
                threads: cli.threads,
                queue_size: cli.queue_size,
            },
        }
    }

    /// Human-readable dump for --show-config
    pub fn describe(&self) -> String {
        let input = match &self.input.file {
            Some(path) => path.display().to_string(),
            None => "<stdin>".to_string(),
        };
        let mode = if self.performance.sequential {
            "sequential".to_string()
        } else {
            format!(
                "parallel ({} aggregator thread(s), queue {})",
                self.performance.effective_threads(),
                self.performance.effective_queue_size()
            )
        };
        format!(
            "input: {}\noutput: {}\non-error: {:?}\nmode: {}\nverbosity: {}",
            input,
            self.output.target,
            self.processing.on_error,
            mode,
            self.output.verbosity.filter_directive()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_from_cli() {
        let cli = Cli::parse_from(["fraglog", "games.log"]);
        let config = FraglogConfig::from_cli(&cli);
        assert_eq!(config.input.file, Some(PathBuf::from("games.log")));
        assert_eq!(
            config.output.target,
            OutputTarget::File(PathBuf::from(DEFAULT_OUTPUT_PATH))
        );
        assert_eq!(config.processing.on_error, ErrorStrategy::Abort);
        assert!(!config.performance.sequential);
        assert_eq!(config.performance.effective_threads(), 1);
        assert_eq!(config.output.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_dash_means_stdin_and_stdout() {
        let cli = Cli::parse_from(["fraglog", "-o", "-", "-"]);
        let config = FraglogConfig::from_cli(&cli);
        assert_eq!(config.input.file, None);
        assert_eq!(config.output.target, OutputTarget::Stdout);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "fraglog",
            "--on-error",
            "skip",
            "--sequential",
            "--threads",
            "0",
            "--queue-size",
            "0",
            "-vv",
            "--summary",
            "-s",
        ]);
        let config = FraglogConfig::from_cli(&cli);
        assert_eq!(config.processing.on_error, ErrorStrategy::Skip);
        assert!(config.performance.sequential);
        assert!(config.performance.effective_threads() >= 1);
        assert_eq!(config.performance.effective_queue_size(), 1);
        assert_eq!(config.output.verbosity, Verbosity::Debug);
        assert!(config.output.summary);
        assert!(config.output.stats);
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(Verbosity::from_flags(0, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(3, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(1, false), Verbosity::Verbose);
        assert_eq!(Verbosity::Verbose.filter_directive(), "info");
    }
}
