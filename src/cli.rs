// Command-line interface definitions

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::{ErrorStrategy, DEFAULT_QUEUE_SIZE};
use crate::output::DEFAULT_OUTPUT_PATH;

#[derive(Parser, Debug, Clone)]
#[command(name = "fraglog")]
#[command(about = "Turn Quake III Arena server logs into per-match kill statistics")]
#[command(
    long_about = "Turn Quake III Arena server logs into per-match kill statistics\n\nEach match (delimited by InitGame lines) becomes one \"game-N\" entry with its\ntotal kills, players, kills per player and kills by means of death.\n\nMODES:\n  (default)     Segmentation and aggregation run on separate threads\n  --sequential  Single-threaded pass with identical output"
)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Log file to read; gzip and zstd archives are decompressed. Reads stdin when absent or '-'
    #[arg(value_name = "FILE", help_heading = "Input Options")]
    pub file: Option<PathBuf>,

    /// Where to write the JSON report ('-' for stdout)
    #[arg(
        short = 'o',
        long = "output-file",
        default_value = DEFAULT_OUTPUT_PATH,
        help_heading = "Output Options"
    )]
    pub output_file: String,

    /// Print a per-match table of players, kills and deaths to stderr
    #[arg(long = "summary", help_heading = "Output Options")]
    pub summary: bool,

    /// Print processing statistics to stderr
    #[arg(short = 's', long = "stats", help_heading = "Output Options")]
    pub stats: bool,

    /// How to handle malformed kill or userinfo lines
    #[arg(
        long = "on-error",
        value_enum,
        default_value = "abort",
        help_heading = "Processing Options"
    )]
    pub on_error: ErrorStrategy,

    /// Segment and aggregate in a single thread
    #[arg(long = "sequential", help_heading = "Performance Options")]
    pub sequential: bool,

    /// Aggregator threads (0 = number of CPUs)
    #[arg(long = "threads", default_value_t = 1, help_heading = "Performance Options")]
    pub threads: usize,

    /// Capacity of the hand-off queues between stages
    #[arg(
        long = "queue-size",
        default_value_t = DEFAULT_QUEUE_SIZE,
        help_heading = "Performance Options"
    )]
    pub queue_size: usize,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, help_heading = "Display Options")]
    pub verbose: u8,

    /// Only print errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose", help_heading = "Display Options")]
    pub quiet: bool,

    /// Print a shell completion script and exit
    #[arg(long = "completions", value_name = "SHELL", help_heading = "Configuration Options")]
    pub completions: Option<Shell>,

    /// Use this config file instead of .fraglogrc / config.ini
    #[arg(long = "config-file", value_name = "PATH", help_heading = "Configuration Options")]
    pub config_file: Option<PathBuf>,

    /// Do not load any config file
    #[arg(long = "ignore-config", help_heading = "Configuration Options")]
    pub ignore_config: bool,

    /// Print the effective configuration and exit
    #[arg(long = "show-config", help_heading = "Configuration Options")]
    pub show_config: bool,
}
