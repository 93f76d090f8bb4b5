// CLI configuration
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use mp3info::{ScanOptions, ScanPolicy, ScanType, VbrMode};
use std::path::PathBuf;

use super::output::OutputFormat;

/// mp3info - MPEG audio inspection tool
#[derive(Parser, Debug)]
#[command(name = "mp3info")]
#[command(about = "Report frame header, playing time and ID3v1 tag of MPEG audio files", long_about = None)]
#[command(version)]
pub struct Config {
    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    /// Quiet mode (suppress progress messages)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Scan depth
    #[arg(long, value_enum, default_value = "quick", global = true)]
    pub scan: ScanArg,

    /// How per-frame bitrates are reduced for VBR streams
    #[arg(long, value_enum, default_value = "average", global = true)]
    pub vbr: VbrArg,

    /// Recover from lost sync instead of failing
    #[arg(long, global = true)]
    pub resync: bool,

    /// Consecutive frames required before accepting a sync point
    #[arg(long, value_name = "N", global = true)]
    pub confirm_frames: Option<usize>,

    /// Frames sampled by a quick scan
    #[arg(long, value_name = "N", global = true)]
    pub quick_frames: Option<usize>,

    /// JSON file with scan options; flags override it
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan audio file(s) and print the result
    Scan {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a human-readable summary of file(s)
    Info {
        /// Audio file path(s)
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Show every header field
        #[arg(short, long)]
        detailed: bool,
    },

    /// Scan every file in a directory matching a pattern
    Batch {
        /// Directory path
        #[arg(short, long)]
        directory: String,

        /// File pattern (e.g., "*.mp3")
        #[arg(short, long, default_value = "*.mp3")]
        pattern: String,

        /// Worker threads
        #[arg(short, long, default_value_t = default_jobs())]
        jobs: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanArg {
    None,
    Quick,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VbrArg {
    Variable,
    Average,
    Median,
}

impl From<ScanArg> for ScanType {
    fn from(arg: ScanArg) -> Self {
        match arg {
            ScanArg::None => ScanType::None,
            ScanArg::Quick => ScanType::Quick,
            ScanArg::Full => ScanType::Full,
        }
    }
}

impl From<VbrArg> for VbrMode {
    fn from(arg: VbrArg) -> Self {
        match arg {
            VbrArg::Variable => VbrMode::Variable,
            VbrArg::Average => VbrMode::Average,
            VbrArg::Median => VbrMode::Median,
        }
    }
}

fn default_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

impl Config {
    pub fn policy(&self) -> ScanPolicy {
        ScanPolicy::new(self.scan.into(), self.vbr.into())
    }

    /// Options from `--config`, if given, with command-line flags applied
    /// on top.
    pub fn scan_options(&self) -> anyhow::Result<ScanOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => ScanOptions::default(),
        };

        if self.resync {
            options.resync = true;
        }
        if let Some(frames) = self.confirm_frames {
            options.min_consecutive_frames = frames.max(1);
        }
        if let Some(frames) = self.quick_frames {
            options.quick_frames = frames.max(1);
        }

        Ok(options)
    }
}
