use std::path::PathBuf;

use clap::ValueEnum;

/// A benchmark program found by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkEntry {
    /// File name, used as the display name in the report.
    pub name: String,
    /// Absolute path handed to the interpreter.
    pub path: PathBuf,
}

/// Elapsed seconds reported by a single interpreter run.
pub type TimingSample = f64;

/// Best-of-N outcome for one benchmark.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    pub name: String,
    /// Minimum sample, rounded to four decimal places.
    pub time: f64,
    pub samples: Vec<TimingSample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}
