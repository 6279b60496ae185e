use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::debug;

use crate::config::Config;
use crate::errors::LoxbenchError;
use crate::types::{BenchmarkEntry, TimingSample};

/// Outcome of one interpreter invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub success: bool,
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: Vec<u8>,
}

impl Execution {
    fn describe_status(&self) -> String {
        match self.status {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs the interpreter under test against a single benchmark file.
pub trait Executor {
    fn execute(&self, benchmark: &Path) -> io::Result<Execution>;
}

/// Spawns `<binary> <benchmark>` and blocks until it exits.
///
/// Stdout is captured in full, stderr is passed through. There is no timeout.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    binary: PathBuf,
}

impl ProcessExecutor {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Executor for ProcessExecutor {
    fn execute(&self, benchmark: &Path) -> io::Result<Execution> {
        let output = Command::new(&self.binary)
            .arg(benchmark)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()?;

        Ok(Execution {
            success: output.status.success(),
            status: output.status.code(),
            stdout: output.stdout,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TimingParseError {
    #[error("no output")]
    Empty,
    #[error("not a timing: {0:?}")]
    Invalid(String),
}

/// Last line of `text`, where `\n`, `\r\n` and a bare `\r` all end a line.
///
/// One trailing terminator does not start a new line; `None` for empty text.
fn last_line(text: &str) -> Option<&str> {
    if text.is_empty() {
        return None;
    }

    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);

    Some(match body.rfind(['\n', '\r']) {
        Some(idx) => &body[idx + 1..],
        None => body,
    })
}

/// Parse the self-reported elapsed seconds from the last line of `stdout`.
///
/// Only the final line counts; everything before it is ignored. Surrounding
/// whitespace is trimmed. Negative and non-finite values are rejected.
pub fn parse_timing(stdout: &[u8]) -> Result<TimingSample, TimingParseError> {
    let text = String::from_utf8_lossy(stdout);
    let last = last_line(&text).ok_or(TimingParseError::Empty)?;
    let trimmed = last.trim();

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(TimingParseError::Invalid(trimmed.to_string())),
    }
}

/// Collects repeated timing samples for a benchmark.
pub struct Runner<E> {
    executor: E,
    runs: usize,
    cooldown: Duration,
}

impl Runner<ProcessExecutor> {
    pub fn from_config(config: &Config) -> Self {
        Runner::new(
            ProcessExecutor::new(&config.binary),
            config.runs,
            config.cooldown,
        )
    }
}

impl<E: Executor> Runner<E> {
    pub fn new(executor: E, runs: usize, cooldown: Duration) -> Self {
        Self {
            executor,
            runs,
            cooldown,
        }
    }

    pub fn runs(&self) -> usize {
        self.runs
    }

    /// Run `entry` `runs` times in sequence and return one sample per run.
    ///
    /// Sleeps for the cooldown between consecutive runs. The first failed run
    /// aborts the whole pass: nothing is retried or skipped.
    pub fn sample(&self, entry: &BenchmarkEntry) -> Result<Vec<TimingSample>, LoxbenchError> {
        let mut samples = Vec::with_capacity(self.runs);

        for run in 1..=self.runs {
            if run > 1 && !self.cooldown.is_zero() {
                std::thread::sleep(self.cooldown);
            }

            debug!(benchmark = %entry.name, run, "spawning interpreter");

            let execution =
                self.executor
                    .execute(&entry.path)
                    .map_err(|source| LoxbenchError::Spawn {
                        benchmark: entry.name.clone(),
                        source,
                    })?;

            if !execution.success {
                return Err(LoxbenchError::ExecutionFailed {
                    benchmark: entry.name.clone(),
                    run,
                    status: execution.describe_status(),
                });
            }

            let sample = parse_timing(&execution.stdout).map_err(|err| match err {
                TimingParseError::Empty => LoxbenchError::MissingTiming {
                    benchmark: entry.name.clone(),
                    run,
                },
                TimingParseError::Invalid(line) => LoxbenchError::InvalidTiming {
                    benchmark: entry.name.clone(),
                    run,
                    line,
                },
            })?;

            debug!(benchmark = %entry.name, run, seconds = sample, "sample collected");
            samples.push(sample);
        }

        Ok(samples)
    }
}
