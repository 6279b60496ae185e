use std::io::Write;

use tracing::info;

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::discover::discover_benchmarks;
use crate::errors::LoxbenchError;
use crate::report::Reporter;
use crate::runner::{Executor, Runner};

/// Run every discovered benchmark in order and stream its result.
///
/// Stops at the first failure; results already reported stay written.
/// Returns the number of benchmarks reported.
pub fn run_suite<E: Executor, W: Write>(
    config: &Config,
    runner: &Runner<E>,
    reporter: &mut Reporter<W>,
) -> Result<usize, LoxbenchError> {
    let benchmarks = discover_benchmarks(&config.benchmark_dir, &config.extension);
    info!(
        count = benchmarks.len(),
        dir = %config.benchmark_dir.display(),
        runs = runner.runs(),
        "discovered benchmarks"
    );

    for entry in &benchmarks {
        let samples = runner.sample(entry)?;
        let result = aggregate(&entry.name, samples);
        info!(benchmark = %result.name, best = result.time, "benchmark finished");
        reporter.report(&result)?;
    }

    Ok(benchmarks.len())
}
