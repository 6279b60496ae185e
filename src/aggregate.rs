use crate::types::{BenchmarkResult, TimingSample};

const REPORT_DECIMALS: usize = 4;

/// Round to `decimals` places, ties to even.
///
/// Goes through fixed-precision formatting so the exact binary value is
/// rounded; scaling by a power of ten first can turn a near-tie into a tie.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Smallest sample, or `None` when there are no samples.
pub fn best_of(samples: &[TimingSample]) -> Option<TimingSample> {
    samples.iter().copied().reduce(f64::min)
}

/// Reduce the samples of one benchmark to its reportable result.
///
/// The runner always produces at least one sample; an empty slice yields `NaN`.
pub fn aggregate(name: &str, samples: Vec<TimingSample>) -> BenchmarkResult {
    let time = best_of(&samples)
        .map(|best| round_to(best, REPORT_DECIMALS))
        .unwrap_or(f64::NAN);

    BenchmarkResult {
        name: name.to_string(),
        time,
        samples,
    }
}
