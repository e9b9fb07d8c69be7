//! Reduction of raw measurement samples into summary statistics.
//!
//! Zero-valued samples mean "not observed yet" on the emitter service, so they
//! never take part in a summary.

use crate::models::IntListSummary;

/// Summarizes `input`, ignoring every zero sample.
///
/// With nothing left after filtering the result is the all-zero summary
/// (`entries == 0`).
pub fn int_list_stats(input: &[u64]) -> IntListSummary {
    let mut samples: Vec<u64> = input.iter().copied().filter(|&x| x != 0).collect();
    if samples.is_empty() {
        return IntListSummary::default();
    }
    samples.sort_unstable();

    let entries = samples.len();
    let sum: u128 = samples.iter().map(|&x| x as u128).sum();
    let mid = entries / 2;
    let median = if entries % 2 == 0 {
        (samples[mid - 1] as f64 + samples[mid] as f64) / 2.0
    } else {
        samples[mid] as f64
    };

    IntListSummary {
        min: samples[0],
        max: samples[entries - 1],
        mean: sum as f64 / entries as f64,
        median,
        entries,
    }
}

/// `true` when `a` and `b` differ by at most `pct` of the larger of the two.
pub fn int_similar_percentage(a: u64, b: u64, pct: f64) -> bool {
    let diff = a.abs_diff(b) as f64;
    diff <= a.max(b) as f64 * pct
}
