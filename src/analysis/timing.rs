//! Wavelength timing: how "due" a series is for its next same-polarity pivot,
//! judged against the historical distribution of gaps between pivots.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};

use crate::error::{AnalysisError, Result};

/// How many recent gaps are kept for diagnostic context
const RECENT_WAVELENGTH_COUNT: usize = 5;

/// Distribution of historical pivot spacing plus where the evaluation bar
/// sits within it. Undefined (absent) below 3 pivots; callers must treat
/// absence as "no timing opinion", never as zero probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavelengthStats {
    /// Mean gap between consecutive same-polarity pivots, in bars
    pub avg: f64,
    /// Population standard deviation of the gaps (0.0 for a single gap)
    pub std_dev: f64,
    pub median: f64,
    /// Bars elapsed from the last pivot to the evaluation bar
    pub current_distance: usize,
    /// Standard deviations from the mean gap; 0.0 when the gaps have no
    /// spread at all
    pub z_score: f64,
    /// Share of historical gaps not exceeding the current distance, 0-100
    pub percentile: f64,
    /// Rank-based probability estimate in [0, 1]: fraction of gaps at or
    /// below the current distance, saturating at 1
    pub timing_probability: f64,
    /// Bars left until the mean gap is reached, floored at 0
    pub bars_until_avg: f64,
    /// The most recent gaps, oldest first, for context
    pub recent_wavelengths: Vec<usize>,
}

/// Score timing for one polarity given its ascending pivot positions and the
/// bar under evaluation (at or after the last pivot; the gap to it is still
/// "open").
///
/// Returns `Ok(None)` when fewer than 3 pivots exist — two gaps are the
/// minimum that describes a distribution.
pub fn wavelength_timing(
    positions: &[usize],
    evaluation_bar: usize,
) -> Result<Option<WavelengthStats>> {
    debug_assert!(
        positions.windows(2).all(|pair| pair[0] < pair[1]),
        "pivot positions must be strictly ascending"
    );

    if positions.len() < 3 {
        log::debug!(
            "{} pivot(s): not enough history for a timing opinion",
            positions.len()
        );
        return Ok(None);
    }

    let last_pivot = positions[positions.len() - 1];
    if evaluation_bar < last_pivot {
        return Err(AnalysisError::EvaluationBarBeforePivot {
            evaluation_bar,
            last_pivot,
        });
    }

    let gaps: Vec<usize> = positions
        .iter()
        .tuple_windows()
        .map(|(a, b)| b - a)
        .collect();
    let gaps_f64: Vec<f64> = gaps.iter().map(|&g| g as f64).collect();

    let avg = gaps_f64.iter().mean();
    let std_dev = gaps_f64.iter().population_std_dev();
    let mut ordered = Data::new(gaps_f64.clone());
    let median = ordered.median();

    let current_distance = evaluation_bar - last_pivot;
    let z_score = if std_dev > 0.0 {
        (current_distance as f64 - avg) / std_dev
    } else {
        0.0
    };

    let percentile = crate::utils::maths_utils::percentile_rank(&gaps_f64, current_distance as f64);
    let timing_probability = (percentile / 100.0).min(1.0);
    let bars_until_avg = (avg - current_distance as f64).max(0.0);

    let recent_start = gaps.len().saturating_sub(RECENT_WAVELENGTH_COUNT);
    let recent_wavelengths = gaps[recent_start..].to_vec();

    Ok(Some(WavelengthStats {
        avg,
        std_dev,
        median,
        current_distance,
        z_score,
        percentile,
        timing_probability,
        bars_until_avg,
        recent_wavelengths,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_below_three_pivots() {
        assert!(wavelength_timing(&[], 50).unwrap().is_none());
        assert!(wavelength_timing(&[10], 50).unwrap().is_none());
        assert!(wavelength_timing(&[10, 20], 50).unwrap().is_none());
    }

    #[test]
    fn test_uniform_gaps_at_average_distance() {
        // 4 pivots, gaps [10, 10, 10], evaluated 10 bars after the last
        let stats = wavelength_timing(&[10, 20, 30, 40], 50).unwrap().unwrap();
        assert_eq!(stats.avg, 10.0);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.median, 10.0);
        assert_eq!(stats.current_distance, 10);
        assert_eq!(stats.z_score, 0.0, "zero spread must not divide by zero");
        assert_eq!(stats.percentile, 100.0);
        assert_eq!(stats.timing_probability, 1.0);
        assert_eq!(stats.bars_until_avg, 0.0);
        assert_eq!(stats.recent_wavelengths, vec![10, 10, 10]);
    }

    #[test]
    fn test_early_evaluation_scores_low() {
        // Gaps [9, 11, 10], evaluated only 3 bars after the last pivot
        let stats = wavelength_timing(&[0, 9, 20, 30], 33).unwrap().unwrap();
        assert_eq!(stats.current_distance, 3);
        assert_eq!(stats.percentile, 0.0, "no historical gap is that short");
        assert_eq!(stats.timing_probability, 0.0);
        assert_eq!(stats.bars_until_avg, 7.0);
        assert!(stats.z_score < 0.0);
    }

    #[test]
    fn test_percentile_counts_gaps_at_or_below_distance() {
        // Gaps [5, 10, 15]; distance 10 covers two of three
        let stats = wavelength_timing(&[0, 5, 15, 30], 40).unwrap().unwrap();
        assert_eq!(stats.current_distance, 10);
        assert!((stats.percentile - 200.0 / 3.0).abs() < 1e-12);
        assert!((stats.timing_probability - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.avg, 10.0);
        assert_eq!(stats.median, 10.0);
        assert!(stats.std_dev > 0.0);
        assert_eq!(stats.z_score, 0.0, "distance equals the mean gap");
    }

    #[test]
    fn test_probability_saturates_past_longest_gap() {
        let stats = wavelength_timing(&[0, 8, 20, 27], 90).unwrap().unwrap();
        assert_eq!(stats.percentile, 100.0);
        assert_eq!(stats.timing_probability, 1.0);
        assert!(stats.z_score > 0.0);
        assert_eq!(stats.bars_until_avg, 0.0);
    }

    #[test]
    fn test_recent_wavelengths_cap_at_five() {
        let positions: Vec<usize> = (0..10).map(|i| i * 7).collect();
        let stats = wavelength_timing(&positions, 70).unwrap().unwrap();
        assert_eq!(stats.recent_wavelengths, vec![7, 7, 7, 7, 7]);
    }

    #[test]
    fn test_evaluation_before_last_pivot_is_an_error() {
        let err = wavelength_timing(&[10, 20, 30], 25).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::EvaluationBarBeforePivot {
                evaluation_bar: 25,
                last_pivot: 30
            }
        );
    }
}
