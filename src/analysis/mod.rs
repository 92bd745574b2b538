// Analysis algorithms: pivot detection, timing, trajectory, and fusion
pub mod combiner;
pub mod pivot_detection;
pub mod timing;
pub mod trajectory;

// Re-export commonly used types
pub use combiner::{CombinedVerdict, Confidence, PivotVerdict, combine};
pub use pivot_detection::{DetectedPivots, detect_pivots, pivot_events};
pub use timing::{WavelengthStats, wavelength_timing};
pub use trajectory::{
    AlignmentResult, TrajectoryReport, TrendDirection, fit_pivot_trendline, trajectory_alignment,
};

use std::collections::HashMap;

use strum::IntoEnumIterator;

use crate::config::AnalysisConfig;
use crate::domain::{BarSeries, PivotEvent, PivotPolarity};
use crate::error::Result;

/// End-to-end evaluation for one polarity at the most recent bar: detect
/// pivots over the whole series, score timing and trajectory, and fuse them.
/// Pure function of (series, config).
pub fn evaluate_pivot_probability(
    series: &BarSeries,
    polarity: PivotPolarity,
    config: &AnalysisConfig,
) -> Result<PivotVerdict> {
    config.validate()?;

    let Some(evaluation_bar) = series.last_position() else {
        return Ok(PivotVerdict::InsufficientData);
    };

    let pivots = pivot_events(series, &config.detector)?;
    let report = trajectory_alignment(
        &pivots,
        evaluation_bar,
        series.highs()[evaluation_bar],
        series.lows()[evaluation_bar],
        &config.trajectory,
    )?;

    let positions = polarity_positions(&pivots, polarity);
    let timing = wavelength_timing(&positions, evaluation_bar)?;

    Ok(combine(timing.as_ref(), &report, polarity, &config.combiner))
}

/// Evaluate both polarities off one shared detection pass.
pub fn evaluate_all_polarities(
    series: &BarSeries,
    config: &AnalysisConfig,
) -> Result<HashMap<PivotPolarity, PivotVerdict>> {
    config.validate()?;

    let Some(evaluation_bar) = series.last_position() else {
        return Ok(PivotPolarity::iter()
            .map(|polarity| (polarity, PivotVerdict::InsufficientData))
            .collect());
    };

    let pivots = pivot_events(series, &config.detector)?;
    let report = trajectory_alignment(
        &pivots,
        evaluation_bar,
        series.highs()[evaluation_bar],
        series.lows()[evaluation_bar],
        &config.trajectory,
    )?;

    let mut verdicts = HashMap::new();
    for polarity in PivotPolarity::iter() {
        let positions = polarity_positions(&pivots, polarity);
        let timing = wavelength_timing(&positions, evaluation_bar)?;
        verdicts.insert(
            polarity,
            combine(timing.as_ref(), &report, polarity, &config.combiner),
        );
    }
    Ok(verdicts)
}

fn polarity_positions(pivots: &[PivotEvent], polarity: PivotPolarity) -> Vec<usize> {
    pivots
        .iter()
        .filter(|pivot| pivot.polarity == polarity)
        .map(|pivot| pivot.position)
        .collect()
}
