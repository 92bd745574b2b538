//! Trajectory alignment: fit a trend line through recent same-polarity pivots
//! and score how closely the evaluation bar's price tracks its projection.

use serde::{Deserialize, Serialize};

use crate::config::TrajectorySettings;
use crate::domain::{PivotEvent, PivotPolarity};
use crate::error::Result;
use crate::utils::maths_utils::{TrendFit, linear_fit};

/// Sign of the fitted slope. A perfectly flat line counts as descending:
/// the classification is a strict `> 0` test, kept as-is from the reference
/// behavior (see DESIGN.md).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Ascending,
    Descending,
}

/// How well the evaluation bar's price matches the pivot trend line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentResult {
    pub slope: f64,
    pub r_squared: f64,
    /// Trend-line value at the evaluation bar
    pub projected_price: f64,
    /// The bar's high (swing-high polarity) or low (swing-low polarity)
    pub observed_price: f64,
    /// |observed - projected| as a percentage of the projection
    pub deviation_pct: f64,
    /// deviation_pct within tolerance
    pub aligned: bool,
    pub trend_direction: TrendDirection,
    /// r_squared scaled down linearly as the deviation approaches tolerance,
    /// 0 at or beyond it. Fit quality and price proximity multiply: a perfect
    /// fit far off the line scores 0, a poor fit scores low even dead on it.
    pub alignment_score: f64,
}

/// Per-polarity alignment for one evaluation bar. A polarity with fewer than
/// 2 pivots in the window (or a non-positive projection) is simply absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrajectoryReport {
    pub swing_high: Option<AlignmentResult>,
    pub swing_low: Option<AlignmentResult>,
}

impl TrajectoryReport {
    pub fn get(&self, polarity: PivotPolarity) -> Option<&AlignmentResult> {
        match polarity {
            PivotPolarity::High => self.swing_high.as_ref(),
            PivotPolarity::Low => self.swing_low.as_ref(),
        }
    }
}

/// Least-squares trend line through the last `lookback` pivots of the given
/// polarity. `None` below 2 such pivots.
pub fn fit_pivot_trendline(
    pivots: &[PivotEvent],
    polarity: PivotPolarity,
    lookback: usize,
) -> Option<TrendFit> {
    let filtered: Vec<&PivotEvent> = pivots
        .iter()
        .filter(|pivot| pivot.polarity == polarity)
        .collect();
    let window = &filtered[filtered.len().saturating_sub(lookback)..];
    if window.len() < 2 {
        return None;
    }

    let xs: Vec<f64> = window.iter().map(|pivot| pivot.position as f64).collect();
    let ys: Vec<f64> = window.iter().map(|pivot| pivot.price).collect();
    linear_fit(&xs, &ys)
}

/// Score both polarities' alignment at the evaluation bar. `bar_high` is
/// compared against the swing-high trend line, `bar_low` against the
/// swing-low one.
pub fn trajectory_alignment(
    pivots: &[PivotEvent],
    evaluation_bar: usize,
    bar_high: f64,
    bar_low: f64,
    settings: &TrajectorySettings,
) -> Result<TrajectoryReport> {
    settings.validate()?;
    Ok(TrajectoryReport {
        swing_high: align_polarity(pivots, PivotPolarity::High, evaluation_bar, bar_high, settings),
        swing_low: align_polarity(pivots, PivotPolarity::Low, evaluation_bar, bar_low, settings),
    })
}

fn align_polarity(
    pivots: &[PivotEvent],
    polarity: PivotPolarity,
    evaluation_bar: usize,
    observed_price: f64,
    settings: &TrajectorySettings,
) -> Option<AlignmentResult> {
    let fit = fit_pivot_trendline(pivots, polarity, settings.lookback_window)?;

    // A non-positive projection has no meaningful percentage deviation: a
    // zero denominator is undefined and a negative one flips the sign of
    // deviation_pct, which would push the alignment score past r².
    let projected_price = fit.project(evaluation_bar);
    if projected_price <= 0.0 {
        log::warn!(
            "{polarity} trend projects to {projected_price} at bar {evaluation_bar}, not alignable"
        );
        return None;
    }

    let deviation_pct = (observed_price - projected_price).abs() / projected_price * 100.0;
    let aligned = deviation_pct <= settings.tolerance_pct;
    let alignment_score = if deviation_pct >= settings.tolerance_pct {
        0.0
    } else {
        fit.r_squared * (1.0 - deviation_pct / settings.tolerance_pct)
    };

    let trend_direction = if fit.slope > 0.0 {
        TrendDirection::Ascending
    } else {
        TrendDirection::Descending
    };

    Some(AlignmentResult {
        slope: fit.slope,
        r_squared: fit.r_squared,
        projected_price,
        observed_price,
        deviation_pct,
        aligned,
        trend_direction,
        alignment_score,
    })
}
