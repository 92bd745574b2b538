//! Evidence fusion: blends the timing and trajectory analyzers into a single
//! probability with a coarse confidence label.

use serde::{Deserialize, Serialize};

use crate::analysis::timing::WavelengthStats;
use crate::analysis::trajectory::TrajectoryReport;
use crate::config::CombinerSettings;
use crate::domain::PivotPolarity;

/// Fit quality / timing thresholds for the confidence label, checked
/// high-before-medium.
const HIGH_CONFIDENCE_R_SQUARED: f64 = 0.8;
const HIGH_CONFIDENCE_TIMING: f64 = 0.6;
const MEDIUM_CONFIDENCE_R_SQUARED: f64 = 0.5;
const MEDIUM_CONFIDENCE_TIMING: f64 = 0.4;

pub const INSUFFICIENT_DATA_REASON: &str = "insufficient data";

/// How much the underlying statistics support the probability.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// A fused verdict for one polarity at one evaluation bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedVerdict {
    /// Weighted blend of the two contributions, in [0, 1] for weights
    /// summing to 1
    pub probability: f64,
    pub confidence: Confidence,
    /// Raw timing probability that went into the blend
    pub timing_contribution: f64,
    /// Raw alignment score that went into the blend
    pub trajectory_contribution: f64,
    pub r_squared: f64,
    pub aligned: bool,
    pub projected_price: f64,
}

/// Outcome of combining: either a real estimate, or an explicit marker that
/// one of the two signals had no opinion. The marker reads as probability 0 /
/// confidence low but is never confused with a genuine low-probability,
/// well-supported estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PivotVerdict {
    InsufficientData,
    Estimate(CombinedVerdict),
}

impl PivotVerdict {
    pub fn probability(&self) -> f64 {
        match self {
            PivotVerdict::InsufficientData => 0.0,
            PivotVerdict::Estimate(verdict) => verdict.probability,
        }
    }

    pub fn confidence(&self) -> Confidence {
        match self {
            PivotVerdict::InsufficientData => Confidence::Low,
            PivotVerdict::Estimate(verdict) => verdict.confidence,
        }
    }

    /// `Some("insufficient data")` for the marker outcome, `None` for a real
    /// estimate.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            PivotVerdict::InsufficientData => Some(INSUFFICIENT_DATA_REASON),
            PivotVerdict::Estimate(_) => None,
        }
    }

    pub fn estimate(&self) -> Option<&CombinedVerdict> {
        match self {
            PivotVerdict::InsufficientData => None,
            PivotVerdict::Estimate(verdict) => Some(verdict),
        }
    }
}

/// Fuse the timing result (absent below 3 pivots) with the requested
/// polarity's trajectory alignment (absent below 2 pivots in the window).
pub fn combine(
    timing: Option<&WavelengthStats>,
    report: &TrajectoryReport,
    polarity: PivotPolarity,
    settings: &CombinerSettings,
) -> PivotVerdict {
    let (Some(timing), Some(alignment)) = (timing, report.get(polarity)) else {
        log::debug!("no {polarity} verdict: one of the analyzers had no opinion");
        return PivotVerdict::InsufficientData;
    };

    let probability = settings.timing_weight * timing.timing_probability
        + settings.trajectory_weight * alignment.alignment_score;

    let confidence = if alignment.r_squared > HIGH_CONFIDENCE_R_SQUARED
        && timing.timing_probability > HIGH_CONFIDENCE_TIMING
    {
        Confidence::High
    } else if alignment.r_squared > MEDIUM_CONFIDENCE_R_SQUARED
        && timing.timing_probability > MEDIUM_CONFIDENCE_TIMING
    {
        Confidence::Medium
    } else {
        Confidence::Low
    };

    PivotVerdict::Estimate(CombinedVerdict {
        probability,
        confidence,
        timing_contribution: timing.timing_probability,
        trajectory_contribution: alignment.alignment_score,
        r_squared: alignment.r_squared,
        aligned: alignment.aligned,
        projected_price: alignment.projected_price,
    })
}
