//! Swing-pivot probability estimation.
//!
//! Two independent signals are fused per polarity (swing high / swing low):
//! timing — bars elapsed since the last pivot, ranked against the historical
//! gap distribution — and trajectory — how closely the current bar's price
//! tracks a trend line fitted through recent pivots of that polarity. The
//! combined verdict is a descriptive alignment score with a coarse confidence
//! label, not a forecast.

// Core modules
pub mod analysis;
pub mod config;
pub mod domain;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use analysis::{
    AlignmentResult, CombinedVerdict, Confidence, DetectedPivots, PivotVerdict, TrajectoryReport,
    TrendDirection, WavelengthStats, combine, detect_pivots, evaluate_all_polarities,
    evaluate_pivot_probability, fit_pivot_trendline, pivot_events, trajectory_alignment,
    wavelength_timing,
};
pub use config::{AnalysisConfig, CombinerSettings, DetectorSettings, TrajectorySettings};
pub use domain::{BarSeries, CycleSnapshot, PivotEvent, PivotPolarity};
pub use error::{AnalysisError, Result};
pub use utils::TrendFit;
