//! Configuration for the pivot-radar analysis core.

pub mod analysis;

// Re-export commonly used items
pub use analysis::{
    AnalysisConfig, CombinerSettings, DEFAULT_LOOKBACK_WINDOW, DEFAULT_MIN_DISTANCE,
    DEFAULT_TIMING_WEIGHT, DEFAULT_TOLERANCE_PCT, DEFAULT_TRAJECTORY_WEIGHT, DetectorSettings,
    TrajectorySettings,
};
