//! Analysis and computation configuration

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Default minimum bar spacing between two accepted same-polarity pivots
pub const DEFAULT_MIN_DISTANCE: usize = 5;

/// Default trend-line lookback: number of recent same-polarity pivots fitted
pub const DEFAULT_LOOKBACK_WINDOW: usize = 5;

/// Default alignment tolerance (percent deviation from the projected price)
pub const DEFAULT_TOLERANCE_PCT: f64 = 0.5;

/// Default evidence weights. Trajectory confirmation is treated as the
/// stronger evidence, hence the heavier weight.
pub const DEFAULT_TIMING_WEIGHT: f64 = 0.4;
pub const DEFAULT_TRAJECTORY_WEIGHT: f64 = 0.6;

/// Settings for swing-pivot detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorSettings {
    /// Minimum bars between two accepted pivots of the same polarity
    pub min_distance: usize,
    /// Minimum vertical drop required on both sides of a candidate extremum
    /// before a higher point; `None` disables prominence filtering
    pub min_prominence: Option<f64>,
}

/// Settings for trajectory fitting and alignment scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrajectorySettings {
    /// How many recent same-polarity pivots the trend line is fitted through
    pub lookback_window: usize,
    /// Deviation (percent of projected price) at or beyond which the current
    /// bar no longer counts as aligned
    pub tolerance_pct: f64,
}

/// Evidence weights for the combined probability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinerSettings {
    pub timing_weight: f64,
    pub trajectory_weight: f64,
}

/// The master analysis configuration, passed explicitly to every evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub detector: DetectorSettings,
    pub trajectory: TrajectorySettings,
    pub combiner: CombinerSettings,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            min_prominence: None,
        }
    }
}

impl Default for TrajectorySettings {
    fn default() -> Self {
        Self {
            lookback_window: DEFAULT_LOOKBACK_WINDOW,
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
        }
    }
}

impl Default for CombinerSettings {
    fn default() -> Self {
        Self {
            timing_weight: DEFAULT_TIMING_WEIGHT,
            trajectory_weight: DEFAULT_TRAJECTORY_WEIGHT,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            detector: DetectorSettings::default(),
            trajectory: TrajectorySettings::default(),
            combiner: CombinerSettings::default(),
        }
    }
}

impl DetectorSettings {
    pub fn validate(&self) -> Result<()> {
        if self.min_distance == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "min_distance",
                reason: "must be at least 1 bar".to_string(),
            });
        }
        if let Some(prominence) = self.min_prominence
            && !(prominence >= 0.0 && prominence.is_finite())
        {
            return Err(AnalysisError::InvalidParameter {
                name: "min_prominence",
                reason: format!("must be finite and non-negative, got {prominence}"),
            });
        }
        Ok(())
    }
}

impl TrajectorySettings {
    pub fn validate(&self) -> Result<()> {
        if self.lookback_window == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "lookback_window",
                reason: "must be at least 1 pivot".to_string(),
            });
        }
        if !(self.tolerance_pct >= 0.0 && self.tolerance_pct.is_finite()) {
            return Err(AnalysisError::InvalidParameter {
                name: "tolerance_pct",
                reason: format!("must be finite and non-negative, got {}", self.tolerance_pct),
            });
        }
        Ok(())
    }
}

impl CombinerSettings {
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [
            ("timing_weight", self.timing_weight),
            ("trajectory_weight", self.trajectory_weight),
        ] {
            if !(weight >= 0.0 && weight.is_finite()) {
                return Err(AnalysisError::InvalidParameter {
                    name,
                    reason: format!("must be finite and non-negative, got {weight}"),
                });
            }
        }
        Ok(())
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        self.detector.validate()?;
        self.trajectory.validate()?;
        self.combiner.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_min_distance_rejected() {
        let mut config = AnalysisConfig::default();
        config.detector.min_distance = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidParameter {
                name: "min_distance",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let mut config = AnalysisConfig::default();
        config.trajectory.lookback_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_weight_rejected() {
        let mut config = AnalysisConfig::default();
        config.combiner.trajectory_weight = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_prominence_rejected() {
        let mut config = AnalysisConfig::default();
        config.detector.min_prominence = Some(-1.0);
        assert!(config.validate().is_err());
    }
}
