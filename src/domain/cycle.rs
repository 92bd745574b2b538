use serde::{Deserialize, Serialize};

/// Per-bar output of an external dominant-cycle transform (e.g. a Hilbert
/// period/phase extractor). The core never computes these four scalars; it
/// only consumes them across this boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CycleSnapshot {
    /// Estimated current cycle length in bars (> 0)
    pub dominant_period: f64,
    /// Position within the cycle, degrees in [0, 360)
    pub phase: f64,
    /// Sine-wave representation of the cycle
    pub sine: f64,
    /// Lead sine (sine advanced by 45 degrees)
    pub lead_sine: f64,
    /// Trend mode vs cycle mode flag from the upstream transform
    pub is_trending: bool,
}

impl CycleSnapshot {
    /// The cycle suggests a reversal when sine crosses lead-sine between two
    /// consecutive bars, in either direction.
    pub fn reversal_cross(prev: &CycleSnapshot, curr: &CycleSnapshot) -> bool {
        (prev.sine < prev.lead_sine) != (curr.sine < curr.lead_sine)
    }
}
