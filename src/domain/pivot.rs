use serde::{Deserialize, Serialize};

/// Which side of price action a pivot sits on.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum PivotPolarity {
    /// Local maximum of the high series (swing high)
    High,
    /// Local minimum of the low series (swing low)
    Low,
}

impl std::fmt::Display for PivotPolarity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PivotPolarity::High => write!(f, "swing high"),
            PivotPolarity::Low => write!(f, "swing low"),
        }
    }
}

/// A detected swing point. Same-polarity events are strictly ordered by
/// position with no duplicates; the full set is recomputed whenever new bars
/// arrive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotEvent {
    /// Bar index into the source series
    pub position: usize,
    /// High price at the bar for swing highs, low price for swing lows
    pub price: f64,
    pub polarity: PivotPolarity,
}

impl PivotEvent {
    pub fn new(position: usize, price: f64, polarity: PivotPolarity) -> Self {
        Self {
            position,
            price,
            polarity,
        }
    }

    pub fn is_high(&self) -> bool {
        self.polarity == PivotPolarity::High
    }
}
