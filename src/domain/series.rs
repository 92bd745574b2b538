use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Raw bar data for one instrument, indexed by bar position (0..len, no gaps).
///
/// Construction validates the invariants the analysis layer relies on: all
/// three price vectors have equal length and every value is finite. A
/// malformed series cannot exist past `new`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BarSeries {
    high_prices: Vec<f64>,
    low_prices: Vec<f64>,
    close_prices: Vec<f64>,
}

impl BarSeries {
    pub fn new(high_prices: Vec<f64>, low_prices: Vec<f64>, close_prices: Vec<f64>) -> Result<Self> {
        if high_prices.len() != low_prices.len() || high_prices.len() != close_prices.len() {
            return Err(AnalysisError::MismatchedLengths {
                high: high_prices.len(),
                low: low_prices.len(),
                close: close_prices.len(),
            });
        }

        for (field, values) in [
            ("high", &high_prices),
            ("low", &low_prices),
            ("close", &close_prices),
        ] {
            if let Some(position) = values.iter().position(|v| !v.is_finite()) {
                return Err(AnalysisError::NonFiniteValue { field, position });
            }
        }

        Ok(Self {
            high_prices,
            low_prices,
            close_prices,
        })
    }

    pub fn len(&self) -> usize {
        self.high_prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high_prices.is_empty()
    }

    pub fn highs(&self) -> &[f64] {
        &self.high_prices
    }

    pub fn lows(&self) -> &[f64] {
        &self.low_prices
    }

    pub fn closes(&self) -> &[f64] {
        &self.close_prices
    }

    /// Index of the most recent bar, if any. This is the default evaluation
    /// bar for "is a pivot imminent right now" questions.
    pub fn last_position(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_mismatched_lengths() {
        let err = BarSeries::new(vec![1.0, 2.0], vec![0.5], vec![0.8, 1.5]).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::MismatchedLengths {
                high: 2,
                low: 1,
                close: 2
            }
        );
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let err = BarSeries::new(
            vec![1.0, 2.0],
            vec![0.5, f64::NAN],
            vec![0.8, 1.5],
        )
        .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NonFiniteValue {
                field: "low",
                position: 1
            }
        );

        let err = BarSeries::new(vec![1.0, f64::INFINITY], vec![0.5, 0.6], vec![0.8, 1.5])
            .unwrap_err();
        assert_eq!(
            err,
            AnalysisError::NonFiniteValue {
                field: "high",
                position: 1
            }
        );
    }

    #[test]
    fn test_accepts_well_formed_series() {
        let series = BarSeries::new(vec![2.0, 3.0], vec![1.0, 2.0], vec![1.5, 2.5]).unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last_position(), Some(1));
    }

    #[test]
    fn test_empty_series_has_no_last_position() {
        let series = BarSeries::new(vec![], vec![], vec![]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.last_position(), None);
    }
}
