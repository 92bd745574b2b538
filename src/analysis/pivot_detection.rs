//! Swing-pivot detection over high/low price series.
//!
//! Swing highs are local maxima of the high series; swing lows are found by
//! running the same maxima search over the negated low series. Candidates are
//! filtered by optional prominence, then thinned so no two surviving pivots of
//! the same polarity sit closer than `min_distance` bars (the larger value
//! wins).

use serde::{Deserialize, Serialize};

use crate::config::DetectorSettings;
use crate::domain::{BarSeries, PivotEvent, PivotPolarity};
use crate::error::Result;
use crate::utils::maths_utils::get_min;

/// Ascending, duplicate-free pivot positions for both polarities.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectedPivots {
    pub highs: Vec<usize>,
    pub lows: Vec<usize>,
}

/// Detect swing highs and swing lows in `series`.
///
/// A series shorter than `2 * min_distance + 1` bars cannot host a pivot that
/// respects the spacing constraint, so it yields empty sequences rather than
/// an error.
pub fn detect_pivots(series: &BarSeries, settings: &DetectorSettings) -> Result<DetectedPivots> {
    settings.validate()?;

    if series.len() < 2 * settings.min_distance + 1 {
        log::debug!(
            "series of {} bars too short for min_distance {}, no pivots",
            series.len(),
            settings.min_distance
        );
        return Ok(DetectedPivots::default());
    }

    let negated_lows: Vec<f64> = series.lows().iter().map(|v| -v).collect();
    Ok(DetectedPivots {
        highs: find_swing_points(series.highs(), settings),
        lows: find_swing_points(&negated_lows, settings),
    })
}

/// Detect pivots and return them as one event list sorted by position, swing
/// highs carrying the bar's high price and swing lows the bar's low price.
/// At a bar that is both polarities at once, the high comes first.
pub fn pivot_events(series: &BarSeries, settings: &DetectorSettings) -> Result<Vec<PivotEvent>> {
    let detected = detect_pivots(series, settings)?;

    let mut events: Vec<PivotEvent> = detected
        .highs
        .iter()
        .map(|&i| PivotEvent::new(i, series.highs()[i], PivotPolarity::High))
        .chain(
            detected
                .lows
                .iter()
                .map(|&i| PivotEvent::new(i, series.lows()[i], PivotPolarity::Low)),
        )
        .collect();
    events.sort_by_key(|event| event.position);
    Ok(events)
}

fn find_swing_points(values: &[f64], settings: &DetectorSettings) -> Vec<usize> {
    let mut candidates = local_maxima(values);

    if let Some(min_prominence) = settings.min_prominence {
        candidates.retain(|&peak| prominence(values, peak) >= min_prominence);
    }

    enforce_min_distance(&candidates, values, settings.min_distance)
}

/// Positions of interior local maxima. A candidate needs a strict rise into
/// it and a strict drop after its plateau; a plateau keeps its first index.
/// Series endpoints are never candidates.
fn local_maxima(values: &[f64]) -> Vec<usize> {
    let n = values.len();
    let mut maxima = Vec::new();
    if n < 3 {
        return maxima;
    }

    let mut i = 1;
    while i < n - 1 {
        if values[i - 1] < values[i] {
            // Skip over any plateau of equal values
            let mut ahead = i + 1;
            while ahead < n - 1 && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                maxima.push(i);
            }
            i = ahead;
        } else {
            i += 1;
        }
    }
    maxima
}

/// Topographic prominence of the candidate at `peak`: its height minus the
/// higher of the two base minima, each taken over the span out to the first
/// strictly higher value (or the series edge) on that side.
fn prominence(values: &[f64], peak: usize) -> f64 {
    let peak_value = values[peak];
    let n = values.len();

    let mut left_boundary = 0;
    for i in (0..peak).rev() {
        if values[i] > peak_value {
            left_boundary = i + 1;
            break;
        }
    }
    let left_min = get_min(&values[left_boundary..peak]);

    let mut right_boundary = n;
    for (i, value) in values.iter().enumerate().skip(peak + 1) {
        if *value > peak_value {
            right_boundary = i;
            break;
        }
    }
    let right_min = get_min(&values[peak + 1..right_boundary]);

    peak_value - left_min.max(right_min)
}

/// Greedy highest-value-first thinning: every candidate strictly closer than
/// `min_distance` bars to an already-kept higher candidate is dropped.
/// Candidates exactly `min_distance` apart both survive.
fn enforce_min_distance(candidates: &[usize], values: &[f64], min_distance: usize) -> Vec<usize> {
    let count = candidates.len();
    let mut keep = vec![true; count];

    let mut by_height: Vec<usize> = (0..count).collect();
    by_height.sort_by(|&a, &b| values[candidates[a]].total_cmp(&values[candidates[b]]));

    for &current in by_height.iter().rev() {
        if !keep[current] {
            continue;
        }
        for neighbor in (0..current).rev() {
            if candidates[current] - candidates[neighbor] >= min_distance {
                break;
            }
            keep[neighbor] = false;
        }
        for neighbor in current + 1..count {
            if candidates[neighbor] - candidates[current] >= min_distance {
                break;
            }
            keep[neighbor] = false;
        }
    }

    candidates
        .iter()
        .zip(&keep)
        .filter(|&(_, &kept)| kept)
        .map(|(&position, _)| position)
        .collect()
}
