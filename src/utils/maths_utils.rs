use argminmax::ArgMinMax;

/// An ordinary least-squares line fit of price on bar position.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, 1.0 for a perfect (or degenerate
    /// zero-variance) fit
    pub r_squared: f64,
}

impl TrendFit {
    /// Projected value of the fitted line at `position`.
    pub fn project(&self, position: usize) -> f64 {
        self.slope * position as f64 + self.intercept
    }
}

/// Least-squares fit of `ys` on `xs`. Returns `None` for fewer than 2 points
/// or when every x is identical (vertical line, slope undefined).
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<TrendFit> {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len() as f64;
    if xs.len() < 2 {
        return None;
    }

    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_xx: f64 = xs.iter().map(|x| x * x).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    // r^2 = 1 - SS_res / SS_tot; a zero-variance y means the fit is exact
    let mean_y = sum_y / n;
    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let predicted = slope * x + intercept;
        ss_tot += (y - mean_y).powi(2);
        ss_res += (y - predicted).powi(2);
    }
    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(TrendFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Fraction of `values` less than or equal to `threshold`, as 0-100.
pub fn percentile_rank(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let at_or_below = values.iter().filter(|&&v| v <= threshold).count();
    at_or_below as f64 / values.len() as f64 * 100.0
}

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_collinear_points_fit_exactly() {
        let fit = linear_fit(&[20.0, 40.0], &[100.0, 102.0]).unwrap();
        assert_eq!(fit.slope, 0.1, "two-point slope must be exact");
        assert_eq!(fit.intercept, 98.0);
        assert_eq!(fit.r_squared, 1.0);
        assert_eq!(fit.project(60), 104.0);
    }

    #[test]
    fn test_noisy_fit_has_r_squared_below_one() {
        let xs = [0.0, 1.0, 2.0, 3.0];
        let ys = [0.0, 1.2, 1.8, 3.1];
        let fit = linear_fit(&xs, &ys).unwrap();
        assert!(fit.r_squared > 0.9 && fit.r_squared < 1.0);
        assert!(fit.slope > 0.0);
    }

    #[test]
    fn test_flat_values_are_a_perfect_fit() {
        let fit = linear_fit(&[0.0, 1.0, 2.0], &[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_degenerate_fits_return_none() {
        assert!(linear_fit(&[1.0], &[2.0]).is_none(), "single point");
        assert!(
            linear_fit(&[3.0, 3.0], &[1.0, 2.0]).is_none(),
            "identical x values"
        );
    }

    #[test]
    fn test_percentile_rank_bounds() {
        let values = [5.0, 10.0, 15.0];
        assert_eq!(percentile_rank(&values, 4.0), 0.0);
        assert_eq!(percentile_rank(&values, 10.0), 100.0 * 2.0 / 3.0);
        assert_eq!(percentile_rank(&values, 20.0), 100.0);
        assert_eq!(percentile_rank(&[], 1.0), 0.0);
    }

    #[test]
    fn test_slice_extrema() {
        let values = [3.0, 1.0, 4.0, 1.5];
        assert_eq!(get_max(&values), 4.0);
        assert_eq!(get_min(&values), 1.0);
    }
}
