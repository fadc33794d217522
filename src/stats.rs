//! Summary statistics used by axes and statistical series.
//!
//! Reductions go through trueno so large series (histograms over thousands
//! of samples) use the SIMD backend selected at runtime.

use trueno::Vector;

/// Finite values of `data`, in order.
fn finite(data: &[f32]) -> Vec<f32> {
    data.iter().copied().filter(|v| v.is_finite()).collect()
}

/// `(min, max)` of the finite values, or `None` when there are none.
#[must_use]
pub fn extent(data: &[f32]) -> Option<(f32, f32)> {
    let values = finite(data);
    if values.is_empty() {
        return None;
    }

    let vec = Vector::from_slice(&values);
    let min = vec.min().unwrap_or(f32::NAN);
    let max = vec.max().unwrap_or(f32::NAN);

    if min.is_finite() && max.is_finite() {
        Some((min, max))
    } else {
        None
    }
}

/// Mean of the finite values.
#[must_use]
pub fn mean(data: &[f32]) -> Option<f32> {
    let values = finite(data);
    if values.is_empty() {
        return None;
    }
    let m = Vector::from_slice(&values).mean().unwrap_or(f32::NAN);
    m.is_finite().then_some(m)
}

/// Sample standard deviation of the finite values.
#[must_use]
pub fn std_dev(data: &[f32]) -> Option<f32> {
    let values = finite(data);
    if values.len() < 2 {
        return None;
    }
    let m = mean(&values)?;
    let variance =
        values.iter().map(|x| (x - m).powi(2)).sum::<f32>() / (values.len() - 1) as f32;
    Some(variance.sqrt())
}

/// Sorted copy of the finite values.
#[must_use]
pub fn sorted_finite(data: &[f32]) -> Vec<f32> {
    let mut sorted = finite(data);
    sorted.sort_by(f32::total_cmp);
    sorted
}

/// Percentile (0-100) of already sorted data using linear interpolation.
#[must_use]
pub fn percentile(sorted: &[f32], p: f32) -> f32 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let k = (p / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f32;
    let f = k.floor() as usize;
    let c = k.ceil() as usize;

    if f == c || c >= sorted.len() {
        sorted[f.min(sorted.len() - 1)]
    } else {
        let d = k - f as f32;
        sorted[f] * (1.0 - d) + sorted[c] * d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extent_ignores_non_finite() {
        assert_eq!(extent(&[3.0, f32::NAN, -2.0, f32::INFINITY, 7.5]), Some((-2.0, 7.5)));
    }

    #[test]
    fn test_extent_empty() {
        assert_eq!(extent(&[]), None);
        assert_eq!(extent(&[f32::NAN]), None);
    }

    #[test]
    fn test_mean_and_std() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data).unwrap(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(std_dev(&data).unwrap(), 2.138_09, epsilon = 1e-4);
    }

    #[test]
    fn test_std_dev_needs_two_values() {
        assert_eq!(std_dev(&[1.0]), None);
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = sorted_finite(&[4.0, 1.0, 3.0, 2.0, 5.0]);
        assert_eq!(sorted, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(percentile(&sorted, 50.0), 3.0);
        assert_relative_eq!(percentile(&sorted, 25.0), 2.0);
        assert_relative_eq!(percentile(&sorted, 10.0), 1.4, epsilon = 1e-5);
        assert_relative_eq!(percentile(&[42.0], 75.0), 42.0);
    }
}
