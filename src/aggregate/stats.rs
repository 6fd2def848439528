//! Plain numeric reductions over slices.

use serde::Serialize;

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(sum(values) / values.len() as f64)
}

pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((squared / (values.len() - 1) as f64).sqrt())
}

/// Population standard deviation (n denominator); `None` for an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let squared: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((squared / values.len() as f64).sqrt())
}

/// Quantile of already sorted values, interpolating linearly between the two
/// closest ranks. `q` is clamped to `[0, 1]`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Summary statistics of one column, in the layout of a classic `describe` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Description {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` for a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

impl Description {
    /// Describes `values`; `None` when there are none.
    pub fn of(values: &[f64]) -> Option<Description> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Some(Description {
            count: values.len(),
            mean: mean(values)?,
            std: sample_std(values),
            min: *sorted.first()?,
            q25: quantile_sorted(&sorted, 0.25)?,
            median: quantile_sorted(&sorted, 0.5)?,
            q75: quantile_sorted(&sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_divides_by_n_minus_one() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std = sample_std(&values).unwrap();
        assert!((std - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(population_std(&values), Some(2.0));
    }

    #[test]
    fn single_value_has_no_sample_std() {
        assert_eq!(sample_std(&[3.0]), None);
        assert_eq!(population_std(&[3.0]), Some(0.0));
    }

    #[test]
    fn empty_slices_have_no_statistics() {
        assert_eq!(mean(&[]), None);
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(sum(&[]), 0.0);
        assert!(Description::of(&[]).is_none());
    }

    #[test]
    fn quantiles_interpolate_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), Some(1.75));
        assert_eq!(quantile_sorted(&sorted, 0.5), Some(2.5));
        assert_eq!(quantile_sorted(&sorted, 1.0), Some(4.0));
    }

    #[test]
    fn describe_matches_hand_computed_values() {
        let description = Description::of(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(description.count, 4);
        assert_eq!(description.mean, 2.5);
        assert_eq!(description.min, 1.0);
        assert_eq!(description.q25, 1.75);
        assert_eq!(description.median, 2.5);
        assert_eq!(description.q75, 3.25);
        assert_eq!(description.max, 4.0);
        assert!((description.std.unwrap() - (5.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }
}
