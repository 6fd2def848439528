//! Gap filling for measurement columns.
//!
//! Missing values are replaced by the nearest preceding known value and, for a
//! leading run with nothing before it, by the nearest following one. This masks
//! real gaps at the start of a series: a missing first day inherits a value from
//! the future. The behaviour is kept for compatibility with the published
//! dataset, and callers get a [`FillReport`] so the imputation can be logged.

/// How many values of one column were imputed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillReport {
    pub forward_filled: usize,
    pub backward_filled: usize,
}

impl FillReport {
    pub fn total(&self) -> usize {
        self.forward_filled + self.backward_filled
    }
}

/// Forward-fills then backward-fills `values`.
///
/// Returns `None` when the column has no known value at all.
pub fn fill_forward_backward(values: &[Option<f64>]) -> Option<(Vec<f64>, FillReport)> {
    let first_known = values.iter().flatten().copied().next()?;
    let mut report = FillReport::default();
    let mut last_known: Option<f64> = None;
    let filled = values
        .iter()
        .map(|value| match (value, last_known) {
            (Some(v), _) => {
                last_known = Some(*v);
                *v
            }
            (None, Some(previous)) => {
                report.forward_filled += 1;
                previous
            }
            // only the leading run has nothing before it
            (None, None) => {
                report.backward_filled += 1;
                first_known
            }
        })
        .collect();
    Some((filled, report))
}
