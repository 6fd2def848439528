//! Which reductions to compute for which fields.

use crate::aggregate::error::AggregateError;
use crate::types::field::{Field, Reduction};
use serde::Serialize;

/// An ordered mapping from field to the reductions requested for it.
///
/// Cells of an [`crate::AggregateRow`] appear in the order fields were added,
/// and for each field in the order its reductions were listed.
///
/// # Examples
///
/// ```
/// use climate_trends::{Field, Reduction, ReductionSpec};
///
/// let typed = ReductionSpec::new()
///     .with(Field::TemperatureAvg, [Reduction::Mean, Reduction::Std])
///     .with(Field::Precipitation, [Reduction::Sum]);
///
/// let parsed = ReductionSpec::parse([
///     ("temperature_avg", vec!["mean", "std"]),
///     ("precipitation_sum", vec!["sum"]),
/// ])?;
/// assert_eq!(typed, parsed);
///
/// assert!(ReductionSpec::parse([("humidity", vec!["mean"])]).is_err());
/// # Ok::<(), climate_trends::AggregateError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReductionSpec {
    entries: Vec<(Field, Vec<Reduction>)>,
}

impl ReductionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds reductions for `field`. Repeated fields and reductions are merged.
    pub fn with(mut self, field: Field, reductions: impl IntoIterator<Item = Reduction>) -> Self {
        let position = match self.entries.iter().position(|(f, _)| *f == field) {
            Some(position) => position,
            None => {
                self.entries.push((field, Vec::new()));
                self.entries.len() - 1
            }
        };
        let requested = &mut self.entries[position].1;
        for reduction in reductions {
            if !requested.contains(&reduction) {
                requested.push(reduction);
            }
        }
        self
    }

    /// Builds a spec from field and reduction names.
    ///
    /// # Errors
    ///
    /// [`AggregateError::UnknownField`] or [`AggregateError::UnknownReduction`]
    /// for the first name outside the schema.
    pub fn parse<F, R, S>(requests: impl IntoIterator<Item = (F, R)>) -> Result<Self, AggregateError>
    where
        F: AsRef<str>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        requests
            .into_iter()
            .try_fold(Self::new(), |spec, (field, reductions)| {
                let field: Field = field.as_ref().parse()?;
                let reductions = reductions
                    .into_iter()
                    .map(|name| name.as_ref().parse::<Reduction>())
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(spec.with(field, reductions))
            })
    }

    /// Every requested `(field, reduction)` pair in output order.
    pub fn cells(&self) -> impl Iterator<Item = (Field, Reduction)> + '_ {
        self.entries
            .iter()
            .flat_map(|(field, reductions)| reductions.iter().map(move |r| (*field, *r)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, reductions)| reductions.is_empty())
    }

    /// Year-over-year table: temperature mean and spread, extremes, and rainfall totals.
    pub fn annual_summary() -> Self {
        Self::new()
            .with(Field::TemperatureAvg, [Reduction::Mean, Reduction::Std])
            .with(Field::TemperatureMax, [Reduction::Max])
            .with(Field::TemperatureMin, [Reduction::Min])
            .with(
                Field::Precipitation,
                [Reduction::Sum, Reduction::Mean, Reduction::Max],
            )
    }

    /// Yearly table the trend models are fitted on.
    pub fn annual_trend() -> Self {
        Self::new()
            .with(Field::TemperatureAvg, [Reduction::Mean])
            .with(Field::TemperatureMax, [Reduction::Max])
            .with(Field::TemperatureMin, [Reduction::Min])
            .with(Field::Precipitation, [Reduction::Sum])
    }

    pub fn monthly_temperature() -> Self {
        Self::new()
            .with(Field::TemperatureMax, [Reduction::Mean])
            .with(Field::TemperatureMin, [Reduction::Mean])
            .with(Field::TemperatureAvg, [Reduction::Mean])
    }

    pub fn monthly_precipitation() -> Self {
        Self::new().with(Field::Precipitation, [Reduction::Sum])
    }

    pub fn seasonal_temperature() -> Self {
        Self::new()
            .with(Field::TemperatureAvg, [Reduction::Mean])
            .with(Field::TemperatureMax, [Reduction::Max])
            .with(Field::TemperatureMin, [Reduction::Min])
    }

    pub fn seasonal_precipitation() -> Self {
        Self::new().with(
            Field::Precipitation,
            [Reduction::Sum, Reduction::Mean, Reduction::Max],
        )
    }
}
