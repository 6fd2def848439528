//! Groups daily records by a calendar key and reduces each group to one row.

use crate::aggregate::error::AggregateError;
use crate::aggregate::group::{GroupBy, GroupKey};
use crate::aggregate::reduction_spec::ReductionSpec;
use crate::aggregate::stats;
use crate::types::daily_record::DailyRecord;
use crate::types::field::{Field, Reduction};
use polars::prelude::{Column, DataFrame};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of one reduction over a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ReducedValue {
    Number(f64),
    Count(usize),
    /// The reduction has no value for this group, e.g. the sample standard
    /// deviation of a single observation.
    Undefined,
}

impl ReducedValue {
    /// Numeric view of the value; counts convert to `f64`, undefined is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ReducedValue::Number(value) => Some(*value),
            ReducedValue::Count(count) => Some(*count as f64),
            ReducedValue::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ReducedValue::Undefined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub field: Field,
    pub reduction: Reduction,
    pub value: ReducedValue,
}

/// One group of an aggregation: its key, the number of daily records in it and
/// the requested reductions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub count: usize,
    pub cells: Vec<Cell>,
}

impl AggregateRow {
    pub fn get(&self, field: Field, reduction: Reduction) -> Option<ReducedValue> {
        self.cells
            .iter()
            .find(|cell| cell.field == field && cell.reduction == reduction)
            .map(|cell| cell.value)
    }

    /// Shorthand for `get(..)` followed by [`ReducedValue::as_f64`].
    pub fn number(&self, field: Field, reduction: Reduction) -> Option<f64> {
        self.get(field, reduction).and_then(|value| value.as_f64())
    }
}

/// Ordered rows of an aggregation together with the parameters that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateTable {
    group_by: GroupBy,
    spec: ReductionSpec,
    rows: Vec<AggregateRow>,
}

impl AggregateTable {
    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn spec(&self) -> &ReductionSpec {
        &self.spec
    }

    pub fn rows(&self) -> &[AggregateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, key: GroupKey) -> Option<&AggregateRow> {
        self.rows.iter().find(|row| row.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.rows.iter().map(|row| row.key)
    }

    /// Converts the table into a `DataFrame`: a `group` label column, a `days`
    /// column with the group sizes and one nullable `Float64` column per cell
    /// named `<field>_<reduction>`.
    pub fn to_frame(&self) -> Result<DataFrame, AggregateError> {
        let mut columns = Vec::new();
        let labels: Vec<String> = self.rows.iter().map(|row| row.key.to_string()).collect();
        columns.push(Column::new("group".into(), labels));
        let days: Vec<u64> = self.rows.iter().map(|row| row.count as u64).collect();
        columns.push(Column::new("days".into(), days));

        for (field, reduction) in self.spec.cells() {
            let values: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|row| row.number(field, reduction))
                .collect();
            let name = format!("{}_{}", field.column_name(), reduction.name());
            columns.push(Column::new(name.into(), values));
        }

        DataFrame::new(columns).map_err(AggregateError::Frame)
    }
}

/// Groups `records` by `group_by` and computes the requested reductions.
///
/// Rows are ordered by key: ascending for years and year-months, Spring,
/// Summer, Autumn, Winter for seasons. Only keys present in `records` get a
/// row. The function is pure; the same input always yields the same table.
///
/// # Errors
///
/// [`AggregateError::EmptyInput`] when `records` is empty.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use climate_trends::{aggregate, ClimateDataset, Field, GroupBy, RawObservation, Reduction, ReductionSpec};
///
/// let start = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
/// let observations = start
///     .iter_days()
///     .take(2)
///     .map(|d| RawObservation::new(d, Some(3.0), Some(1.0), Some(4.0)))
///     .collect();
/// let dataset = ClimateDataset::from_observations(observations)?;
///
/// let spec = ReductionSpec::new().with(Field::Precipitation, [Reduction::Sum, Reduction::Std]);
/// let table = aggregate(dataset.records(), GroupBy::Year, &spec)?;
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.rows()[0].number(Field::Precipitation, Reduction::Sum), Some(4.0));
/// // one day per year: no sample standard deviation
/// assert!(table.rows()[0].get(Field::Precipitation, Reduction::Std).unwrap().is_undefined());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn aggregate(
    records: &[DailyRecord],
    group_by: GroupBy,
    reductions: &ReductionSpec,
) -> Result<AggregateTable, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyInput);
    }

    let mut groups: BTreeMap<GroupKey, Vec<&DailyRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(group_by.key_of(record)).or_default().push(record);
    }

    let rows = groups
        .into_iter()
        .map(|(key, members)| reduce_group(key, &members, reductions))
        .collect();

    Ok(AggregateTable {
        group_by,
        spec: reductions.clone(),
        rows,
    })
}

fn reduce_group(key: GroupKey, members: &[&DailyRecord], spec: &ReductionSpec) -> AggregateRow {
    let mut values_by_field: BTreeMap<Field, Vec<f64>> = BTreeMap::new();
    let cells = spec
        .cells()
        .map(|(field, reduction)| {
            let values = values_by_field
                .entry(field)
                .or_insert_with(|| members.iter().map(|r| field.value(r)).collect());
            Cell {
                field,
                reduction,
                value: reduce(values.as_slice(), reduction),
            }
        })
        .collect();

    AggregateRow {
        key,
        count: members.len(),
        cells,
    }
}

fn reduce(values: &[f64], reduction: Reduction) -> ReducedValue {
    let number = |value: Option<f64>| value.map_or(ReducedValue::Undefined, ReducedValue::Number);
    match reduction {
        Reduction::Mean => number(stats::mean(values)),
        Reduction::Sum => ReducedValue::Number(stats::sum(values)),
        Reduction::Min => number(stats::min(values)),
        Reduction::Max => number(stats::max(values)),
        Reduction::Std => number(stats::sample_std(values)),
        Reduction::Count => ReducedValue::Count(values.len()),
    }
}
