use crate::aggregate::group::GroupBy;
use crate::types::field::{Field, Reduction};
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("No records available to aggregate")]
    EmptyInput,

    #[error("Unknown field '{0}'")]
    UnknownField(String),

    #[error("Unknown reduction '{0}'")]
    UnknownReduction(String),

    #[error("Need at least {required} annual rows, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Expected a table grouped by year, got {0:?}")]
    NotAnnual(GroupBy),

    #[error("Aggregate table has no '{reduction}' of '{field}'")]
    MissingCell { field: Field, reduction: Reduction },

    #[error("Failed to build frame from aggregate table")]
    Frame(#[source] PolarsError),
}
