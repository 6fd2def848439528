use crate::aggregate::error::AggregateError;
use crate::dataset::error::DatasetError;
use crate::trend::error::TrendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Trend(#[from] TrendError),
}
