use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrendError {
    #[error("Need at least {required} distinct years to fit a trend, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}
