pub mod aggregator;
pub mod error;
pub mod group;
pub mod reduction_spec;
pub mod stats;
pub mod summaries;
