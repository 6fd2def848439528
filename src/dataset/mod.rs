pub mod cache;
pub mod climate_dataset;
pub mod error;
pub mod fill;
pub mod loader;
