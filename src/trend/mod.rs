pub mod confidence;
pub mod error;
pub mod forecast;
pub mod model;
