pub mod daily_record;
pub mod field;
pub mod period;
pub mod rain_category;
pub mod season;
