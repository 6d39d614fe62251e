pub mod match_record;
pub mod metric;
pub mod summary;
