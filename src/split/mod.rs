pub mod calculator;
pub mod summary;
