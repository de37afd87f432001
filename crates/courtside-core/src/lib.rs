// Library root: the dataset layer (loading, normalization, typed schema)
// and the analytics operations that back every dashboard chart.

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod report;
