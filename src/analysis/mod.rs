//! Column analyzers. Each call borrows the [`Dataset`](crate::data::model::Dataset)
//! read-only and scans every row once.

pub mod categorical;
pub mod numeric;
