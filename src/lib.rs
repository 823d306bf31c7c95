//! Student360: Student Performance Analytics Library
//!
//! Loads the math and Portuguese student survey datasets, merges them,
//! derives and standardizes features, and summarizes the result as
//! performance metrics and declarative chart specifications.

pub mod charts;
pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
