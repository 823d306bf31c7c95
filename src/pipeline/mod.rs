//! Pipeline module - load, prepare and summarize the student datasets

pub mod cache;
pub mod correlation;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod preprocess;
pub mod runner;
pub mod schema;

pub use cache::*;
pub use correlation::*;
pub use error::*;
pub use loader::*;
pub use metrics::*;
pub use preprocess::*;
pub use runner::*;
pub use schema::*;
