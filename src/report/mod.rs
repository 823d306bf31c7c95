//! Report module - terminal summary, JSON export and the HTML dashboard

pub mod dashboard;
pub mod export;
pub mod summary;

pub use dashboard::*;
pub use export::*;
pub use summary::*;
