//! Report module - rendering and exporting dashboard views

pub mod dashboard;
pub mod export;

pub use dashboard::*;
pub use export::*;
