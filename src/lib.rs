//! Titanic Explorer: passenger survival dashboard library
//!
//! Prepares the Titanic passenger dataset (imputation, titles, age groups)
//! and computes the filtered views and aggregates shown by the dashboard.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
