//! Pipeline module - dataset preparation, filtering and aggregation

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod prepare;
pub mod provider;

pub use aggregate::*;
pub use error::*;
pub use filter::*;
pub use loader::*;
pub use model::*;
pub use prepare::*;
pub use provider::*;
