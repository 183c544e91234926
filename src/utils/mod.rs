//! Utility modules

pub mod allocation;
pub mod validation;

pub use allocation::*;
pub use validation::*;
