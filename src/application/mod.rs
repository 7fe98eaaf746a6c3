//! Application layer: Use cases.
//!
//! This module combines domain logic with ports to implement
//! the estimate use case.

mod estimator;

pub use estimator::Estimator;
