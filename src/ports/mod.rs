//! Ports layer: Trait definitions for external collaborators.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the estimator and the outside world (wall clock, table files).

mod adjustment_source;
mod clock;

pub use adjustment_source::AdjustmentSource;
pub use clock::Clock;
