//! # Memento
//!
//! Personalized life-expectancy estimate for a "memento mori" reminder.
//!
//! Given a birth date and a set of self-reported demographic and lifestyle
//! attributes, this crate computes an expected end date by adding
//! per-attribute adjustments to a baseline life expectancy.
//!
//! The adjustment figures are unvalidated and not medical advice. They are
//! data: swap them with `--adjustments <FILE>` rather than editing code.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core types (attributes, adjustment table, life table, results)
//! - `ports`: Trait definitions for the clock and the adjustment source
//! - `adapters`: Concrete implementations (system clock, JSON table, log sanitizer)
//! - `application`: The estimator use case
//! - `cli`: Command line surface and report rendering

pub mod adapters;
pub mod application;
pub mod cli;
pub mod domain;
pub mod ports;

pub use application::Estimator;
pub use domain::{AdjustmentTable, Attribute, AttributeSet, EstimateResult};

/// Result type for memento operations
pub type Result<T> = std::result::Result<T, MementoError>;

/// Main error type for memento
#[derive(Debug, thiserror::Error)]
pub enum MementoError {
    #[error("Invalid birth date: {0}")]
    InvalidDate(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Conflicting attribute: {0}")]
    ConflictingAttribute(String),

    #[error("Invalid adjustment table: {0}")]
    InvalidTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
