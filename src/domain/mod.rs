//! Domain layer: Core types and logic.
//!
//! This module contains pure Rust types with no I/O.
//! All types are serializable and implement strict validation.

mod adjustments;
mod attributes;
mod birth_date;
mod estimate;
mod life_table;

pub use adjustments::{AdjustmentTable, GenderAdjustments, RelationshipAdjustments, SexAdjustments};
pub use attributes::{Attribute, AttributeKind, AttributeSet, Gender, RelationshipStatus, Sex};
pub use birth_date::{age_in_years, parse_birth_date, years_to_duration, DAYS_PER_YEAR, MAX_YEARS};
pub use estimate::{Contribution, EstimateModel, EstimateResult};
pub use life_table::LifeTable;
