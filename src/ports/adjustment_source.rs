//! Adjustment source port: where the adjustment table comes from.

use crate::domain::AdjustmentTable;

/// Trait for loading the adjustment table.
///
/// The table is read once per run and never mutated afterwards.
pub trait AdjustmentSource {
    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;

    /// Load and validate the table.
    ///
    /// # Errors
    /// Returns error if the table cannot be read or fails validation.
    fn load(&self) -> crate::Result<AdjustmentTable>;
}
