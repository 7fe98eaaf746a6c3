//! Adapters layer: Concrete implementations of ports.
//!
//! - `clock`: system and fixed clocks
//! - `table`: built-in and JSON-file adjustment tables
//! - `sanitize`: personal-data filtering for logs

pub mod clock;
pub mod sanitize;
pub mod table;

pub use clock::{FixedClock, SystemClock};
pub use table::{BuiltinTable, JsonTableFile};
