//! Clock port: source of "now".

use chrono::NaiveDateTime;

/// Trait for reading the current local time.
///
/// Injected into the estimator so a given birth date and attribute set always
/// produce the same result for the same clock reading.
pub trait Clock: Send + Sync {
    /// Current local date and time.
    fn now(&self) -> NaiveDateTime;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}
