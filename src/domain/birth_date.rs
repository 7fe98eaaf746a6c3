//! Birth date parsing and year/duration arithmetic.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::MementoError;

/// Average Gregorian year length used to turn years into days.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Cap on durations built from fractional years, far past any plausible table.
pub const MAX_YEARS: f64 = 1_000.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Parse an ISO `YYYY-MM-DD` birth date.
///
/// # Errors
/// Returns `InvalidDate` if the input is not a valid calendar date.
pub fn parse_birth_date(input: &str) -> crate::Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        MementoError::InvalidDate(format!("'{trimmed}' is not a YYYY-MM-DD date ({e})"))
    })
}

/// Convert fractional years into a duration, to the nearest second.
///
/// Negative or non-finite inputs yield zero.
#[must_use]
pub fn years_to_duration(years: f64) -> Duration {
    if !years.is_finite() || years <= 0.0 {
        return Duration::zero();
    }
    let seconds = (years.min(MAX_YEARS) * DAYS_PER_YEAR * SECONDS_PER_DAY).round() as i64;
    Duration::seconds(seconds)
}

/// Completed days since birth divided by [`DAYS_PER_YEAR`].
#[must_use]
pub fn age_in_years(birth_date: NaiveDate, at: NaiveDateTime) -> f64 {
    let days = (at - birth_date.and_time(chrono::NaiveTime::MIN)).num_days().max(0);
    days as f64 / DAYS_PER_YEAR
}
