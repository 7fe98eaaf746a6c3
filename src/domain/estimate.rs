//! Estimate result types.
//!
//! Represents the output of one life-expectancy estimate.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::birth_date::{years_to_duration, MAX_YEARS};

/// Where the baseline figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EstimateModel {
    /// Fixed baseline from the adjustment table
    #[default]
    Period,
    /// Life-table expectancy given survival to the current age
    Conditional,
}

impl std::fmt::Display for EstimateModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Period => write!(f, "period"),
            Self::Conditional => write!(f, "conditional"),
        }
    }
}

/// One attribute's share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Flag name, as accepted by `Attribute::from_str`
    pub attribute: String,
    pub years: f64,
}

/// Result of one estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateResult {
    pub birth_date: NaiveDate,

    /// The instant "remaining" is measured from
    pub as_of: NaiveDateTime,

    pub model: EstimateModel,

    /// Starting figure before adjustments
    pub baseline_years: f64,

    /// Per-attribute deltas in application order
    pub contributions: Vec<Contribution>,

    /// Baseline plus all deltas, clamped to `[0, MAX_YEARS]`
    pub expectancy_years: f64,

    /// Birth (midnight) plus `expectancy_years`
    pub expected_end: NaiveDateTime,

    /// Seconds from `as_of` to `expected_end`, never negative
    pub remaining_seconds: i64,
}

impl EstimateResult {
    /// Assemble a result, deriving the total, end instant, and remaining time.
    #[must_use]
    pub fn new(
        birth_date: NaiveDate,
        as_of: NaiveDateTime,
        model: EstimateModel,
        baseline_years: f64,
        contributions: Vec<Contribution>,
    ) -> Self {
        let total: f64 = baseline_years + contributions.iter().map(|c| c.years).sum::<f64>();
        let expectancy_years = if total.is_nan() {
            0.0
        } else {
            total.clamp(0.0, MAX_YEARS)
        };

        let born = birth_date.and_time(NaiveTime::MIN);
        let expected_end = born
            .checked_add_signed(years_to_duration(expectancy_years))
            .unwrap_or(NaiveDateTime::MAX);
        let remaining_seconds = (expected_end - as_of).num_seconds().max(0);

        Self {
            birth_date,
            as_of,
            model,
            baseline_years,
            contributions,
            expectancy_years,
            expected_end,
            remaining_seconds,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> Duration {
        Duration::seconds(self.remaining_seconds)
    }

    /// True once `as_of` has reached the expected end.
    #[must_use]
    pub fn is_past_expectancy(&self) -> bool {
        self.remaining_seconds == 0
    }

    #[must_use]
    pub fn expected_end_date(&self) -> NaiveDate {
        self.expected_end.date()
    }

    #[must_use]
    pub fn remaining_days(&self) -> i64 {
        self.remaining().num_days()
    }

    /// Hours left over after whole days.
    #[must_use]
    pub fn remaining_hours(&self) -> i64 {
        (self.remaining() - Duration::days(self.remaining_days())).num_hours()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_totals_and_remaining() {
        let birth = date(2000, 1, 1);
        let as_of = date(2000, 1, 1).and_hms_opt(0, 0, 0).expect("valid");
        let result = EstimateResult::new(
            birth,
            as_of,
            EstimateModel::Period,
            1.0,
            vec![Contribution { attribute: "adhd".into(), years: 1.0 }],
        );

        assert_eq!(result.expectancy_years, 2.0);
        assert_eq!(result.remaining_days(), 730);
        assert_eq!(result.remaining_hours(), 12);
        assert_eq!(result.expected_end_date(), date(2001, 12, 31));
        assert!(!result.is_past_expectancy());
    }

    #[test]
    fn test_negative_total_clamps_to_birth() {
        let birth = date(1990, 6, 1);
        let as_of = date(2020, 1, 1).and_hms_opt(8, 0, 0).expect("valid");
        let result = EstimateResult::new(
            birth,
            as_of,
            EstimateModel::Period,
            10.0,
            vec![Contribution { attribute: "adhd".into(), years: -50.0 }],
        );

        assert_eq!(result.expectancy_years, 0.0);
        assert_eq!(result.expected_end_date(), birth);
        assert_eq!(result.remaining_seconds, 0);
        assert!(result.is_past_expectancy());
    }

    #[test]
    fn test_unbounded_total_clamps_consistently() {
        let birth = date(2000, 1, 1);
        let as_of = date(2026, 1, 1).and_hms_opt(0, 0, 0).expect("valid");
        let huge = vec![
            Contribution { attribute: "adhd".into(), years: f64::MAX },
            Contribution { attribute: "autism".into(), years: f64::MAX },
        ];
        let result = EstimateResult::new(birth, as_of, EstimateModel::Period, 78.65, huge);

        assert_eq!(result.expectancy_years, MAX_YEARS);
        assert!(!result.is_past_expectancy());
        assert_eq!(
            result.expected_end,
            birth.and_time(NaiveTime::MIN) + years_to_duration(result.expectancy_years)
        );
        let json = serde_json::to_value(&result).expect("Should serialize");
        assert_eq!(json["expectancy_years"], MAX_YEARS);

        let nan = vec![Contribution { attribute: "adhd".into(), years: f64::NAN }];
        let result = EstimateResult::new(birth, as_of, EstimateModel::Period, 78.65, nan);
        assert_eq!(result.expectancy_years, 0.0);
    }

    #[test]
    fn test_serializes_to_json() {
        let result = EstimateResult::new(
            date(2001, 9, 11),
            date(2026, 1, 1).and_hms_opt(0, 0, 0).expect("valid"),
            EstimateModel::Conditional,
            80.0,
            Vec::new(),
        );
        let json = serde_json::to_value(&result).expect("Should serialize");
        assert_eq!(json["model"], "conditional");
        assert_eq!(json["birth_date"], "2001-09-11");
    }
}
