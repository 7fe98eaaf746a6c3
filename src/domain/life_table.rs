//! Age-conditioned life table.
//!
//! Expected remaining years by sex at selected ages, from the 2021 US life
//! tables (CDC/NCHS). Intersex rows are the mean of male and female.

use super::attributes::Sex;

/// Ages with a tabulated row.
const AGES: [u32; 10] = [0, 15, 25, 35, 45, 50, 55, 65, 75, 85];

const MALE: [f64; 10] = [76.1, 62.3, 52.7, 43.3, 34.2, 30.0, 26.0, 18.3, 11.7, 6.3];
const FEMALE: [f64; 10] = [81.2, 67.3, 57.6, 47.9, 38.4, 33.9, 29.6, 21.1, 13.6, 7.2];
const INTERSEX: [f64; 10] = [78.65, 64.8, 55.15, 45.6, 36.3, 31.95, 27.8, 19.7, 12.65, 6.75];

/// Remaining-life figures indexed by tabulated age.
#[derive(Debug, Clone, Copy, Default)]
pub struct LifeTable;

impl LifeTable {
    fn rows(sex: Sex) -> &'static [f64; 10] {
        match sex {
            Sex::Male => &MALE,
            Sex::Female => &FEMALE,
            Sex::Intersex => &INTERSEX,
        }
    }

    /// Total expected lifespan in years for someone `current_age` years old.
    ///
    /// Uses the closest tabulated age not above `current_age` and subtracts
    /// the years elapsed since that age from its remaining-life figure
    /// (never below zero). The result is an age at death, not a remaining
    /// duration.
    #[must_use]
    pub fn conditional_expectancy(&self, current_age: f64, sex: Sex) -> f64 {
        let age = if current_age.is_finite() { current_age.max(0.0) } else { 0.0 };
        let idx = AGES
            .iter()
            .rposition(|&a| f64::from(a) <= age)
            .unwrap_or(0);
        let closest = f64::from(AGES[idx]);
        // Not `row - (age - closest) + closest`, which lands between rows and
        // can fall below the current age. This stays flat until the next row.
        let remaining = (Self::rows(sex)[idx] - (age - closest)).max(0.0);
        age + remaining
    }
}
