//! Adjustment table: baseline life expectancy plus per-attribute deltas.
//!
//! WARNING: the default figures were never checked against a source. Treat
//! them as placeholder data and replace the whole table with a JSON file when
//! better numbers are available.

use serde::{Deserialize, Serialize};

use super::attributes::{Attribute, Gender, RelationshipStatus, Sex};

/// US 2021 period life expectancy at birth, averaged over male and female.
const DEFAULT_BASELINE_YEARS: f64 = 78.65;

/// Upper bound accepted for a baseline loaded from a file.
const MAX_BASELINE_YEARS: f64 = 150.0;

/// Largest magnitude accepted for a single delta.
const MAX_DELTA_YEARS: f64 = MAX_BASELINE_YEARS;

/// Deltas by sex assigned at birth, relative to the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SexAdjustments {
    pub male: f64,
    pub female: f64,
    pub intersex: f64,
}

impl Default for SexAdjustments {
    fn default() -> Self {
        // baseline + delta reproduces the at-birth life table rows (76.1 / 81.2)
        Self {
            male: -2.55,
            female: 2.55,
            intersex: 0.0,
        }
    }
}

/// Deltas for gender relative to sex assigned at birth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct GenderAdjustments {
    /// Masc with male, or fem with female
    pub congruent: f64,
    /// Any other masc/fem pairing
    pub incongruent: f64,
    pub non_binary: f64,
}

impl Default for GenderAdjustments {
    fn default() -> Self {
        Self {
            congruent: 0.0,
            incongruent: -1.5,
            non_binary: -2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RelationshipAdjustments {
    pub single: f64,
    pub happily_married: f64,
    pub unhappily_married: f64,
    pub divorced: f64,
    pub widowed: f64,
    pub long_term_partnership: f64,
    pub polyamorous: f64,
}

impl Default for RelationshipAdjustments {
    fn default() -> Self {
        Self {
            single: -3.5,
            happily_married: 3.7,
            unhappily_married: -5.0,
            divorced: -3.0,
            widowed: -4.0,
            long_term_partnership: 3.0,
            polyamorous: 1.5,
        }
    }
}

/// Baseline expectancy and one delta (in years) per attribute value.
///
/// Every attribute in the vocabulary maps to exactly one field; the mapping is
/// an exhaustive `match` in [`AdjustmentTable::delta`]. When deserialized,
/// missing fields keep their defaults and unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AdjustmentTable {
    pub baseline_years: f64,
    pub sex: SexAdjustments,
    pub gender: GenderAdjustments,
    pub relationship: RelationshipAdjustments,
    pub college_educated: f64,
    pub religious: f64,
    pub high_income: f64,
    pub adhd: f64,
    pub autism: f64,
    pub left_handed: f64,
}

impl Default for AdjustmentTable {
    fn default() -> Self {
        Self {
            baseline_years: DEFAULT_BASELINE_YEARS,
            sex: SexAdjustments::default(),
            gender: GenderAdjustments::default(),
            relationship: RelationshipAdjustments::default(),
            college_educated: 4.5,
            religious: 5.0,
            high_income: 2.5,
            adhd: -3.0,
            autism: -2.0,
            left_handed: -1.0,
        }
    }
}

impl AdjustmentTable {
    #[must_use]
    pub fn sex_delta(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.sex.male,
            Sex::Female => self.sex.female,
            Sex::Intersex => self.sex.intersex,
        }
    }

    /// Gender delta given the (optional) sex assigned at birth.
    ///
    /// Without a sex there is nothing to compare masc/fem against, so they
    /// count as congruent.
    #[must_use]
    pub fn gender_delta(&self, gender: Gender, sex: Option<Sex>) -> f64 {
        match (gender, sex) {
            (Gender::NonBinary, _) => self.gender.non_binary,
            (_, None) => self.gender.congruent,
            (g, Some(s)) if g.is_congruent_with(s) => self.gender.congruent,
            _ => self.gender.incongruent,
        }
    }

    #[must_use]
    pub fn relationship_delta(&self, status: RelationshipStatus) -> f64 {
        let r = &self.relationship;
        match status {
            RelationshipStatus::Single => r.single,
            RelationshipStatus::HappilyMarried => r.happily_married,
            RelationshipStatus::UnhappilyMarried => r.unhappily_married,
            RelationshipStatus::Divorced => r.divorced,
            RelationshipStatus::Widowed => r.widowed,
            RelationshipStatus::LongTermPartnership => r.long_term_partnership,
            RelationshipStatus::Polyamorous => r.polyamorous,
        }
    }

    /// Delta in years for one attribute. `sex` is only consulted for gender.
    #[must_use]
    pub fn delta(&self, attribute: Attribute, sex: Option<Sex>) -> f64 {
        match attribute {
            Attribute::Sex(s) => self.sex_delta(s),
            Attribute::Gender(g) => self.gender_delta(g, sex),
            Attribute::Relationship(r) => self.relationship_delta(r),
            Attribute::CollegeEducated => self.college_educated,
            Attribute::Religious => self.religious,
            Attribute::HighIncome => self.high_income,
            Attribute::Adhd => self.adhd,
            Attribute::Autism => self.autism,
            Attribute::LeftHanded => self.left_handed,
        }
    }

    fn named_values(&self) -> Vec<(&'static str, f64)> {
        let r = &self.relationship;
        vec![
            ("baseline-years", self.baseline_years),
            ("sex.male", self.sex.male),
            ("sex.female", self.sex.female),
            ("sex.intersex", self.sex.intersex),
            ("gender.congruent", self.gender.congruent),
            ("gender.incongruent", self.gender.incongruent),
            ("gender.non-binary", self.gender.non_binary),
            ("relationship.single", r.single),
            ("relationship.happily-married", r.happily_married),
            ("relationship.unhappily-married", r.unhappily_married),
            ("relationship.divorced", r.divorced),
            ("relationship.widowed", r.widowed),
            ("relationship.long-term-partnership", r.long_term_partnership),
            ("relationship.polyamorous", r.polyamorous),
            ("college-educated", self.college_educated),
            ("religious", self.religious),
            ("high-income", self.high_income),
            ("adhd", self.adhd),
            ("autism", self.autism),
            ("left-handed", self.left_handed),
        ]
    }

    /// Validate that all figures are usable.
    ///
    /// # Errors
    /// Returns validation errors as a vector of strings.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = self
            .named_values()
            .into_iter()
            .filter(|(_, v)| !v.is_finite())
            .map(|(name, v)| format!("{name} must be a finite number, got {v}"))
            .collect();

        if self.baseline_years.is_finite()
            && !(0.0..=MAX_BASELINE_YEARS).contains(&self.baseline_years)
        {
            errors.push(format!(
                "baseline-years {} out of range [0, {MAX_BASELINE_YEARS}]",
                self.baseline_years
            ));
        }

        errors.extend(
            self.named_values()
                .into_iter()
                // baseline-years is first and has its own range
                .skip(1)
                .filter(|(_, v)| v.is_finite() && v.abs() > MAX_DELTA_YEARS)
                .map(|(name, v)| {
                    format!("{name} {v} out of range [-{MAX_DELTA_YEARS}, {MAX_DELTA_YEARS}]")
                }),
        );

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Parse and validate a table from JSON.
    ///
    /// # Errors
    /// Returns `Serialization` for malformed JSON or unknown keys and
    /// `InvalidTable` if any figure fails validation.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let table: Self = serde_json::from_str(json)?;
        table
            .validate()
            .map_err(|errors| crate::MementoError::InvalidTable(errors.join("; ")))?;
        Ok(table)
    }
}
