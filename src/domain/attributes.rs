//! Attribute vocabulary for life-expectancy adjustments.
//!
//! The vocabulary is a closed set: every attribute the caller can supply is a
//! variant of [`Attribute`], and every variant has an entry in the
//! [`AdjustmentTable`](super::AdjustmentTable).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MementoError;

/// Sex assigned at birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    Male,
    Female,
    /// Figures for intersex are a rough average of male and female.
    Intersex,
}

impl Sex {
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Intersex];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Intersex => "intersex",
        }
    }
}

/// Gender presentation / identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Masc,
    Fem,
    NonBinary,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Masc, Gender::Fem, Gender::NonBinary];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Masc => "masc",
            Self::Fem => "fem",
            Self::NonBinary => "non-binary",
        }
    }

    /// Whether this gender matches the typical expectation for `sex`.
    ///
    /// Intersex never counts as congruent with masc or fem.
    #[must_use]
    pub fn is_congruent_with(&self, sex: Sex) -> bool {
        matches!((sex, self), (Sex::Male, Self::Masc) | (Sex::Female, Self::Fem))
    }
}

/// Relationship status. At most one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipStatus {
    Single,
    HappilyMarried,
    UnhappilyMarried,
    Divorced,
    Widowed,
    LongTermPartnership,
    Polyamorous,
}

impl RelationshipStatus {
    pub const ALL: [RelationshipStatus; 7] = [
        RelationshipStatus::Single,
        RelationshipStatus::HappilyMarried,
        RelationshipStatus::UnhappilyMarried,
        RelationshipStatus::Divorced,
        RelationshipStatus::Widowed,
        RelationshipStatus::LongTermPartnership,
        RelationshipStatus::Polyamorous,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::HappilyMarried => "happily-married",
            Self::UnhappilyMarried => "unhappily-married",
            Self::Divorced => "divorced",
            Self::Widowed => "widowed",
            Self::LongTermPartnership => "long-term-partnership",
            Self::Polyamorous => "polyamorous",
        }
    }
}

macro_rules! impl_enum_text {
    ($ty:ty, $label:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = MementoError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| MementoError::UnknownAttribute(format!("{}={}", $label, s.trim())))
            }
        }
    };
}

impl_enum_text!(Sex, "sex");
impl_enum_text!(Gender, "gender");
impl_enum_text!(RelationshipStatus, "relationship");

/// The kind of an attribute. Ordering defines the fixed order in which
/// adjustments are applied and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
    Sex,
    Gender,
    Relationship,
    CollegeEducated,
    Religious,
    HighIncome,
    Adhd,
    Autism,
    LeftHanded,
}

/// A single recognized demographic or lifestyle factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Sex(Sex),
    Gender(Gender),
    Relationship(RelationshipStatus),
    /// College education
    CollegeEducated,
    /// Regular religious attendance
    Religious,
    /// Income more than one standard deviation above the mean
    HighIncome,
    Adhd,
    Autism,
    LeftHanded,
}

impl Attribute {
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Sex(_) => AttributeKind::Sex,
            Self::Gender(_) => AttributeKind::Gender,
            Self::Relationship(_) => AttributeKind::Relationship,
            Self::CollegeEducated => AttributeKind::CollegeEducated,
            Self::Religious => AttributeKind::Religious,
            Self::HighIncome => AttributeKind::HighIncome,
            Self::Adhd => AttributeKind::Adhd,
            Self::Autism => AttributeKind::Autism,
            Self::LeftHanded => AttributeKind::LeftHanded,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sex(v) => write!(f, "sex={v}"),
            Self::Gender(v) => write!(f, "gender={v}"),
            Self::Relationship(v) => f.write_str(v.as_str()),
            Self::CollegeEducated => f.write_str("college-educated"),
            Self::Religious => f.write_str("religious"),
            Self::HighIncome => f.write_str("high-income"),
            Self::Adhd => f.write_str("adhd"),
            Self::Autism => f.write_str("autism"),
            Self::LeftHanded => f.write_str("left-handed"),
        }
    }
}

/// Parses the textual flag names accepted on the command line.
///
/// Enum attributes use `kind=value` (`sex=female`, `gender=non-binary`,
/// `relationship=divorced`); relationship statuses and boolean flags also
/// accept their bare names (`divorced`, `adhd`). Underscores and case are
/// ignored.
impl FromStr for Attribute {
    type Err = MementoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((key, value)) = s.split_once('=') {
            return match normalize(key).as_str() {
                "sex" => value.parse().map(Self::Sex),
                "gender" => value.parse().map(Self::Gender),
                "relationship" => value.parse().map(Self::Relationship),
                _ => Err(MementoError::UnknownAttribute(s.trim().to_string())),
            };
        }

        let name = normalize(s);
        match name.as_str() {
            "college-educated" => Ok(Self::CollegeEducated),
            "religious" => Ok(Self::Religious),
            "high-income" => Ok(Self::HighIncome),
            "adhd" => Ok(Self::Adhd),
            "autism" => Ok(Self::Autism),
            "left-handed" => Ok(Self::LeftHanded),
            _ => RelationshipStatus::ALL
                .iter()
                .copied()
                .find(|r| r.as_str() == name)
                .map(Self::Relationship)
                .ok_or_else(|| MementoError::UnknownAttribute(s.trim().to_string())),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}

/// Immutable set of attributes selected by the caller.
///
/// Holds at most one attribute per [`AttributeKind`]. Iteration follows the
/// kind order, so the same set always yields the same sequence regardless of
/// how it was built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: BTreeMap<AttributeKind, Attribute>,
}

impl AttributeSet {
    /// Empty set: the estimate is the bare baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a new set with `attribute` added.
    ///
    /// Adding the same attribute twice is a no-op.
    ///
    /// # Errors
    /// Returns `ConflictingAttribute` if a different value of the same enum
    /// kind is already present (e.g. two relationship statuses).
    pub fn with(mut self, attribute: Attribute) -> crate::Result<Self> {
        match self.entries.get(&attribute.kind()) {
            Some(existing) if *existing != attribute => Err(MementoError::ConflictingAttribute(
                format!("{attribute} conflicts with {existing}"),
            )),
            _ => {
                self.entries.insert(attribute.kind(), attribute);
                Ok(self)
            }
        }
    }

    /// Build a set from attributes.
    ///
    /// # Errors
    /// Returns `ConflictingAttribute` as [`AttributeSet::with`].
    pub fn try_from_attributes<I>(attributes: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = Attribute>,
    {
        attributes
            .into_iter()
            .try_fold(Self::new(), |set, attribute| set.with(attribute))
    }

    /// Build a set from textual flag names.
    ///
    /// # Errors
    /// Returns `UnknownAttribute` on the first unrecognized name, even if
    /// other names are valid.
    pub fn from_names<I, S>(names: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = names
            .into_iter()
            .map(|n| n.as_ref().parse::<Attribute>())
            .collect::<crate::Result<Vec<_>>>()?;
        Self::try_from_attributes(parsed)
    }

    /// Attributes in application order.
    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.values()
    }

    #[must_use]
    pub fn contains(&self, attribute: &Attribute) -> bool {
        self.entries.get(&attribute.kind()) == Some(attribute)
    }

    #[must_use]
    pub fn sex(&self) -> Option<Sex> {
        match self.entries.get(&AttributeKind::Sex) {
            Some(Attribute::Sex(s)) => Some(*s),
            _ => None,
        }
    }

    #[must_use]
    pub fn gender(&self) -> Option<Gender> {
        match self.entries.get(&AttributeKind::Gender) {
            Some(Attribute::Gender(g)) => Some(*g),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
