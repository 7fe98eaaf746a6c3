//! Command line surface.
//!
//! Parses arguments into an [`AttributeSet`], runs the estimator, and writes
//! the report to stdout. Argument errors exit with status 2 (including
//! unknown attributes); domain errors exit with status 1.

mod report;

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Args, Parser, ValueEnum};

use crate::adapters::{BuiltinTable, JsonTableFile, SystemClock};
use crate::domain::{
    parse_birth_date, Attribute, AttributeSet, EstimateModel, Gender, RelationshipStatus, Sex,
};
use crate::ports::{AdjustmentSource, Clock};
use crate::{Estimator, MementoError};

pub use report::{render_json, render_text};

/// Exit status for domain failures (bad date, bad table, I/O).
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for argument errors, including unknown attributes.
pub const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "memento",
    author,
    version,
    about = "Memento mori: estimate how much time you have left.",
    long_about = "Memento mori: estimate how much time you have left.\n\n\
        Starts from a baseline life expectancy and adds one adjustment per factor. \
        WARNING: the adjustment figures came from an LLM and have not been checked. \
        Factors are treated as independent; interactions are not modeled."
)]
pub struct Cli {
    /// Your birth date in YYYY-MM-DD format
    #[arg(value_name = "BIRTH_DATE")]
    pub birth_date: String,

    /// Sex assigned at birth (intersex figures are a rough average)
    #[arg(long, value_enum)]
    pub sex: Option<SexArg>,

    /// Gender presentation/identity
    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,

    #[command(flatten)]
    pub relationship: RelationshipArgs,

    /// College education (+4.5 years)
    #[arg(long)]
    pub college_educated: bool,

    /// Regular religious attendance (+5.0 years)
    #[arg(long)]
    pub religious: bool,

    /// Income >1 SD above mean (+2.5 years)
    #[arg(long)]
    pub high_income: bool,

    /// ADHD diagnosis (-3.0 years)
    #[arg(long)]
    pub adhd: bool,

    /// Autism diagnosis (-2.0 years)
    #[arg(long)]
    pub autism: bool,

    /// Left-handedness (-1.0 years)
    #[arg(long)]
    pub left_handed: bool,

    /// Additional factor by name, e.g. `adhd` or `sex=female` (repeatable)
    #[arg(long = "attribute", value_name = "NAME")]
    pub attributes: Vec<String>,

    /// JSON adjustment table replacing the built-in figures
    #[arg(long, value_name = "FILE")]
    pub adjustments: Option<PathBuf>,

    /// Start from the life table at your current age instead of a fixed baseline
    #[arg(long)]
    pub conditional: bool,

    /// Show each factor's contribution
    #[arg(long)]
    pub breakdown: bool,

    /// Print the estimate as JSON
    #[arg(long, conflicts_with = "breakdown")]
    pub json: bool,
}

/// Relationship status flags; at most one may be given.
#[derive(Args, Debug, Default, Clone)]
#[group(multiple = false)]
pub struct RelationshipArgs {
    /// Single (-3.5 years)
    #[arg(long)]
    pub single: bool,
    /// Happily married (+3.7 years)
    #[arg(long)]
    pub happily_married: bool,
    /// Unhappily married (-5.0 years)
    #[arg(long)]
    pub unhappily_married: bool,
    /// Divorced (-3.0 years)
    #[arg(long)]
    pub divorced: bool,
    /// Widowed (-4.0 years)
    #[arg(long)]
    pub widowed: bool,
    /// Long-term partnership (+3.0 years)
    #[arg(long)]
    pub long_term_partnership: bool,
    /// Polyamorous relationships (+1.5 years)
    #[arg(long)]
    pub polyamorous: bool,
}

impl RelationshipArgs {
    fn status(&self) -> Option<RelationshipStatus> {
        [
            (self.single, RelationshipStatus::Single),
            (self.happily_married, RelationshipStatus::HappilyMarried),
            (self.unhappily_married, RelationshipStatus::UnhappilyMarried),
            (self.divorced, RelationshipStatus::Divorced),
            (self.widowed, RelationshipStatus::Widowed),
            (self.long_term_partnership, RelationshipStatus::LongTermPartnership),
            (self.polyamorous, RelationshipStatus::Polyamorous),
        ]
        .into_iter()
        .find_map(|(set, status)| set.then_some(status))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SexArg {
    Male,
    Female,
    Intersex,
}

impl From<SexArg> for Sex {
    fn from(value: SexArg) -> Self {
        match value {
            SexArg::Male => Sex::Male,
            SexArg::Female => Sex::Female,
            SexArg::Intersex => Sex::Intersex,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Masc,
    Fem,
    NonBinary,
}

impl From<GenderArg> for Gender {
    fn from(value: GenderArg) -> Self {
        match value {
            GenderArg::Masc => Gender::Masc,
            GenderArg::Fem => Gender::Fem,
            GenderArg::NonBinary => Gender::NonBinary,
        }
    }
}

impl Cli {
    /// Collect the typed flags and `--attribute` names into one set.
    ///
    /// # Errors
    /// Returns `UnknownAttribute` for an unrecognized `--attribute` name and
    /// `ConflictingAttribute` when two values of one kind are given.
    pub fn attribute_set(&self) -> crate::Result<AttributeSet> {
        let flags = [
            (self.college_educated, Attribute::CollegeEducated),
            (self.religious, Attribute::Religious),
            (self.high_income, Attribute::HighIncome),
            (self.adhd, Attribute::Adhd),
            (self.autism, Attribute::Autism),
            (self.left_handed, Attribute::LeftHanded),
        ];

        let typed = self
            .sex
            .map(|s| Attribute::Sex(s.into()))
            .into_iter()
            .chain(self.gender.map(|g| Attribute::Gender(g.into())))
            .chain(self.relationship.status().map(Attribute::Relationship))
            .chain(flags.into_iter().filter_map(|(set, a)| set.then_some(a)));

        let named = AttributeSet::from_names(&self.attributes)?;
        AttributeSet::try_from_attributes(typed.chain(named.iter().copied()))
    }

    #[must_use]
    pub fn model(&self) -> EstimateModel {
        if self.conditional {
            EstimateModel::Conditional
        } else {
            EstimateModel::Period
        }
    }

    fn adjustment_source(&self) -> Box<dyn AdjustmentSource> {
        match &self.adjustments {
            Some(path) => Box::new(JsonTableFile::new(path)),
            None => Box::new(BuiltinTable),
        }
    }
}

/// Map a clap parse failure onto the domain error it represents, if any.
///
/// Unknown flags and out-of-vocabulary values for `--sex`/`--gender` are
/// unknown attributes. Help, version, and other usage errors return `None`.
#[must_use]
pub fn attribute_error(err: &clap::Error) -> Option<MementoError> {
    match err.kind() {
        ErrorKind::UnknownArgument | ErrorKind::InvalidValue => {
            let arg = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(s)) => s.clone(),
                _ => "argument".to_string(),
            };
            let name = match err.get(ContextKind::InvalidValue) {
                Some(ContextValue::String(v)) => format!("{arg} {v}"),
                _ => arg,
            };
            Some(MementoError::UnknownAttribute(name))
        }
        _ => None,
    }
}

/// Exit status for an error returned by [`run`].
#[must_use]
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<MementoError>() {
        Some(MementoError::UnknownAttribute(_)) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

/// Run one estimate against the system clock and write the report to `out`.
///
/// # Errors
/// Returns the domain error (wrapped with context) if the date, attributes,
/// or adjustment table are invalid, or if writing fails.
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    run_with_clock(cli, SystemClock, out)
}

/// [`run`] with an injected clock.
///
/// # Errors
/// As [`run`].
pub fn run_with_clock<C: Clock, W: Write>(cli: &Cli, clock: C, out: &mut W) -> Result<()> {
    let birth_date = parse_birth_date(&cli.birth_date)?;
    let attributes = cli.attribute_set()?;

    let source = cli.adjustment_source();
    let estimator = Estimator::from_source(source.as_ref(), clock)
        .with_context(|| format!("failed to load {}", source.describe()))?
        .with_model(cli.model());

    let result = estimator.estimate(birth_date, &attributes)?;

    let rendered = if cli.json {
        render_json(&result)?
    } else {
        render_text(&result, cli.breakdown)
    };
    writeln!(out, "{rendered}").context("failed to write report")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FixedClock;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 18)
                .expect("valid")
                .and_hms_opt(9, 30, 0)
                .expect("valid"),
        )
    }

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("memento").chain(args.iter().copied()))
            .expect("Should parse args")
    }

    fn run_to_string(args: &[&str]) -> Result<String> {
        let cli = parse(args);
        let mut out = Vec::new();
        run_with_clock(&cli, clock(), &mut out)?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_typed_flags_build_attribute_set() {
        let cli = parse(&[
            "1990-05-05",
            "--sex",
            "female",
            "--gender",
            "non-binary",
            "--widowed",
            "--adhd",
            "--left-handed",
        ]);
        let set = cli.attribute_set().expect("Should build");
        assert_eq!(set.len(), 5);
        assert_eq!(set.sex(), Some(Sex::Female));
        assert_eq!(set.gender(), Some(Gender::NonBinary));
        assert!(set.contains(&Attribute::Relationship(RelationshipStatus::Widowed)));
        assert!(!set.contains(&Attribute::Autism));
    }

    #[test]
    fn test_named_attributes_merge_with_flags() {
        let cli = parse(&["1990-05-05", "--adhd", "--attribute", "adhd", "--attribute", "religious"]);
        let set = cli.attribute_set().expect("Should build");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_named_attribute_conflicting_with_flag() {
        let cli = parse(&["1990-05-05", "--single", "--attribute", "divorced"]);
        let err = cli.attribute_set().expect_err("Should conflict");
        assert!(matches!(err, MementoError::ConflictingAttribute(_)));
    }

    #[test]
    fn test_relationship_flags_are_exclusive() {
        let err = Cli::try_parse_from(["memento", "1990-05-05", "--single", "--divorced"])
            .expect_err("Should reject");
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert!(attribute_error(&err).is_none());
    }

    #[test]
    fn test_unknown_flag_is_unknown_attribute() {
        let err = Cli::try_parse_from(["memento", "1990-05-05", "--adhd", "--smoker"])
            .expect_err("Should reject");
        let mapped = attribute_error(&err).expect("Should map");
        assert!(matches!(mapped, MementoError::UnknownAttribute(ref n) if n.contains("--smoker")));
    }

    #[test]
    fn test_unknown_enum_value_is_unknown_attribute() {
        let err = Cli::try_parse_from(["memento", "1990-05-05", "--sex", "robot"])
            .expect_err("Should reject");
        let mapped = attribute_error(&err).expect("Should map");
        assert!(matches!(mapped, MementoError::UnknownAttribute(ref n) if n.contains("robot")));
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = Cli::try_parse_from(["memento", "--help"]).expect_err("Help short-circuits");
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(attribute_error(&err).is_none());
    }

    #[test]
    fn test_run_prints_report() {
        let out = run_to_string(&["2001-09-11", "--sex", "female", "--college-educated"])
            .expect("Should run");
        assert!(out.contains("Expected until"));
        assert!(out.contains("remain"));
        assert!(out.trim_end().ends_with("Memento mori."));
    }

    #[test]
    fn test_run_json() {
        let out = run_to_string(&["2001-09-11", "--json", "--conditional"]).expect("Should run");
        let value: serde_json::Value = serde_json::from_str(&out).expect("Should be JSON");
        assert_eq!(value["model"], "conditional");
        assert_eq!(value["birth_date"], "2001-09-11");
    }

    #[test]
    fn test_run_with_adjustments_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"{"baseline-years": 78.8, "sex": {"female": 5.4}}"#).expect("write");
        let path_str = path.to_str().expect("utf8 path");

        let out = run_to_string(&["2001-09-11", "--sex", "female", "--adjustments", path_str, "--json"])
            .expect("Should run");
        let value: serde_json::Value = serde_json::from_str(&out).expect("Should be JSON");
        let years = value["expectancy_years"].as_f64().expect("number");
        assert!((years - 84.2).abs() < 1e-9);
        assert!(value["expected_end"].as_str().expect("string").starts_with("2085-11-23"));
    }

    #[test]
    fn test_exit_codes() {
        let err = run_to_string(&["2030-01-01"]).expect_err("Future date");
        assert_eq!(exit_code(&err), EXIT_FAILURE);
        assert!(matches!(err.downcast_ref::<MementoError>(), Some(MementoError::InvalidDate(_))));

        let err = run_to_string(&["01/01/1990"]).expect_err("Bad format");
        assert_eq!(exit_code(&err), EXIT_FAILURE);

        let err = run_to_string(&["1990-01-01", "--attribute", "vegan"]).expect_err("Unknown");
        assert_eq!(exit_code(&err), EXIT_USAGE);
    }

    #[test]
    fn test_bad_table_file_reports_context() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("table.json");
        std::fs::write(&path, r#"{"vegan": 1}"#).expect("write");
        let path_str = path.to_str().expect("utf8 path");

        let err = run_to_string(&["1990-01-01", "--adjustments", path_str]).expect_err("Should fail");
        assert_eq!(exit_code(&err), EXIT_FAILURE);
        assert!(format!("{err:#}").contains("failed to load adjustment table"));
    }
}
