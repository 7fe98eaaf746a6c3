//! Estimator: computes a life-expectancy estimate from a birth date and
//! an attribute set.
//!
//! The computation is additive: a baseline plus one delta per attribute,
//! applied in the fixed vocabulary order. No interaction terms are modeled
//! beyond the sex/gender congruence rule carried by the table itself.

use chrono::NaiveDate;

use crate::domain::{
    age_in_years, AdjustmentTable, Attribute, AttributeSet, Contribution, EstimateModel,
    EstimateResult, LifeTable, Sex,
};
use crate::ports::{AdjustmentSource, Clock};
use crate::MementoError;

/// Service for computing life-expectancy estimates.
///
/// Holds a read-only adjustment table and a clock. Every call is a pure
/// function of the birth date, the attributes, and the clock reading.
pub struct Estimator<C>
where
    C: Clock,
{
    table: AdjustmentTable,
    life_table: LifeTable,
    clock: C,
    model: EstimateModel,
}

impl<C> Estimator<C>
where
    C: Clock,
{
    /// Create an estimator using the period model.
    pub fn new(table: AdjustmentTable, clock: C) -> Self {
        Self {
            table,
            life_table: LifeTable,
            clock,
            model: EstimateModel::Period,
        }
    }

    /// Create an estimator from a table source.
    ///
    /// # Errors
    /// Returns error if the source cannot produce a valid table.
    pub fn from_source<S>(source: &S, clock: C) -> crate::Result<Self>
    where
        S: AdjustmentSource + ?Sized,
    {
        tracing::debug!("Loading {}", source.describe());
        Ok(Self::new(source.load()?, clock))
    }

    /// Select the baseline model.
    #[must_use]
    pub fn with_model(mut self, model: EstimateModel) -> Self {
        self.model = model;
        self
    }

    /// Estimate the expected end of life.
    ///
    /// The period model starts from the table's baseline. The conditional
    /// model starts from the life table at the current age (sex defaults to
    /// the averaged intersex rows) and skips the sex delta, which the life
    /// table already accounts for.
    ///
    /// # Errors
    /// Returns `InvalidDate` if `birth_date` is after today.
    pub fn estimate(
        &self,
        birth_date: NaiveDate,
        attributes: &AttributeSet,
    ) -> crate::Result<EstimateResult> {
        let now = self.clock.now();
        if birth_date > now.date() {
            return Err(MementoError::InvalidDate(format!(
                "{birth_date} is in the future"
            )));
        }

        let sex = attributes.sex();
        let baseline_years = match self.model {
            EstimateModel::Period => self.table.baseline_years,
            EstimateModel::Conditional => self.life_table.conditional_expectancy(
                age_in_years(birth_date, now),
                sex.unwrap_or(Sex::Intersex),
            ),
        };

        let contributions: Vec<Contribution> = attributes
            .iter()
            .filter(|a| !(self.model == EstimateModel::Conditional && matches!(a, Attribute::Sex(_))))
            .map(|a| {
                let years = self.table.delta(*a, sex);
                tracing::debug!("Adjustment {} {:+.2} years", a, years);
                Contribution {
                    attribute: a.to_string(),
                    years,
                }
            })
            .collect();

        let result = EstimateResult::new(birth_date, now, self.model, baseline_years, contributions);

        tracing::info!(
            "Estimated {:.2} years ({} model, {} attributes)",
            result.expectancy_years,
            self.model,
            attributes.len()
        );
        if result.is_past_expectancy() {
            tracing::warn!("Already past the estimated expectancy");
        }

        Ok(result)
    }
}
