//! [`RoiCalculatorInput`] and [`RoiCalculatorOutput`] definitions.

use derive_more::{Display, From, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use xxhash_rust::xxh3;

use crate::domain::lookup::ZipCode;

/// Snapshot of a [`RoiModel`] consumed by the external ROI calculator.
///
/// [`RoiModel`]: super::RoiModel
#[derive(
    Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "camelCase")]
pub struct RoiCalculatorInput {
    /// [`ZipCode`] where the user currently lives.
    pub current_zip_code: Option<ZipCode>,

    /// [`ZipCode`] where the career goal is pursued.
    pub goal_zip_code: Option<ZipCode>,

    /// Search radius around the [`ZipCode`]s, in miles.
    pub distance: u16,

    /// O*NET-SOC codes of the current occupation.
    pub current_state_onet_code: Vec<String>,

    /// Title of the current occupation.
    pub current_state_occupation_title: Option<String>,

    /// O*NET-SOC codes of the targeted occupation.
    pub goal_state_onet_code: Vec<String>,

    /// Title of the targeted occupation.
    pub goal_state_occupation_title: Option<String>,

    /// Attained education level.
    pub start_degree_level: u8,

    /// Targeted education level.
    pub end_degree_level: u8,

    /// Years of college to complete the degree.
    pub years_of_college: u8,

    /// Years left before the retirement, at least `1`.
    pub years_to_retirement: u8,

    /// Annual tuition and fees.
    pub tuition_and_fees: Decimal,

    /// Yearly raise of the tuition and fees, as a fraction.
    pub tuition_and_fees_raise: Decimal,

    /// Annual living arrangement cost.
    pub living_arrangement_cost: Decimal,

    /// Yearly raise of the living arrangement cost, as a fraction.
    pub living_arrangement_cost_raise: Decimal,

    /// Indicator whether the student is financially independent.
    pub independent: bool,

    /// Indicator whether income-based repayment of federal loans is used.
    pub ibr_federal: bool,

    /// Months to pay off federal loans.
    pub months_to_payoff_federal_loan: u16,

    /// Months to pay off private loans.
    pub months_to_payoff_private_loan: u16,

    /// Expenses paid from savings, by year of study.
    pub annual_expense_from_savings: Vec<Decimal>,

    /// Expected family contribution.
    pub efc: Option<Decimal>,

    /// Participation factor: `1` for full time and `0.5` for part time.
    pub participation: Decimal,

    /// Indicator whether the student works while studying.
    pub work_during_study: bool,

    /// IPEDS graduation time factors.
    pub ipeds_graduation_time_factor: Vec<Decimal>,

    /// IPEDS graduation probabilities.
    pub ipeds_graduation_probability: Vec<Decimal>,

    /// IPEDS retention rates.
    pub ipeds_retention_rate: Vec<Decimal>,

    /// Grant and scholarship aid, excluding the Pell grant.
    pub grant_or_scholarship_aid_excluding_pell_grant: Decimal,

    /// Years before the enrollment starts.
    pub starting_year_delay: u8,

    /// Indicator whether loans are excluded.
    pub no_loans: bool,
}

/// Result of the external ROI calculator.
///
/// Kept opaque: it's only stored and handed back.
#[derive(Clone, Debug, Deserialize, From, Into, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoiCalculatorOutput(serde_json::Value);

/// Content hash of a [`RoiCalculatorInput`], used to detect whether the
/// external ROI calculator must run again.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Hash(Uuid);

impl Hash {
    /// Calculates a new [`Hash`] of the provided [`RoiCalculatorInput`].
    ///
    /// [`Hash`]: struct@Hash
    #[must_use]
    pub fn new(input: &RoiCalculatorInput) -> Self {
        use std::hash::Hash as _;

        // WARNING: Reordering `RoiCalculatorInput` fields changes every
        //          hash, invalidating all the cached outputs.
        let mut hasher = xxh3::Xxh3Builder::new().build();
        input.hash(&mut hasher);

        Self(Uuid::from_u128(hasher.digest128()))
    }
}
