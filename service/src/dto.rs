//! Transport shapes of the domain entities.
//!
//! Every DTO (de)serializes with `camelCase` field names, and treats absent
//! fields as empty.

use common::DateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    career_goal::CareerGoalPath,
    education_cost::IncomeRange,
    lookup::{Institution, InstructionalProgram, Location, Occupation},
    roi_aggregate,
    roi_model::{self, Hash, RoiCalculatorInput, RoiCalculatorOutput},
    EducationCostRefinement, EducationLevel,
};

/// Whole [`RoiAggregate`] as it's persisted.
///
/// [`RoiAggregate`]: crate::domain::RoiAggregate
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RoiModelToSaveDto {
    /// ID of the [`RoiAggregate`].
    ///
    /// [`RoiAggregate`]: crate::domain::RoiAggregate
    pub roi_aggregate_id: roi_aggregate::Id,

    /// ID of the active [`RoiModel`].
    ///
    /// [`RoiModel`]: crate::domain::RoiModel
    pub active_roi_model_id: roi_model::Id,

    /// Shared [`CurrentInformationDto`].
    pub current_information: CurrentInformationDto,

    /// All the [`RoiModelDto`]s.
    pub roi_model_list: Vec<RoiModelDto>,
}

/// Single [`RoiModel`] along with its derived projections.
///
/// [`RoiModel`]: crate::domain::RoiModel
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[expect(missing_docs, reason = "mirrors the domain entity")]
#[serde(default, rename_all = "camelCase")]
pub struct RoiModelDto {
    pub roi_model_id: Option<roi_model::Id>,
    pub roi_aggregate_id: roi_aggregate::Id,
    pub name: String,
    pub current_information: Option<CurrentInformationDto>,
    pub career_goal: Option<CareerGoalDto>,
    pub education_cost: Option<EducationCostDto>,
    pub education_cost_refinement: Option<EducationCostRefinement>,
    pub education_financing: Option<EducationFinancingDto>,
    pub roi_calculator_input: Option<RoiCalculatorInput>,
    pub roi_calculator_input_hash: Option<Hash>,
    pub roi_calculator_output: Option<RoiCalculatorOutput>,
    pub radius_in_miles: Option<u16>,
    #[serde(with = "common::datetime::serde::option")]
    pub date_created: Option<DateTime>,
    #[serde(with = "common::datetime::serde::option")]
    pub last_updated: Option<DateTime>,

    pub cost_of_attendance_by_year: Vec<Decimal>,
    pub grant_or_scholarship_aid_excluding_pell_grant: Decimal,
    pub efc: Option<Decimal>,
    pub net_price_by_year: Vec<Decimal>,
    pub federal_subsidized_loan_limit_by_year: Vec<Decimal>,
    pub federal_unsubsidized_loan_limit_by_year: Vec<Decimal>,
    pub out_of_pocket_expenses_by_year: Vec<Decimal>,

    /// Indicator whether nothing but the name was changed in the
    /// [`RoiModel`].
    ///
    /// [`RoiModel`]: crate::domain::RoiModel
    pub is_default_model: bool,

    /// Indicator whether the [`RoiModel`] can be compared with others.
    ///
    /// [`RoiModel`]: crate::domain::RoiModel
    pub is_ready_for_compare: bool,
}

/// [`CurrentInformation`] DTO.
///
/// [`CurrentInformation`]: crate::domain::CurrentInformation
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[expect(missing_docs, reason = "mirrors the domain entity")]
#[serde(default, rename_all = "camelCase")]
pub struct CurrentInformationDto {
    pub current_age: Option<u8>,
    pub occupation: Option<Occupation>,
    pub location: Option<Location>,
    pub education_level: Option<EducationLevel>,
}

/// [`CareerGoal`] DTO.
///
/// [`CareerGoal`]: crate::domain::CareerGoal
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[expect(missing_docs, reason = "mirrors the domain entity")]
#[serde(default, rename_all = "camelCase")]
pub struct CareerGoalDto {
    pub location: Option<Location>,
    pub occupation: Option<Occupation>,
    pub degree_level: Option<EducationLevel>,
    pub degree_program: Option<InstructionalProgram>,
    pub retirement_age: Option<u8>,
    pub career_goal_path_type: Option<CareerGoalPath>,
}

/// [`EducationCost`] DTO.
///
/// [`EducationCost`]: crate::domain::EducationCost
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[expect(missing_docs, reason = "mirrors the domain entity")]
#[serde(default, rename_all = "camelCase")]
pub struct EducationCostDto {
    pub institution: Option<Institution>,
    pub start_year: Option<i32>,
    pub income_range: Option<IncomeRange>,
    pub is_fulltime: Option<bool>,
    pub years_to_complete_degree: Option<u8>,
}

/// [`EducationFinancing`] DTO.
///
/// [`EducationFinancing`]: crate::domain::EducationFinancing
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[expect(missing_docs, reason = "mirrors the domain entity")]
#[serde(default, rename_all = "camelCase")]
pub struct EducationFinancingDto {
    pub is_tax_dependent: Option<bool>,
    pub prefers_income_based_repayment: Option<bool>,
    pub out_of_pocket_expenses_by_year: Vec<Decimal>,
    pub federal_subsidized_loan_amount_by_year: Vec<Decimal>,
    pub federal_unsubsidized_loan_amount_by_year: Vec<Decimal>,
    pub federal_loan_amount_by_year: Vec<Decimal>,
    pub private_loan_amount_by_year: Vec<Decimal>,
    pub pell_grant_aid_by_year: Vec<Decimal>,
    pub years_to_pay_off_federal_loan: Option<u8>,
    pub years_to_pay_off_private_loan: Option<u8>,
}

/// Choice of the fields carried over when cloning the active [`RoiModel`].
///
/// [`RoiModel`]: crate::domain::RoiModel
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[expect(missing_docs, reason = "mirrors the domain entity")]
#[serde(default, rename_all = "camelCase")]
pub struct CloneRoiModelDto {
    /// Name of the clone. The next default name is used when absent.
    pub model_name: Option<String>,

    pub is_goal_location_cloned: bool,
    pub is_goal_occupation_cloned: bool,
    pub is_goal_degree_level_cloned: bool,
    pub is_goal_degree_program_cloned: bool,
    pub is_goal_retirement_age_cloned: bool,
    pub is_education_cost_institution_cloned: bool,
    pub is_education_cost_start_school_cloned: bool,
    pub is_education_cost_part_time_full_time_cloned: bool,
    pub is_education_cost_years_to_complete_cloned: bool,
}
