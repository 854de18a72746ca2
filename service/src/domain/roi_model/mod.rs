//! [`RoiModel`] definitions.

mod input;

use std::{collections::BTreeSet, sync::LazyLock};

use common::{unit, DateTime, DateTimeOf, Percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use tracing as log;
use uuid::Uuid;

use super::{
    calculator::{self, CostInputs, LoanLimitsInfo},
    education_cost::{LivingConditionType, ResidencyType},
    education_level::YearsOfCollege,
    entity::Entity,
    lookup::{Expense, Institution, InstructionalProgram, Location, Occupation},
    CareerGoal, CurrentInformation, EducationCost, EducationCostRefinement,
    EducationFinancing, EducationLevel, ValidationError,
};
use crate::{
    dto::{CareerGoalDto, EducationCostDto, EducationFinancingDto},
    mapper::Mapper as _,
};

pub use self::input::{Hash, RoiCalculatorInput, RoiCalculatorOutput};

/// [`RoiModel`] configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// Retirement age assumed when a user doesn't specify one.
    #[default(67)]
    pub default_retirement_age: u8,

    /// Years to complete a degree assumed when a user doesn't specify them.
    #[default(4)]
    pub years_to_complete_default: u8,

    /// [`YearsOfCollege`] seeded when a degree level is chosen.
    pub years_of_college: YearsOfCollege,

    /// Search radius around ZIP codes, in miles.
    #[default(50)]
    pub radius_in_miles: u16,

    /// Expected family contribution estimated when only an income range is
    /// known.
    #[default(Decimal::from_parts(3500, 0, 0, false, 0))]
    pub estimated_efc: Decimal,

    /// Years to pay off federal loans assumed by default.
    #[default(10)]
    pub years_to_pay_off_federal_loan: u8,

    /// Years to pay off private loans assumed by default.
    #[default(10)]
    pub years_to_pay_off_private_loan: u8,

    /// Indicator whether required fields are enforced when mapping DTOs
    /// into domain entities.
    pub strict_validation: bool,
}

/// Single named what-if scenario of a user.
#[derive(Clone, Debug)]
pub struct RoiModel {
    /// Identified [`Props`] of this [`RoiModel`].
    entity: Entity<Id, Props>,

    /// [`Config`] this [`RoiModel`] operates with.
    config: Config,

    /// Last calculated [`RoiCalculatorInput`].
    roi_calculator_input: Option<RoiCalculatorInput>,

    /// [`Hash`] of the last calculated [`RoiCalculatorInput`].
    ///
    /// [`Hash`]: struct@Hash
    hash: Option<Hash>,

    /// [`RoiCalculatorOutput`] of the last calculation.
    roi_calculator_output: Option<RoiCalculatorOutput>,
}

/// Properties of a [`RoiModel`].
#[derive(Clone, Debug)]
pub struct Props {
    /// [`Name`] of the [`RoiModel`].
    pub name: Name,

    /// [`CareerGoal`] of the [`RoiModel`].
    pub career_goal: CareerGoal,

    /// [`EducationCost`] of the [`RoiModel`].
    pub education_cost: EducationCost,

    /// [`EducationCostRefinement`] of the [`RoiModel`], if any.
    pub education_cost_refinement: Option<EducationCostRefinement>,

    /// [`EducationFinancing`] of the [`RoiModel`].
    pub education_financing: EducationFinancing,

    /// Search radius around ZIP codes, in miles.
    pub radius_in_miles: u16,

    /// [`DateTime`] when the [`RoiModel`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when the [`RoiModel`] was last updated.
    pub updated_at: ModificationDateTime,
}

/// Annual expense with its yearly raise as a fraction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ExpenseInfo {
    /// Amount of the expense.
    pub expense_amount: Decimal,

    /// Yearly raise of the expense, as a fraction.
    pub percent_change_from_last_year: Decimal,
}

impl RoiModel {
    /// Creates a new [`RoiModel`] with the provided [`Name`] and default
    /// properties.
    #[must_use]
    pub fn new(name: Name, config: Config) -> Self {
        let now = DateTime::now();
        Self::from_parts(
            Id::new(),
            Props {
                name,
                career_goal: CareerGoal::new(&config),
                education_cost: EducationCost::new(&config),
                education_cost_refinement: None,
                education_financing: EducationFinancing::new(&config),
                radius_in_miles: config.radius_in_miles,
                created_at: now.coerce(),
                updated_at: now.coerce(),
            },
            config,
        )
    }

    /// Creates a [`RoiModel`] out of already existing parts.
    #[must_use]
    pub fn from_parts(id: Id, props: Props, config: Config) -> Self {
        Self {
            entity: Entity::new(id, props),
            config,
            roi_calculator_input: None,
            hash: None,
            roi_calculator_output: None,
        }
    }

    /// Returns ID of this [`RoiModel`].
    #[must_use]
    pub fn id(&self) -> Id {
        *self.entity.id()
    }

    /// Returns [`Props`] of this [`RoiModel`].
    #[must_use]
    pub fn props(&self) -> &Props {
        self.entity.props()
    }

    /// Returns [`Name`] of this [`RoiModel`].
    #[must_use]
    pub fn name(&self) -> &Name {
        &self.props().name
    }

    /// Returns [`CareerGoal`] of this [`RoiModel`].
    #[must_use]
    pub fn career_goal(&self) -> &CareerGoal {
        &self.props().career_goal
    }

    /// Returns [`EducationCost`] of this [`RoiModel`].
    #[must_use]
    pub fn education_cost(&self) -> &EducationCost {
        &self.props().education_cost
    }

    /// Returns [`EducationCostRefinement`] of this [`RoiModel`], if any.
    #[must_use]
    pub fn education_cost_refinement(&self) -> Option<&EducationCostRefinement> {
        self.props().education_cost_refinement.as_ref()
    }

    /// Returns [`EducationFinancing`] of this [`RoiModel`].
    #[must_use]
    pub fn education_financing(&self) -> &EducationFinancing {
        &self.props().education_financing
    }

    /// Returns the last calculated [`RoiCalculatorInput`].
    #[must_use]
    pub fn roi_calculator_input(&self) -> Option<&RoiCalculatorInput> {
        self.roi_calculator_input.as_ref()
    }

    /// Returns the [`Hash`] of the last calculated [`RoiCalculatorInput`].
    ///
    /// [`Hash`]: struct@Hash
    #[must_use]
    pub fn hash(&self) -> Option<Hash> {
        self.hash
    }

    /// Returns the [`RoiCalculatorOutput`] of the last calculation.
    #[must_use]
    pub fn roi_calculator_output(&self) -> Option<&RoiCalculatorOutput> {
        self.roi_calculator_output.as_ref()
    }

    /// Returns the [`Config`] of this [`RoiModel`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of years the degree takes to complete.
    #[must_use]
    pub fn years_to_complete_degree(&self) -> u8 {
        self.education_cost().years_to_complete_degree()
    }

    /// Indicates whether the [`CareerGoal`] is complete.
    #[must_use]
    pub fn is_career_goal_valid(&self) -> bool {
        self.career_goal().is_valid()
    }

    /// Indicates whether the [`EducationCost`] is complete.
    #[must_use]
    pub fn is_education_cost_valid(&self) -> bool {
        self.education_cost().is_valid()
    }

    /// Indicates whether nothing was changed in this [`RoiModel`] since its
    /// creation, apart from its [`Name`].
    #[must_use]
    pub fn is_default(&self) -> bool {
        let props = self.props();
        props.career_goal == CareerGoal::new(&self.config)
            && props.education_cost == EducationCost::new(&self.config)
            && props.education_cost_refinement.is_none()
            && props.education_financing == EducationFinancing::new(&self.config)
    }

    /// Renames this [`RoiModel`].
    pub fn update_name(&mut self, name: Name) {
        self.entity.props_mut().name = name;
    }

    /// Replaces the [`CareerGoal`] of this [`RoiModel`].
    ///
    /// The degree level is seeded from the typical education level of the
    /// targeted occupation whenever it maps to an [`EducationLevel`],
    /// overriding the provided one. The years to complete the degree are
    /// always seeded from the resulting degree level.
    ///
    /// # Errors
    ///
    /// If the provided [`CareerGoalDto`] doesn't form a valid [`CareerGoal`].
    pub fn update_career_goal(
        &mut self,
        dto: CareerGoalDto,
    ) -> Result<(), ValidationError> {
        let seeded_level = dto
            .occupation
            .as_ref()
            .and_then(|o| o.typical_education_level_group_id)
            .and_then(EducationLevel::from_group_id);

        let mut career_goal = CareerGoal::to_domain(dto, &self.config)?;
        if seeded_level.is_some() {
            career_goal = career_goal.with_degree_level(seeded_level);
        }
        let years = career_goal.years_of_college(&self.config.years_of_college);

        let config = self.config;
        let props = self.entity.props_mut();
        props.career_goal = career_goal;
        props.education_cost = props
            .education_cost
            .clone()
            .with_years_to_complete_degree(Some(years), &config);
        self.touch();
        Ok(())
    }

    /// Replaces the [`Location`] of the [`CareerGoal`].
    pub fn set_career_goal_location(&mut self, location: Option<Location>) {
        self.update_career_goal_with(|g| g.with_location(location));
    }

    /// Replaces the [`Occupation`] of the [`CareerGoal`].
    pub fn set_career_goal_occupation(
        &mut self,
        occupation: Option<Occupation>,
    ) {
        self.update_career_goal_with(|g| g.with_occupation(occupation));
    }

    /// Replaces the degree [`EducationLevel`] of the [`CareerGoal`].
    pub fn set_career_goal_degree_level(
        &mut self,
        degree_level: Option<EducationLevel>,
    ) {
        self.update_career_goal_with(|g| g.with_degree_level(degree_level));
    }

    /// Replaces the degree [`InstructionalProgram`] of the [`CareerGoal`].
    pub fn set_career_goal_degree_program(
        &mut self,
        degree_program: Option<InstructionalProgram>,
    ) {
        self.update_career_goal_with(|g| g.with_degree_program(degree_program));
    }

    /// Replaces the retirement age of the [`CareerGoal`].
    pub fn set_career_goal_retirement_age(&mut self, retirement_age: Option<u8>) {
        let config = self.config;
        self.update_career_goal_with(|g| {
            g.with_retirement_age(retirement_age, &config)
        });
    }

    /// Replaces the [`EducationCost`] of this [`RoiModel`].
    ///
    /// Projects the out-of-pocket expenses into the [`EducationFinancing`],
    /// and names this [`RoiModel`] after the [`Institution`] if it still has
    /// a default [`Name`].
    ///
    /// # Errors
    ///
    /// If the provided [`EducationCostDto`] doesn't form a valid
    /// [`EducationCost`].
    pub fn update_education_cost(
        &mut self,
        dto: EducationCostDto,
        current_information: &CurrentInformation,
    ) -> Result<(), ValidationError> {
        let education_cost = EducationCost::to_domain(dto, &self.config)?;
        self.entity.props_mut().education_cost = education_cost;

        let expenses = self.out_of_pocket_expenses_by_year(current_information);
        let props = self.entity.props_mut();
        props.education_financing = props
            .education_financing
            .clone()
            .with_out_of_pocket_expenses_by_year(expenses);

        if props.name.is_first_default() {
            if let Some(name) = props.education_cost.institution_name() {
                props.name = Name::from(name.to_owned());
            }
        }
        self.touch();
        Ok(())
    }

    /// Replaces the [`Institution`] of the [`EducationCost`].
    pub fn set_education_cost_institution(
        &mut self,
        institution: Option<Institution>,
    ) {
        self.update_education_cost_with(|c| c.with_institution(institution));
    }

    /// Replaces the start year of the [`EducationCost`].
    pub fn set_education_cost_start_year(&mut self, start_year: Option<i32>) {
        self.update_education_cost_with(|c| c.with_start_year(start_year));
    }

    /// Replaces the full time indicator of the [`EducationCost`].
    pub fn set_education_cost_fulltime(&mut self, is_fulltime: Option<bool>) {
        self.update_education_cost_with(|c| c.with_fulltime(is_fulltime));
    }

    /// Replaces the years to complete the degree of the [`EducationCost`].
    pub fn set_education_cost_years_to_complete(&mut self, years: Option<u8>) {
        let config = self.config;
        self.update_education_cost_with(|c| {
            c.with_years_to_complete_degree(years, &config)
        });
    }

    /// Replaces the [`EducationCostRefinement`] of this [`RoiModel`].
    pub fn update_education_cost_refinement(
        &mut self,
        refinement: Option<EducationCostRefinement>,
    ) {
        self.entity.props_mut().education_cost_refinement = refinement;
        self.touch();
    }

    /// Replaces the [`EducationFinancing`] of this [`RoiModel`].
    ///
    /// # Errors
    ///
    /// If the provided [`EducationFinancingDto`] doesn't form a valid
    /// [`EducationFinancing`].
    pub fn update_education_financing(
        &mut self,
        dto: EducationFinancingDto,
    ) -> Result<(), ValidationError> {
        self.entity.props_mut().education_financing =
            EducationFinancing::to_domain(dto, &self.config)?;
        self.touch();
        Ok(())
    }

    /// Resets the [`EducationFinancing`] of this [`RoiModel`] to defaults.
    pub fn clear_education_financing(&mut self) {
        self.entity.props_mut().education_financing =
            EducationFinancing::new(&self.config);
    }

    /// Calculates the [`RoiCalculatorInput`] of this [`RoiModel`] and its
    /// [`Hash`].
    ///
    /// Returns `true` if the [`Hash`] has changed, meaning the external ROI
    /// calculator should run again, or `false` if the current
    /// [`RoiCalculatorOutput`] remains valid.
    ///
    /// [`Hash`]: struct@Hash
    pub fn calculate_roi_calculator_input(
        &mut self,
        current_information: &CurrentInformation,
    ) -> bool {
        let input = self.build_roi_calculator_input(current_information);
        let hash = Hash::new(&input);

        if self.hash == Some(hash) {
            return false;
        }
        log::debug!(roi_model.id = %self.id(), %hash, "hash changed");
        self.hash = Some(hash);
        self.roi_calculator_input = Some(input);
        true
    }

    /// Stores the provided [`RoiCalculatorOutput`] of the last calculation.
    pub fn update_roi_calculator_output(&mut self, output: RoiCalculatorOutput) {
        self.roi_calculator_output = Some(output);
    }

    /// Restores the previously calculated [`RoiCalculatorInput`] and
    /// [`RoiCalculatorOutput`], recomputing the [`Hash`] of the input.
    ///
    /// [`Hash`]: struct@Hash
    pub fn restore_calculation(
        &mut self,
        input: Option<RoiCalculatorInput>,
        output: Option<RoiCalculatorOutput>,
    ) {
        self.hash = input.as_ref().map(Hash::new);
        self.roi_calculator_input = input;
        self.roi_calculator_output = output;
    }

    /// Resolves the tuition and fees according to the [`ResidencyType`].
    ///
    /// Defaults to the in-state ones. Absent values fall back to the
    /// in-district and then to the in-state ones.
    #[must_use]
    pub fn tuition_and_fees_info(&self) -> ExpenseInfo {
        let Some(info) = self
            .institution()
            .and_then(|i| i.cost_of_attendance_info.tuition_and_fees)
        else {
            return ExpenseInfo::default();
        };

        let residency = self
            .education_cost_refinement()
            .and_then(|r| r.residency_type)
            .unwrap_or(ResidencyType::InState);
        let chosen = match residency {
            ResidencyType::Unknown | ResidencyType::InState => info.in_state,
            ResidencyType::InDistrict => info.in_district,
            ResidencyType::OutState => info.out_of_state,
        };

        resolve_expense(chosen, &[info.in_district, info.in_state])
    }

    /// Resolves the books and supplies expense.
    #[must_use]
    pub fn books_and_supplies_info(&self) -> ExpenseInfo {
        let expense = self
            .institution()
            .and_then(|i| i.cost_of_attendance_info.books_and_supplies)
            .unwrap_or_default();

        ExpenseInfo {
            expense_amount: expense.expense_amount.unwrap_or_default(),
            percent_change_from_last_year: fraction(
                expense.percent_change_from_last_year,
            ),
        }
    }

    /// Resolves the room and board according to the
    /// [`LivingConditionType`].
    ///
    /// Defaults to the on-campus one. Living with family costs nothing,
    /// however any absent value falls back to the on-campus and then to the
    /// off-campus one.
    #[must_use]
    pub fn room_and_board_info(&self) -> ExpenseInfo {
        let Some(info) = self
            .institution()
            .and_then(|i| i.cost_of_attendance_info.living_arrangement)
        else {
            return ExpenseInfo::default();
        };

        let chosen = match self.living_condition_type() {
            LivingConditionType::Unknown | LivingConditionType::OnCampus => {
                info.on_campus.room_and_board
            }
            LivingConditionType::OffCampusNotWithFamily => {
                info.off_campus_not_with_family.room_and_board
            }
            LivingConditionType::OffCampusWithFamily => Expense::default(),
        };

        resolve_expense(
            chosen,
            &[
                info.on_campus.room_and_board,
                info.off_campus_not_with_family.room_and_board,
            ],
        )
    }

    /// Resolves the other living expenses according to the
    /// [`LivingConditionType`].
    ///
    /// Defaults to the on-campus ones, falling back to the on-campus,
    /// off-campus and with family ones in order.
    #[must_use]
    pub fn other_living_expenses_info(&self) -> ExpenseInfo {
        let Some(info) = self
            .institution()
            .and_then(|i| i.cost_of_attendance_info.living_arrangement)
        else {
            return ExpenseInfo::default();
        };

        let chosen = match self.living_condition_type() {
            LivingConditionType::Unknown | LivingConditionType::OnCampus => {
                info.on_campus.other_expenses
            }
            LivingConditionType::OffCampusNotWithFamily => {
                info.off_campus_not_with_family.other_expenses
            }
            LivingConditionType::OffCampusWithFamily => {
                info.off_campus_with_family.other_expenses
            }
        };

        resolve_expense(
            chosen,
            &[
                info.on_campus.other_expenses,
                info.off_campus_not_with_family.other_expenses,
                info.off_campus_with_family.other_expenses,
            ],
        )
    }

    /// Projects the cost of attendance for each year of study.
    #[must_use]
    pub fn cost_of_attendance_by_year(
        &self,
        current_information: &CurrentInformation,
    ) -> Vec<Decimal> {
        let tuition = self.tuition_and_fees_info();
        let books = self.books_and_supplies_info();
        let room = self.room_and_board_info();
        let other = self.other_living_expenses_info();

        calculator::cost_of_attendance_by_year(
            &CostInputs {
                tuition_and_fees: tuition.expense_amount,
                tuition_and_fees_raise: tuition.percent_change_from_last_year,
                books_and_supplies: books.expense_amount,
                books_and_supplies_raise: books.percent_change_from_last_year,
                room_and_board: room.expense_amount,
                room_and_board_raise: room.percent_change_from_last_year,
                other_living_expenses: other.expense_amount,
                other_living_expenses_raise: other
                    .percent_change_from_last_year,
            },
            self.years_to_complete_degree(),
            self.starting_year_delay(current_information),
        )
    }

    /// Sums the cost of attendance over all the years of study.
    #[must_use]
    pub fn cumulative_cost_of_attendance(
        &self,
        current_information: &CurrentInformation,
    ) -> Decimal {
        self.cost_of_attendance_by_year(current_information)
            .into_iter()
            .sum()
    }

    /// Returns the grant and scholarship aid excluding the Pell grant.
    #[must_use]
    pub fn grant_or_scholarship_aid_excluding_pell_grant(&self) -> Decimal {
        self.education_cost()
            .grant_or_scholarship_aid_excluding_pell_grant()
    }

    /// Returns the number of years before the enrollment starts.
    ///
    /// A high school student waits for their graduation, while a start year
    /// further in the future postpones the enrollment even more.
    #[must_use]
    pub fn starting_year_delay(
        &self,
        current_information: &CurrentInformation,
    ) -> u8 {
        let level = current_information
            .education_level()
            .map_or(0, EducationLevel::value);
        let delay = if level < 0 { level.unsigned_abs() } else { 0 };

        let current_year = DateTime::now().year();
        let years_to_wait = self.education_cost().start_year() - current_year;
        if years_to_wait > i32::from(delay) {
            u8::try_from(years_to_wait).unwrap_or(u8::MAX)
        } else {
            delay
        }
    }

    /// Returns the expected family contribution.
    ///
    /// The refined one is preferred. Otherwise, it's estimated when the
    /// family income range is known.
    #[must_use]
    pub fn efc(&self) -> Option<Decimal> {
        use super::education_cost::IncomeRange;

        self.education_cost_refinement()
            .and_then(|r| r.expected_family_contribution)
            .or_else(|| {
                (self.education_cost().income_range() != IncomeRange::Unknown)
                    .then_some(self.config.estimated_efc)
            })
    }

    /// Calculates the Pell grant aid for each year of study.
    #[must_use]
    pub fn pell_grant_aid_by_year(
        &self,
        current_information: &CurrentInformation,
    ) -> Vec<Decimal> {
        calculator::pell_grant_aid_by_year(
            self.efc(),
            self.education_cost().participation(),
            &self.cost_of_attendance_by_year(current_information),
            self.years_to_complete_degree(),
        )
    }

    /// Calculates the net price for each year of study.
    #[must_use]
    pub fn net_price_by_year(
        &self,
        current_information: &CurrentInformation,
    ) -> Vec<Decimal> {
        calculator::net_price_by_year(
            &self.cost_of_attendance_by_year(current_information),
            self.grant_or_scholarship_aid_excluding_pell_grant(),
            &self.pell_grant_aid_by_year(current_information),
            self.years_to_complete_degree(),
        )
    }

    /// Returns the federal loan limits for each year of study.
    #[must_use]
    pub fn loan_limits_info(&self) -> LoanLimitsInfo {
        calculator::loan_limits_info(
            !self.education_financing().is_tax_dependent(),
            self.years_to_complete_degree(),
        )
    }

    /// Returns the expenses paid out of pocket for each year of study.
    ///
    /// The ones provided by the user are preferred, otherwise the net price
    /// is projected. Without an [`Institution`] or years of study, it's a
    /// single zero.
    #[must_use]
    pub fn out_of_pocket_expenses_by_year(
        &self,
        current_information: &CurrentInformation,
    ) -> Vec<Decimal> {
        if self.years_to_complete_degree() == 0 || self.institution().is_none()
        {
            return vec![Decimal::ZERO];
        }

        let provided = self.education_financing().out_of_pocket_expenses_by_year();
        if provided.is_empty() {
            self.net_price_by_year(current_information)
        } else {
            provided.to_vec()
        }
    }

    /// Builds the [`RoiCalculatorInput`] out of the current state.
    fn build_roi_calculator_input(
        &self,
        current_information: &CurrentInformation,
    ) -> RoiCalculatorInput {
        let career_goal = self.career_goal();
        let education_cost = self.education_cost();
        let financing = self.education_financing();
        let tuition = self.tuition_and_fees_info();
        let room = self.room_and_board_info();

        let current_zip_code =
            current_information.location().map(|l| l.zip_code.clone());
        let retirement = i16::from(career_goal.retirement_age())
            - i16::from(current_information.current_age().unwrap_or(0));
        let ones = || vec![Decimal::ONE; 3];

        RoiCalculatorInput {
            goal_zip_code: career_goal
                .location()
                .map(|l| l.zip_code.clone())
                .or_else(|| current_zip_code.clone()),
            current_zip_code,
            distance: self.props().radius_in_miles,
            current_state_onet_code: current_information
                .occupation()
                .map(|o| o.onet_code.clone())
                .into_iter()
                .collect(),
            current_state_occupation_title: current_information
                .occupation()
                .map(|o| o.title.clone()),
            goal_state_onet_code: career_goal
                .occupation()
                .map(|o| o.onet_code.clone())
                .into_iter()
                .collect(),
            goal_state_occupation_title: career_goal
                .occupation()
                .map(|o| o.title.clone()),
            start_degree_level: current_information
                .education_level()
                .map_or(0, EducationLevel::index),
            end_degree_level: career_goal
                .degree_level()
                .map_or(0, EducationLevel::index),
            years_of_college: self.years_to_complete_degree(),
            years_to_retirement: u8::try_from(retirement.max(1))
                .unwrap_or(u8::MAX),
            tuition_and_fees: tuition.expense_amount,
            tuition_and_fees_raise: tuition.percent_change_from_last_year,
            living_arrangement_cost: room.expense_amount,
            living_arrangement_cost_raise: room.percent_change_from_last_year,
            independent: !financing.is_tax_dependent(),
            ibr_federal: financing.prefers_income_based_repayment(),
            months_to_payoff_federal_loan: financing
                .months_to_pay_off_federal_loan(),
            months_to_payoff_private_loan: financing
                .months_to_pay_off_private_loan(),
            annual_expense_from_savings: self
                .out_of_pocket_expenses_by_year(current_information),
            efc: self.efc(),
            participation: education_cost.participation(),
            work_during_study: false,
            ipeds_graduation_time_factor: vec![
                Decimal::ONE,
                Decimal::new(15, 1),
                Decimal::TWO,
            ],
            ipeds_graduation_probability: ones(),
            ipeds_retention_rate: ones(),
            grant_or_scholarship_aid_excluding_pell_grant: education_cost
                .grant_or_scholarship_aid_excluding_pell_grant(),
            starting_year_delay: self.starting_year_delay(current_information),
            no_loans: false,
        }
    }

    /// Returns the [`Institution`] of the [`EducationCost`].
    fn institution(&self) -> Option<&Institution> {
        self.education_cost().institution()
    }

    /// Returns the [`LivingConditionType`] of the [`EducationCostRefinement`],
    /// defaulting to [`LivingConditionType::OnCampus`].
    fn living_condition_type(&self) -> LivingConditionType {
        self.education_cost_refinement()
            .and_then(|r| r.living_condition_type)
            .unwrap_or(LivingConditionType::OnCampus)
    }

    /// Replaces the [`CareerGoal`] with the result of the provided function.
    fn update_career_goal_with(&mut self, f: impl FnOnce(CareerGoal) -> CareerGoal) {
        let props = self.entity.props_mut();
        props.career_goal = f(props.career_goal.clone());
    }

    /// Replaces the [`EducationCost`] with the result of the provided
    /// function.
    fn update_education_cost_with(
        &mut self,
        f: impl FnOnce(EducationCost) -> EducationCost,
    ) {
        let props = self.entity.props_mut();
        props.education_cost = f(props.education_cost.clone());
    }

    /// Marks this [`RoiModel`] as updated right now.
    fn touch(&mut self) {
        self.entity.props_mut().updated_at = DateTimeOf::now();
    }
}

/// Resolves the `chosen` [`Expense`], falling back to the first present
/// amount (and raise, independently) of the `fallbacks` when the chosen one
/// is absent or zero.
fn resolve_expense(chosen: Expense, fallbacks: &[Expense]) -> ExpenseInfo {
    let amount = chosen.amount().or_else(|| {
        fallbacks.iter().find_map(|e| e.expense_amount)
    });
    let raise = chosen.change().or_else(|| {
        fallbacks.iter().find_map(|e| e.percent_change_from_last_year)
    });

    ExpenseInfo {
        expense_amount: amount.unwrap_or_default(),
        percent_change_from_last_year: fraction(raise),
    }
}

/// Converts the optional [`Percent`] into a fraction, treating [`None`] as
/// zero.
fn fraction(percent: Option<Percent>) -> Decimal {
    percent.map(Percent::fraction).unwrap_or_default()
}

/// ID of a [`RoiModel`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`RoiModel`].
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, From, Hash, PartialEq,
    Serialize,
)]
#[as_ref(str, String)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    /// Base of the default [`Name`]s.
    pub const DEFAULT: &'static str = "Default ROI Model";

    /// Creates the first default [`Name`].
    #[must_use]
    pub fn default_first() -> Self {
        Self(Self::DEFAULT.to_owned())
    }

    /// Creates the next default [`Name`] not clashing with the provided
    /// ones: its ordinal follows the greatest existing one.
    #[must_use]
    pub fn next_default<'a>(existing: impl IntoIterator<Item = &'a Self>) -> Self {
        let taken = existing
            .into_iter()
            .filter_map(Self::default_ordinal)
            .collect::<BTreeSet<_>>();
        let next = match taken.last() {
            None => 1,
            Some(max) => max.checked_add(1).unwrap_or_else(|| {
                (1..).find(|n| !taken.contains(n)).unwrap_or(u64::MAX)
            }),
        };
        Self(format!("{} {next}", Self::DEFAULT))
    }

    /// Indicates whether this [`Name`] is a default one.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.default_ordinal().is_some()
    }

    /// Indicates whether this [`Name`] is the unsuffixed default one, given to
    /// the first [`RoiModel`] of a user.
    #[must_use]
    pub fn is_first_default(&self) -> bool {
        self.0 == Self::DEFAULT
    }

    /// Returns the ordinal of this [`Name`] if it's a default one.
    ///
    /// The unsuffixed default [`Name`] has the ordinal `0`.
    fn default_ordinal(&self) -> Option<u64> {
        /// Regular expression matching default [`Name`]s.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^Default ROI Model(?:\s+(\d+))?$").expect("valid regex")
        });

        let caps = REGEX.captures(&self.0)?;
        Some(caps.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0))
    }
}

/// [`DateTime`] when a [`RoiModel`] was created.
pub type CreationDateTime = DateTimeOf<(RoiModel, unit::Creation)>;

/// [`DateTime`] when a [`RoiModel`] was last updated.
pub type ModificationDateTime = DateTimeOf<(RoiModel, unit::Modification)>;
