//! [`EducationFinancing`] definitions.

use rust_decimal::Decimal;

use super::{roi_model::Config, ValidationError};
use crate::{dto::EducationFinancingDto, mapper::Mapper};

/// Way a user finances their education.
///
/// Every series is indexed by the year of study.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EducationFinancing {
    /// Indicator whether the student is a tax dependent of their family.
    is_tax_dependent: bool,

    /// Indicator whether income-based repayment of federal loans is
    /// preferred.
    prefers_income_based_repayment: bool,

    /// Expenses paid out of pocket.
    out_of_pocket_expenses_by_year: Vec<Decimal>,

    /// Federal subsidized loan amounts.
    federal_subsidized_loan_amount_by_year: Vec<Decimal>,

    /// Federal unsubsidized loan amounts.
    federal_unsubsidized_loan_amount_by_year: Vec<Decimal>,

    /// Total federal loan amounts.
    federal_loan_amount_by_year: Vec<Decimal>,

    /// Private loan amounts.
    private_loan_amount_by_year: Vec<Decimal>,

    /// Pell grant aid.
    pell_grant_aid_by_year: Vec<Decimal>,

    /// Years to pay off federal loans.
    years_to_pay_off_federal_loan: u8,

    /// Years to pay off private loans.
    years_to_pay_off_private_loan: u8,
}

impl EducationFinancing {
    /// Creates a new default [`EducationFinancing`] of a tax dependent
    /// student without any amounts set.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            is_tax_dependent: true,
            prefers_income_based_repayment: false,
            out_of_pocket_expenses_by_year: Vec::new(),
            federal_subsidized_loan_amount_by_year: Vec::new(),
            federal_unsubsidized_loan_amount_by_year: Vec::new(),
            federal_loan_amount_by_year: Vec::new(),
            private_loan_amount_by_year: Vec::new(),
            pell_grant_aid_by_year: Vec::new(),
            years_to_pay_off_federal_loan: config.years_to_pay_off_federal_loan,
            years_to_pay_off_private_loan: config.years_to_pay_off_private_loan,
        }
    }

    /// Indicates whether the student is a tax dependent of their family.
    #[must_use]
    pub fn is_tax_dependent(&self) -> bool {
        self.is_tax_dependent
    }

    /// Indicates whether income-based repayment of federal loans is
    /// preferred.
    #[must_use]
    pub fn prefers_income_based_repayment(&self) -> bool {
        self.prefers_income_based_repayment
    }

    /// Returns the expenses paid out of pocket.
    #[must_use]
    pub fn out_of_pocket_expenses_by_year(&self) -> &[Decimal] {
        &self.out_of_pocket_expenses_by_year
    }

    /// Returns the federal subsidized loan amounts.
    #[must_use]
    pub fn federal_subsidized_loan_amount_by_year(&self) -> &[Decimal] {
        &self.federal_subsidized_loan_amount_by_year
    }

    /// Returns the federal unsubsidized loan amounts.
    #[must_use]
    pub fn federal_unsubsidized_loan_amount_by_year(&self) -> &[Decimal] {
        &self.federal_unsubsidized_loan_amount_by_year
    }

    /// Returns the total federal loan amounts.
    #[must_use]
    pub fn federal_loan_amount_by_year(&self) -> &[Decimal] {
        &self.federal_loan_amount_by_year
    }

    /// Returns the private loan amounts.
    #[must_use]
    pub fn private_loan_amount_by_year(&self) -> &[Decimal] {
        &self.private_loan_amount_by_year
    }

    /// Returns the Pell grant aid.
    #[must_use]
    pub fn pell_grant_aid_by_year(&self) -> &[Decimal] {
        &self.pell_grant_aid_by_year
    }

    /// Returns the number of months to pay off federal loans.
    #[must_use]
    pub fn months_to_pay_off_federal_loan(&self) -> u16 {
        u16::from(self.years_to_pay_off_federal_loan) * 12
    }

    /// Returns the number of months to pay off private loans.
    #[must_use]
    pub fn months_to_pay_off_private_loan(&self) -> u16 {
        u16::from(self.years_to_pay_off_private_loan) * 12
    }

    /// Replaces the expenses paid out of pocket.
    #[must_use]
    pub fn with_out_of_pocket_expenses_by_year(
        self,
        expenses: Vec<Decimal>,
    ) -> Self {
        Self {
            out_of_pocket_expenses_by_year: expenses,
            ..self
        }
    }
}

impl Mapper for EducationFinancing {
    type Dto = EducationFinancingDto;

    fn to_domain(
        dto: Self::Dto,
        config: &Config,
    ) -> Result<Self, ValidationError> {
        let defaults = Self::new(config);

        Ok(Self {
            is_tax_dependent: dto
                .is_tax_dependent
                .unwrap_or(defaults.is_tax_dependent),
            prefers_income_based_repayment: dto
                .prefers_income_based_repayment
                .unwrap_or(defaults.prefers_income_based_repayment),
            out_of_pocket_expenses_by_year: dto.out_of_pocket_expenses_by_year,
            federal_subsidized_loan_amount_by_year: dto
                .federal_subsidized_loan_amount_by_year,
            federal_unsubsidized_loan_amount_by_year: dto
                .federal_unsubsidized_loan_amount_by_year,
            federal_loan_amount_by_year: dto.federal_loan_amount_by_year,
            private_loan_amount_by_year: dto.private_loan_amount_by_year,
            pell_grant_aid_by_year: dto.pell_grant_aid_by_year,
            years_to_pay_off_federal_loan: dto
                .years_to_pay_off_federal_loan
                .unwrap_or(defaults.years_to_pay_off_federal_loan),
            years_to_pay_off_private_loan: dto
                .years_to_pay_off_private_loan
                .unwrap_or(defaults.years_to_pay_off_private_loan),
        })
    }

    fn to_dto(&self) -> Self::Dto {
        EducationFinancingDto {
            is_tax_dependent: Some(self.is_tax_dependent),
            prefers_income_based_repayment: Some(
                self.prefers_income_based_repayment,
            ),
            out_of_pocket_expenses_by_year: self
                .out_of_pocket_expenses_by_year
                .clone(),
            federal_subsidized_loan_amount_by_year: self
                .federal_subsidized_loan_amount_by_year
                .clone(),
            federal_unsubsidized_loan_amount_by_year: self
                .federal_unsubsidized_loan_amount_by_year
                .clone(),
            federal_loan_amount_by_year: self.federal_loan_amount_by_year.clone(),
            private_loan_amount_by_year: self.private_loan_amount_by_year.clone(),
            pell_grant_aid_by_year: self.pell_grant_aid_by_year.clone(),
            years_to_pay_off_federal_loan: Some(
                self.years_to_pay_off_federal_loan,
            ),
            years_to_pay_off_private_loan: Some(
                self.years_to_pay_off_private_loan,
            ),
        }
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;

    use crate::{
        domain::roi_model::Config, dto::EducationFinancingDto,
        mapper::Mapper as _,
    };

    use super::EducationFinancing;

    #[test]
    fn defaults() {
        let financing = EducationFinancing::new(&Config::default());

        assert!(financing.is_tax_dependent());
        assert!(!financing.prefers_income_based_repayment());
        assert!(financing.out_of_pocket_expenses_by_year().is_empty());
        assert_eq!(financing.months_to_pay_off_federal_loan(), 120);
        assert_eq!(financing.months_to_pay_off_private_loan(), 120);
    }

    #[test]
    fn maps_dto_with_defaults() {
        let financing = EducationFinancing::to_domain(
            EducationFinancingDto {
                is_tax_dependent: Some(false),
                private_loan_amount_by_year: vec![dec!(1000), dec!(2000)],
                years_to_pay_off_private_loan: Some(5),
                ..EducationFinancingDto::default()
            },
            &Config::default(),
        )
        .unwrap();

        assert!(!financing.is_tax_dependent());
        assert_eq!(
            financing.private_loan_amount_by_year(),
            [dec!(1000), dec!(2000)],
        );
        assert_eq!(financing.months_to_pay_off_private_loan(), 60);
        assert_eq!(financing.months_to_pay_off_federal_loan(), 120);

        let back = EducationFinancing::to_domain(
            financing.to_dto(),
            &Config::default(),
        )
        .unwrap();
        assert_eq!(back, financing);
    }
}
