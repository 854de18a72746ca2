//! [`EducationCost`] and [`EducationCostRefinement`] definitions.

use common::{define_kind, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{lookup::Institution, roi_model::Config, ValidationError};
use crate::{dto::EducationCostDto, mapper::Mapper};

/// Institution a user plans to attend, along with the enrollment terms.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct EducationCost {
    /// [`Institution`] to attend.
    institution: Option<Institution>,

    /// Year the enrollment starts.
    start_year: i32,

    /// [`IncomeRange`] of the user's family.
    income_range: IncomeRange,

    /// Indicator whether the study is full time.
    is_fulltime: bool,

    /// Number of years the degree takes to complete.
    years_to_complete_degree: u8,
}

define_kind! {
    #[doc = "Annual income range of a family."]
    enum IncomeRange {
        #[doc = "Not specified."]
        Unknown = 0,

        #[doc = "Up to $30,000."]
        UpTo30K = 1,

        #[doc = "From $30,001 to $48,000."]
        From30KTo48K = 2,

        #[doc = "From $48,001 to $75,000."]
        From48KTo75K = 3,

        #[doc = "From $75,001 to $110,000."]
        From75KTo110K = 4,

        #[doc = "Over $110,000."]
        Over110K = 5,
    }
}

define_kind! {
    #[doc = "Residency of a student relative to an [`Institution`]."]
    enum ResidencyType {
        #[doc = "Not specified."]
        Unknown = 0,

        #[doc = "Resident of the institution's district."]
        InDistrict = 1,

        #[doc = "Resident of the institution's state."]
        InState = 2,

        #[doc = "Resident of another state."]
        OutState = 3,
    }
}

define_kind! {
    #[doc = "Living arrangement of a student while studying."]
    enum LivingConditionType {
        #[doc = "Not specified."]
        Unknown = 0,

        #[doc = "Living on campus."]
        OnCampus = 1,

        #[doc = "Living off campus, not with family."]
        OffCampusNotWithFamily = 2,

        #[doc = "Living off campus, with family."]
        OffCampusWithFamily = 3,
    }
}

impl EducationCost {
    /// Creates a new default [`EducationCost`] starting this year.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            institution: None,
            start_year: DateTime::now().year(),
            income_range: IncomeRange::Unknown,
            is_fulltime: true,
            years_to_complete_degree: config.years_to_complete_default,
        }
    }

    /// Returns the [`Institution`] to attend.
    #[must_use]
    pub fn institution(&self) -> Option<&Institution> {
        self.institution.as_ref()
    }

    /// Returns the name of the [`Institution`] to attend.
    #[must_use]
    pub fn institution_name(&self) -> Option<&str> {
        self.institution.as_ref().map(|i| i.name.as_str())
    }

    /// Returns the year the enrollment starts.
    #[must_use]
    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Returns the [`IncomeRange`] of the user's family.
    #[must_use]
    pub fn income_range(&self) -> IncomeRange {
        self.income_range
    }

    /// Indicates whether the study is full time.
    #[must_use]
    pub fn is_fulltime(&self) -> bool {
        self.is_fulltime
    }

    /// Returns the number of years the degree takes to complete.
    #[must_use]
    pub fn years_to_complete_degree(&self) -> u8 {
        self.years_to_complete_degree
    }

    /// Returns the participation factor of the study: `1` for full time and
    /// `0.5` for part time.
    #[must_use]
    pub fn participation(&self) -> Decimal {
        if self.is_fulltime {
            Decimal::ONE
        } else {
            Decimal::new(5, 1)
        }
    }

    /// Returns the average grant and scholarship aid (excluding the Pell
    /// grant) received at the [`Institution`], or zero if unknown.
    #[must_use]
    pub fn grant_or_scholarship_aid_excluding_pell_grant(&self) -> Decimal {
        self.institution
            .as_ref()
            .and_then(|i| i.avg_grant_scholarship_aid_info.as_ref())
            .map(|aid| aid.total_excluding_pell_grant())
            .unwrap_or_default()
    }

    /// Indicates whether an [`Institution`] is chosen.
    ///
    /// The start year and the [`IncomeRange`] always have a value.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.institution.is_some()
    }

    /// Replaces the [`Institution`] to attend.
    #[must_use]
    pub fn with_institution(self, institution: Option<Institution>) -> Self {
        Self {
            institution,
            ..self
        }
    }

    /// Replaces the enrollment start year, falling back to the current year
    /// when [`None`].
    #[must_use]
    pub fn with_start_year(self, start_year: Option<i32>) -> Self {
        Self {
            start_year: start_year.unwrap_or_else(|| DateTime::now().year()),
            ..self
        }
    }

    /// Replaces the [`IncomeRange`], falling back to [`IncomeRange::Unknown`]
    /// when [`None`].
    #[must_use]
    pub fn with_income_range(self, income_range: Option<IncomeRange>) -> Self {
        Self {
            income_range: income_range.unwrap_or(IncomeRange::Unknown),
            ..self
        }
    }

    /// Replaces the full time indicator, falling back to full time when
    /// [`None`].
    #[must_use]
    pub fn with_fulltime(self, is_fulltime: Option<bool>) -> Self {
        Self {
            is_fulltime: is_fulltime.unwrap_or(true),
            ..self
        }
    }

    /// Replaces the number of years to complete the degree, falling back to
    /// the configured default when [`None`].
    #[must_use]
    pub fn with_years_to_complete_degree(
        self,
        years: Option<u8>,
        config: &Config,
    ) -> Self {
        Self {
            years_to_complete_degree: years
                .unwrap_or(config.years_to_complete_default),
            ..self
        }
    }
}

impl Mapper for EducationCost {
    type Dto = EducationCostDto;

    fn to_domain(
        dto: Self::Dto,
        config: &Config,
    ) -> Result<Self, ValidationError> {
        let EducationCostDto {
            institution,
            start_year,
            income_range,
            is_fulltime,
            years_to_complete_degree,
        } = dto;

        if config.strict_validation {
            const ENTITY: &str = "EducationCost";
            ValidationError::require(
                ENTITY,
                "institution",
                institution.as_ref(),
            )?;
            ValidationError::require(ENTITY, "startYear", start_year.as_ref())?;
        }

        Ok(Self::new(config)
            .with_institution(institution)
            .with_start_year(start_year)
            .with_fulltime(is_fulltime)
            .with_years_to_complete_degree(years_to_complete_degree, config)
            .with_income_range(income_range))
    }

    fn to_dto(&self) -> Self::Dto {
        EducationCostDto {
            institution: self.institution.clone(),
            start_year: Some(self.start_year),
            income_range: Some(self.income_range),
            is_fulltime: Some(self.is_fulltime),
            years_to_complete_degree: Some(self.years_to_complete_degree),
        }
    }
}

/// Refinement of an [`EducationCost`] provided by a user who knows their
/// circumstances better than the published averages.
///
/// Only the [`ResidencyType`], the [`LivingConditionType`] and the expected
/// family contribution take part in calculations.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationCostRefinement {
    /// [`ResidencyType`] of the student.
    pub residency_type: Option<ResidencyType>,

    /// [`LivingConditionType`] of the student.
    #[serde(rename = "livingConditionTypeEnum")]
    pub living_condition_type: Option<LivingConditionType>,

    /// Known [`CostOfAttendance`].
    pub cost_of_attendance: Option<CostOfAttendance>,

    /// Known [`GrantsAndScholarships`].
    pub grants_and_scholarships: Option<GrantsAndScholarships>,

    /// Expected family contribution (EFC).
    pub expected_family_contribution: Option<Decimal>,
}

/// Annual cost of attendance known by a user.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct CostOfAttendance {
    /// Tuition and fees.
    pub tuition_and_fees: Option<Decimal>,

    /// Books and supplies.
    pub books_and_supplies: Option<Decimal>,

    /// Room and board.
    pub room_and_board: Option<Decimal>,

    /// Other expenses.
    pub other_expenses: Option<Decimal>,
}

/// Annual grants and scholarships known by a user.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct GrantsAndScholarships {
    /// Federal Pell grant.
    pub federal_pell_grant: Option<Decimal>,

    /// Other federal grants.
    pub other_federal_grants: Option<Decimal>,

    /// State or local grants.
    pub state_or_local_grants: Option<Decimal>,

    /// Institutional grants.
    pub institutional_grants: Option<Decimal>,

    /// Any other grants.
    pub other_grants: Option<Decimal>,

    /// GI Bill benefits.
    pub gi_bill_benefits: Option<Decimal>,

    /// Department of Defense tuition assistance.
    pub dod_tuition_assistance: Option<Decimal>,
}

#[cfg(test)]
mod spec {
    use common::DateTime;
    use rust_decimal_macros::dec;

    use crate::{
        domain::{
            lookup::{
                AidReceived, CostOfAttendanceInfo, GrantScholarshipAidInfo,
                Institution,
            },
            roi_model::Config,
        },
        dto::EducationCostDto,
        mapper::Mapper as _,
    };

    use super::{EducationCost, IncomeRange};

    fn institution(aid: Option<GrantScholarshipAidInfo>) -> Institution {
        Institution {
            unit_id: "166683".into(),
            name: "Massachusetts Institute of Technology".into(),
            cost_of_attendance_info: CostOfAttendanceInfo::default(),
            avg_grant_scholarship_aid_info: aid,
        }
    }

    #[test]
    fn defaults() {
        let cost = EducationCost::new(&Config::default());

        assert_eq!(cost.start_year(), DateTime::now().year());
        assert_eq!(cost.income_range(), IncomeRange::Unknown);
        assert!(cost.is_fulltime());
        assert_eq!(cost.years_to_complete_degree(), 4);
        assert!(!cost.is_valid());
        assert_eq!(cost.participation(), dec!(1));
    }

    #[test]
    fn absent_dto_fields_take_defaults() {
        let cost = EducationCost::to_domain(
            EducationCostDto {
                institution: Some(institution(None)),
                is_fulltime: Some(false),
                ..EducationCostDto::default()
            },
            &Config::default(),
        )
        .unwrap();

        assert!(cost.is_valid());
        assert_eq!(cost.start_year(), DateTime::now().year());
        assert_eq!(cost.years_to_complete_degree(), 4);
        assert_eq!(cost.participation(), dec!(0.5));
        assert_eq!(
            cost.institution_name(),
            Some("Massachusetts Institute of Technology"),
        );
    }

    #[test]
    fn strict_validation_requires_institution() {
        let config = Config {
            strict_validation: true,
            ..Config::default()
        };

        let err = EducationCost::to_domain(
            EducationCostDto {
                start_year: Some(2030),
                ..EducationCostDto::default()
            },
            &config,
        )
        .unwrap_err();
        assert_eq!(err.field, "institution");
    }

    #[test]
    fn grant_aid_treats_missing_parts_as_zero() {
        let config = Config::default();
        let cost = EducationCost::new(&config);
        assert_eq!(cost.grant_or_scholarship_aid_excluding_pell_grant(), dec!(0));

        let aid = GrantScholarshipAidInfo {
            other_federal_grants: AidReceived {
                avg_amount_aid_received: Some(dec!(300)),
            },
            state_local_govt_grant_or_scholarships: AidReceived::default(),
            institutional_grants_or_scholarships: AidReceived {
                avg_amount_aid_received: Some(dec!(2700)),
            },
        };
        let cost = cost.with_institution(Some(institution(Some(aid))));
        assert_eq!(
            cost.grant_or_scholarship_aid_excluding_pell_grant(),
            dec!(3000),
        );
    }

    #[test]
    fn setters_fall_back_to_defaults() {
        let config = Config::default();
        let cost = EducationCost::new(&config)
            .with_start_year(Some(2031))
            .with_fulltime(Some(false))
            .with_years_to_complete_degree(Some(6), &config);
        assert_eq!(cost.start_year(), 2031);
        assert_eq!(cost.years_to_complete_degree(), 6);

        let cost = cost
            .with_start_year(None)
            .with_fulltime(None)
            .with_years_to_complete_degree(None, &config);
        assert_eq!(cost.start_year(), DateTime::now().year());
        assert!(cost.is_fulltime());
        assert_eq!(cost.years_to_complete_degree(), 4);
    }
}
