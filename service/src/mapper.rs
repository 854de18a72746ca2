//! [`Mapper`] definition and [`RoiAggregate`] mapping.

use common::DateTime;
use tracing as log;

use crate::{
    domain::{
        roi_aggregate,
        roi_model::{self, Config, Name, Props},
        CareerGoal, CurrentInformation, EducationCost, EducationFinancing,
        RoiAggregate, RoiModel, ValidationError,
    },
    dto::{RoiModelDto, RoiModelToSaveDto},
};

/// Bidirectional transformation between a domain entity and its DTO.
pub trait Mapper: Sized {
    /// DTO of this entity.
    type Dto;

    /// Builds this entity out of the provided DTO.
    ///
    /// # Errors
    ///
    /// If the DTO doesn't form a valid entity.
    fn to_domain(dto: Self::Dto, config: &Config)
        -> Result<Self, ValidationError>;

    /// Converts this entity into its DTO.
    fn to_dto(&self) -> Self::Dto;
}

impl Mapper for RoiAggregate {
    type Dto = RoiModelToSaveDto;

    /// Builds a [`RoiAggregate`] out of the provided [`RoiModelToSaveDto`].
    ///
    /// [`RoiModel`]s failing to map are skipped.
    fn to_domain(
        dto: Self::Dto,
        config: &Config,
    ) -> Result<Self, ValidationError> {
        map_roi_aggregate(dto, config, config)
    }

    fn to_dto(&self) -> Self::Dto {
        RoiModelToSaveDto {
            roi_aggregate_id: self.id(),
            active_roi_model_id: self.active_roi_model_id(),
            current_information: self.current_information().to_dto(),
            roi_model_list: self
                .roi_model_list()
                .iter()
                .map(|m| {
                    roi_model_to_dto(m, self.id(), self.current_information())
                })
                .collect(),
        }
    }
}

/// Restores a saved [`RoiAggregate`] out of its [`RoiModelToSaveDto`].
///
/// Required fields aren't enforced here, regardless of
/// [`Config::strict_validation`]: a saved [`RoiAggregate`] may be incomplete.
/// The restored [`RoiAggregate`] still operates with the provided [`Config`].
///
/// # Errors
///
/// If the saved state doesn't form a valid entity.
pub fn restore_roi_aggregate(
    dto: RoiModelToSaveDto,
    config: &Config,
) -> Result<RoiAggregate, ValidationError> {
    let lenient = Config {
        strict_validation: false,
        ..*config
    };
    map_roi_aggregate(dto, &lenient, config)
}

/// Maps the provided [`RoiModelToSaveDto`] validating it with the `validation`
/// [`Config`] and building a [`RoiAggregate`] operating with the provided
/// [`Config`].
fn map_roi_aggregate(
    dto: RoiModelToSaveDto,
    validation: &Config,
    config: &Config,
) -> Result<RoiAggregate, ValidationError> {
    let RoiModelToSaveDto {
        roi_aggregate_id,
        active_roi_model_id,
        current_information,
        roi_model_list,
    } = dto;

    let current_information =
        CurrentInformation::to_domain(current_information, validation)?;
    let models = roi_model_list
        .into_iter()
        .filter_map(|m| {
            let name = m.name.clone();
            map_roi_model(m, validation, config)
                .inspect_err(|e| {
                    log::warn!(
                        roi_aggregate.id = %roi_aggregate_id,
                        roi_model.name = %name,
                        "skipping unrestorable `RoiModel`: {e}",
                    );
                })
                .ok()
        })
        .collect();

    Ok(RoiAggregate::restore(
        roi_aggregate_id,
        current_information,
        models,
        active_roi_model_id,
        *config,
    ))
}

/// Converts the provided [`RoiModel`] into a [`RoiModelDto`] along with its
/// projections derived against the provided [`CurrentInformation`].
#[must_use]
pub fn roi_model_to_dto(
    model: &RoiModel,
    roi_aggregate_id: roi_aggregate::Id,
    current_information: &CurrentInformation,
) -> RoiModelDto {
    let props = model.props();
    let limits = model.loan_limits_info();

    RoiModelDto {
        roi_model_id: Some(model.id()),
        roi_aggregate_id,
        name: props.name.to_string(),
        current_information: Some(current_information.to_dto()),
        career_goal: Some(props.career_goal.to_dto()),
        education_cost: Some(props.education_cost.to_dto()),
        education_cost_refinement: props.education_cost_refinement.clone(),
        education_financing: Some(props.education_financing.to_dto()),
        roi_calculator_input: model.roi_calculator_input().cloned(),
        roi_calculator_input_hash: model.hash(),
        roi_calculator_output: model.roi_calculator_output().cloned(),
        radius_in_miles: Some(props.radius_in_miles),
        date_created: Some(props.created_at.coerce()),
        last_updated: Some(props.updated_at.coerce()),
        cost_of_attendance_by_year: model
            .cost_of_attendance_by_year(current_information),
        grant_or_scholarship_aid_excluding_pell_grant: model
            .grant_or_scholarship_aid_excluding_pell_grant(),
        efc: model.efc(),
        net_price_by_year: model.net_price_by_year(current_information),
        federal_subsidized_loan_limit_by_year: limits
            .federal_subsidized_loan_by_year,
        federal_unsubsidized_loan_limit_by_year: limits
            .federal_unsubsidized_loan_by_year,
        out_of_pocket_expenses_by_year: model
            .out_of_pocket_expenses_by_year(current_information),
        is_default_model: model.is_default(),
        is_ready_for_compare: false,
    }
}

/// Builds a [`RoiModel`] out of the provided [`RoiModelDto`].
///
/// Absent parts take their defaults. The stored calculation is restored, so
/// an unchanged [`RoiModel`] doesn't require recalculation.
///
/// # Errors
///
/// If any part of the [`RoiModelDto`] doesn't form a valid entity.
pub fn roi_model_from_dto(
    dto: RoiModelDto,
    config: &Config,
) -> Result<RoiModel, ValidationError> {
    map_roi_model(dto, config, config)
}

/// Maps the provided [`RoiModelDto`] validating it with the `validation`
/// [`Config`] and building a [`RoiModel`] operating with the provided
/// [`Config`].
fn map_roi_model(
    dto: RoiModelDto,
    validation: &Config,
    config: &Config,
) -> Result<RoiModel, ValidationError> {
    let now = DateTime::now();

    let career_goal = dto
        .career_goal
        .map(|d| CareerGoal::to_domain(d, validation))
        .transpose()?
        .unwrap_or_else(|| CareerGoal::new(config));
    let education_cost = dto
        .education_cost
        .map(|d| EducationCost::to_domain(d, validation))
        .transpose()?
        .unwrap_or_else(|| EducationCost::new(config));
    let education_financing = dto
        .education_financing
        .map(|d| EducationFinancing::to_domain(d, validation))
        .transpose()?
        .unwrap_or_else(|| EducationFinancing::new(config));

    let mut model = RoiModel::from_parts(
        dto.roi_model_id.unwrap_or_else(roi_model::Id::new),
        Props {
            name: if dto.name.is_empty() {
                Name::default_first()
            } else {
                Name::from(dto.name)
            },
            career_goal,
            education_cost,
            education_cost_refinement: dto.education_cost_refinement,
            education_financing,
            radius_in_miles: dto.radius_in_miles.unwrap_or(config.radius_in_miles),
            created_at: dto.date_created.unwrap_or(now).coerce(),
            updated_at: dto.last_updated.unwrap_or(now).coerce(),
        },
        *config,
    );
    model.restore_calculation(dto.roi_calculator_input, dto.roi_calculator_output);
    Ok(model)
}

#[cfg(test)]
mod spec {
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::{
        domain::{
            lookup::{
                CostOfAttendanceInfo, Institution, Location, Occupation,
                ZipCode,
            },
            roi_model::{Config, RoiCalculatorOutput},
            EducationLevel, RoiAggregate,
        },
        dto::{
            CareerGoalDto, CurrentInformationDto, EducationCostDto,
            RoiModelDto,
        },
    };

    use super::{restore_roi_aggregate, roi_model_from_dto, Mapper as _};

    fn aggregate() -> RoiAggregate {
        let mut aggregate = RoiAggregate::new(Config::default());
        aggregate
            .update_current_information(CurrentInformationDto {
                current_age: Some(18),
                occupation: Some(Occupation {
                    onet_code: "35-3023.00".into(),
                    title: "Fast Food and Counter Workers".into(),
                    typical_education_level_group_id: None,
                }),
                location: Some(Location {
                    zip_code: ZipCode::new("60601").unwrap(),
                    city_name: None,
                    state_abbreviation: None,
                    latitude: None,
                    longitude: None,
                }),
                education_level: Some(EducationLevel::HighSchoolGraduate),
            })
            .unwrap();
        aggregate
            .update_career_goal(CareerGoalDto {
                degree_level: Some(EducationLevel::BachelorsDegree),
                ..CareerGoalDto::default()
            })
            .unwrap();
        aggregate
            .update_education_cost(EducationCostDto {
                institution: Some(Institution {
                    unit_id: "144050".into(),
                    name: "University of Chicago".into(),
                    cost_of_attendance_info: CostOfAttendanceInfo::default(),
                    avg_grant_scholarship_aid_info: None,
                }),
                ..EducationCostDto::default()
            })
            .unwrap();
        _ = aggregate.create_empty_roi_model(None);
        aggregate
    }

    #[test]
    fn restores_saved_aggregate() {
        let mut aggregate = aggregate();
        let second = aggregate.active_roi_model_id();
        let first = aggregate.roi_model_list()[0].id();
        aggregate.make_active(first).unwrap();
        assert!(aggregate.calculate_roi_calculator_input());
        aggregate.update_roi_calculator_output(RoiCalculatorOutput::from(
            json!({"roi": 1.5}),
        ));

        let mut restored =
            RoiAggregate::to_domain(aggregate.to_dto(), &Config::default())
                .unwrap();

        assert_eq!(restored.id(), aggregate.id());
        assert_eq!(restored.active_roi_model_id(), first);
        assert_eq!(restored.roi_model_count(), 2);
        assert_eq!(restored.roi_model_list()[1].id(), second);
        assert_eq!(AsRef::<str>::as_ref(restored.name()), "University of Chicago");
        assert_eq!(
            restored.current_information(),
            aggregate.current_information(),
        );
        assert_eq!(
            restored.active_roi_model().hash(),
            aggregate.active_roi_model().hash(),
        );
        assert!(restored.active_roi_model().roi_calculator_output().is_some());
        assert!(!restored.calculate_roi_calculator_input());
    }

    #[test]
    fn dto_carries_derived_projections() {
        let aggregate = aggregate();
        let saved = aggregate.to_dto();

        let first = &saved.roi_model_list[0];
        assert!(!first.is_default_model);
        assert!(!first.is_ready_for_compare);
        assert_eq!(first.cost_of_attendance_by_year.len(), 4);
        assert_eq!(
            first.federal_subsidized_loan_limit_by_year,
            [dec!(3500), dec!(4500), dec!(5500), dec!(5500)],
        );

        let second = &saved.roi_model_list[1];
        assert!(second.is_default_model);
        assert_eq!(second.name, "Default ROI Model 1");
        assert_eq!(second.out_of_pocket_expenses_by_year, [dec!(0)]);
    }

    #[test]
    fn skips_unrestorable_models() {
        let config = Config {
            strict_validation: true,
            ..Config::default()
        };
        let mut saved = aggregate().to_dto();
        let first = saved.roi_model_list[0].roi_model_id.unwrap();
        saved.roi_model_list[0].career_goal = None;

        // The second one has neither a career goal nor an institution.
        let restored = RoiAggregate::to_domain(saved, &config).unwrap();

        assert_eq!(restored.roi_model_count(), 1);
        assert_eq!(restored.active_roi_model_id(), first);
    }

    #[test]
    fn restores_incomplete_aggregate_under_strict_validation() {
        let strict = Config {
            strict_validation: true,
            ..Config::default()
        };
        let mut saved = aggregate().to_dto();
        saved.current_information = CurrentInformationDto::default();
        saved.roi_model_list[0].career_goal = None;

        let restored = restore_roi_aggregate(saved, &strict).unwrap();
        assert_eq!(restored.roi_model_count(), 2);
        assert!(!restored.current_information().is_valid());

        let fresh = RoiAggregate::new(strict);
        let restored = restore_roi_aggregate(fresh.to_dto(), &strict).unwrap();
        assert_eq!(restored.id(), fresh.id());
        assert_eq!(restored.roi_model_count(), 1);

        // Incoming updates are still validated strictly.
        let mut restored = restored;
        assert!(restored
            .update_current_information(CurrentInformationDto::default())
            .is_err());
    }

    #[test]
    fn absent_parts_take_defaults() {
        let model =
            roi_model_from_dto(RoiModelDto::default(), &Config::default())
                .unwrap();

        assert!(model.is_default());
        assert!(model.name().is_default());
        assert!(model.hash().is_none());
        assert_eq!(model.props().radius_in_miles, 50);
    }
}
