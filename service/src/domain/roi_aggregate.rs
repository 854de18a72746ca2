//! [`RoiAggregate`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use tracing as log;
use uuid::Uuid;

use super::{
    entity::Entity,
    roi_model::{self, Config, Name, RoiCalculatorInput, RoiCalculatorOutput},
    CurrentInformation, EducationCostRefinement, Error, RoiModel,
};
use crate::{
    dto::{
        CareerGoalDto, CloneRoiModelDto, CurrentInformationDto,
        EducationCostDto, EducationFinancingDto,
    },
    mapper::Mapper as _,
};

/// Consistency boundary of all the [`RoiModel`]s of a single user along with
/// their shared [`CurrentInformation`].
///
/// Always contains at least one [`RoiModel`], exactly one of which is active.
#[derive(Clone, Debug)]
pub struct RoiAggregate {
    /// Identified [`Props`] of this [`RoiAggregate`].
    entity: Entity<Id, Props>,

    /// [`Config`] of the [`RoiModel`]s.
    config: Config,
}

/// Properties of a [`RoiAggregate`].
#[derive(Clone, Debug)]
struct Props {
    /// [`CurrentInformation`] shared by all the [`RoiModel`]s.
    current_information: CurrentInformation,

    /// [`RoiModel`]s in their insertion order.
    roi_models: Vec<RoiModel>,

    /// ID of the active [`RoiModel`].
    active_roi_model_id: roi_model::Id,
}

impl RoiAggregate {
    /// Creates a new [`RoiAggregate`] with a single default [`RoiModel`].
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_id(Id::new(), config)
    }

    /// Creates a new default [`RoiAggregate`] with the provided [`Id`].
    #[must_use]
    pub fn with_id(id: Id, config: Config) -> Self {
        let model = RoiModel::new(Name::default_first(), config);
        Self {
            entity: Entity::new(
                id,
                Props {
                    current_information: CurrentInformation::default(),
                    active_roi_model_id: model.id(),
                    roi_models: vec![model],
                },
            ),
            config,
        }
    }

    /// Restores a [`RoiAggregate`] out of previously saved parts.
    ///
    /// The provided `active` [`RoiModel`] is made active if present,
    /// otherwise the last loaded one stays active. Without any [`RoiModel`]s
    /// a default one is created.
    #[must_use]
    pub fn restore(
        id: Id,
        current_information: CurrentInformation,
        roi_models: Vec<RoiModel>,
        active: roi_model::Id,
        config: Config,
    ) -> Self {
        let mut this = Self::with_id(id, config);
        if roi_models.is_empty() {
            this.entity.props_mut().current_information = current_information;
            return this;
        }

        let props = this.entity.props_mut();
        props.current_information = current_information;
        props.roi_models.clear();
        this.load_roi_model_list(roi_models);
        if this.make_active(active).is_err() {
            log::warn!(
                roi_aggregate.id = %id,
                roi_model.id = %active,
                "saved active `RoiModel` is missing",
            );
        }
        this
    }

    /// Returns ID of this [`RoiAggregate`].
    #[must_use]
    pub fn id(&self) -> Id {
        *self.entity.id()
    }

    /// Returns the [`Config`] of this [`RoiAggregate`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the shared [`CurrentInformation`].
    #[must_use]
    pub fn current_information(&self) -> &CurrentInformation {
        &self.entity.props().current_information
    }

    /// Returns the [`Name`] of the active [`RoiModel`].
    #[must_use]
    pub fn name(&self) -> &Name {
        self.active_roi_model().name()
    }

    /// Returns the ID of the active [`RoiModel`].
    #[must_use]
    pub fn active_roi_model_id(&self) -> roi_model::Id {
        self.entity.props().active_roi_model_id
    }

    /// Returns the active [`RoiModel`].
    ///
    /// # Panics
    ///
    /// If the active [`RoiModel`] is missing, which means the invariants of
    /// this [`RoiAggregate`] are broken.
    #[must_use]
    pub fn active_roi_model(&self) -> &RoiModel {
        self.try_active_roi_model()
            .unwrap_or_else(|e| panic!("broken `RoiAggregate`: {e}"))
    }

    /// Returns the active [`RoiModel`].
    ///
    /// # Errors
    ///
    /// With [`Error::RoiModelMissing`] if the active [`RoiModel`] is missing.
    pub fn try_active_roi_model(&self) -> Result<&RoiModel, Error> {
        let id = self.active_roi_model_id();
        self.roi_model(id).ok_or(Error::RoiModelMissing(id))
    }

    /// Returns the [`RoiModel`] with the provided ID, if any.
    #[must_use]
    pub fn roi_model(&self, id: roi_model::Id) -> Option<&RoiModel> {
        self.roi_model_list().iter().find(|m| m.id() == id)
    }

    /// Returns the [`RoiCalculatorInput`] of the active [`RoiModel`].
    #[must_use]
    pub fn roi_calculator_input(&self) -> Option<&RoiCalculatorInput> {
        self.active_roi_model().roi_calculator_input()
    }

    /// Returns all the [`RoiModel`]s in their insertion order.
    #[must_use]
    pub fn roi_model_list(&self) -> &[RoiModel] {
        &self.entity.props().roi_models
    }

    /// Returns the number of [`RoiModel`]s.
    #[must_use]
    pub fn roi_model_count(&self) -> usize {
        self.roi_model_list().len()
    }

    /// Creates a new default [`RoiModel`] and makes it active.
    ///
    /// Without a [`Name`] provided, the next default one is used.
    pub fn create_empty_roi_model(&mut self, name: Option<Name>) -> roi_model::Id {
        let name = name.unwrap_or_else(|| {
            Name::next_default(self.roi_model_list().iter().map(RoiModel::name))
        });
        self.add(RoiModel::new(name, self.config))
    }

    /// Creates a new default [`RoiModel`] carrying over the fields of the
    /// active one selected by the provided [`CloneRoiModelDto`], and makes
    /// it active.
    pub fn clone_roi_model(&mut self, options: &CloneRoiModelDto) -> roi_model::Id {
        let name = options.model_name.clone().map_or_else(
            || {
                Name::next_default(
                    self.roi_model_list().iter().map(RoiModel::name),
                )
            },
            Name::from,
        );
        let source = self.active_roi_model();
        let goal = source.career_goal().clone();
        let cost = source.education_cost().clone();

        let mut model = RoiModel::new(name, self.config);
        if options.is_goal_location_cloned {
            model.set_career_goal_location(goal.location().cloned());
        }
        if options.is_goal_occupation_cloned {
            model.set_career_goal_occupation(goal.occupation().cloned());
        }
        if options.is_goal_degree_level_cloned {
            model.set_career_goal_degree_level(goal.degree_level());
        }
        if options.is_goal_degree_program_cloned {
            model.set_career_goal_degree_program(goal.degree_program().cloned());
        }
        if options.is_goal_retirement_age_cloned {
            model.set_career_goal_retirement_age(Some(goal.retirement_age()));
        }
        if options.is_education_cost_institution_cloned {
            model.set_education_cost_institution(cost.institution().cloned());
        }
        if options.is_education_cost_start_school_cloned {
            model.set_education_cost_start_year(Some(cost.start_year()));
        }
        if options.is_education_cost_part_time_full_time_cloned {
            model.set_education_cost_fulltime(Some(cost.is_fulltime()));
        }
        if options.is_education_cost_years_to_complete_cloned {
            model.set_education_cost_years_to_complete(Some(
                cost.years_to_complete_degree(),
            ));
        }

        self.add(model)
    }

    /// Makes the [`RoiModel`] with the provided ID active.
    ///
    /// # Errors
    ///
    /// With [`Error::RoiModelMissing`] if there is no such [`RoiModel`].
    pub fn make_active(&mut self, id: roi_model::Id) -> Result<(), Error> {
        if self.roi_model(id).is_none() {
            return Err(Error::RoiModelMissing(id));
        }
        self.entity.props_mut().active_roi_model_id = id;
        Ok(())
    }

    /// Deletes the [`RoiModel`] with the provided ID.
    ///
    /// Deleting the last [`RoiModel`] creates a new default one, while
    /// deleting the active one makes the first remaining one active.
    ///
    /// # Errors
    ///
    /// With [`Error::RoiModelMissing`] if there is no such [`RoiModel`].
    pub fn delete_roi_model(&mut self, id: roi_model::Id) -> Result<(), Error> {
        let props = self.entity.props_mut();
        let pos = props
            .roi_models
            .iter()
            .position(|m| m.id() == id)
            .ok_or(Error::RoiModelMissing(id))?;
        _ = props.roi_models.remove(pos);

        if props.roi_models.is_empty() {
            _ = self.create_empty_roi_model(None);
        } else if props.active_roi_model_id == id {
            props.active_roi_model_id = props.roi_models[0].id();
        }
        Ok(())
    }

    /// Renames the active [`RoiModel`].
    pub fn update_roi_model_name(&mut self, name: Name) {
        self.active_mut().update_name(name);
    }

    /// Adds the provided [`RoiModel`]s, each becoming active as it's added.
    pub fn load_roi_model_list(
        &mut self,
        list: impl IntoIterator<Item = RoiModel>,
    ) {
        for model in list {
            _ = self.add(model);
        }
    }

    /// Resets this [`RoiAggregate`] to a default state, keeping its [`Id`].
    pub fn clear(&mut self) {
        *self = Self::with_id(self.id(), self.config);
    }

    /// Indicates whether the [`CurrentInformation`] is complete.
    #[must_use]
    pub fn is_current_information_valid(&self) -> bool {
        self.current_information().is_valid()
    }

    /// Indicates whether the career goal of the active [`RoiModel`] is
    /// complete.
    #[must_use]
    pub fn is_career_goal_valid(&self) -> bool {
        self.active_roi_model().is_career_goal_valid()
    }

    /// Indicates whether the education cost of the active [`RoiModel`] is
    /// complete.
    #[must_use]
    pub fn is_education_cost_valid(&self) -> bool {
        self.active_roi_model().is_education_cost_valid()
    }

    /// Replaces the shared [`CurrentInformation`].
    ///
    /// # Errors
    ///
    /// If the provided [`CurrentInformationDto`] doesn't form a valid
    /// [`CurrentInformation`].
    pub fn update_current_information(
        &mut self,
        dto: CurrentInformationDto,
    ) -> Result<(), Error> {
        self.entity.props_mut().current_information =
            CurrentInformation::to_domain(dto, &self.config)?;
        Ok(())
    }

    /// Replaces the career goal of the active [`RoiModel`].
    ///
    /// # Errors
    ///
    /// If the provided [`CareerGoalDto`] doesn't form a valid career goal.
    pub fn update_career_goal(&mut self, dto: CareerGoalDto) -> Result<(), Error> {
        Ok(self.active_mut().update_career_goal(dto)?)
    }

    /// Replaces the education cost of the active [`RoiModel`].
    ///
    /// # Errors
    ///
    /// If the provided [`EducationCostDto`] doesn't form a valid education
    /// cost.
    pub fn update_education_cost(
        &mut self,
        dto: EducationCostDto,
    ) -> Result<(), Error> {
        let current_information = self.current_information().clone();
        Ok(self
            .active_mut()
            .update_education_cost(dto, &current_information)?)
    }

    /// Replaces the [`EducationCostRefinement`] of the active [`RoiModel`].
    pub fn update_education_cost_refinement(
        &mut self,
        refinement: Option<EducationCostRefinement>,
    ) {
        self.active_mut().update_education_cost_refinement(refinement);
    }

    /// Replaces the education financing of the active [`RoiModel`].
    ///
    /// # Errors
    ///
    /// If the provided [`EducationFinancingDto`] doesn't form a valid
    /// education financing.
    pub fn update_education_financing(
        &mut self,
        dto: EducationFinancingDto,
    ) -> Result<(), Error> {
        Ok(self.active_mut().update_education_financing(dto)?)
    }

    /// Resets the education financing of the active [`RoiModel`].
    pub fn clear_education_financing(&mut self) {
        self.active_mut().clear_education_financing();
    }

    /// Calculates the [`RoiCalculatorInput`] of the active [`RoiModel`].
    ///
    /// Returns `true` only if the input has changed and the
    /// [`CurrentInformation`] is complete, meaning the external ROI
    /// calculator should run.
    pub fn calculate_roi_calculator_input(&mut self) -> bool {
        let current_information = self.current_information().clone();
        let changed = self
            .active_mut()
            .calculate_roi_calculator_input(&current_information);

        if changed && !current_information.is_valid() {
            log::debug!(
                roi_aggregate.id = %self.id(),
                "calculator skipped: current information incomplete",
            );
            return false;
        }
        changed
    }

    /// Stores the [`RoiCalculatorOutput`] into the active [`RoiModel`].
    pub fn update_roi_calculator_output(&mut self, output: RoiCalculatorOutput) {
        self.active_mut().update_roi_calculator_output(output);
    }

    /// Adds the provided [`RoiModel`] and makes it active.
    fn add(&mut self, model: RoiModel) -> roi_model::Id {
        let id = model.id();
        let props = self.entity.props_mut();
        props.roi_models.push(model);
        props.active_roi_model_id = id;
        id
    }

    /// Returns the active [`RoiModel`] for mutation.
    ///
    /// # Panics
    ///
    /// If the active [`RoiModel`] is missing, which means the invariants of
    /// this [`RoiAggregate`] are broken.
    fn active_mut(&mut self) -> &mut RoiModel {
        let props = self.entity.props_mut();
        let id = props.active_roi_model_id;
        props
            .roi_models
            .iter_mut()
            .find(|m| m.id() == id)
            .unwrap_or_else(|| {
                panic!("broken `RoiAggregate`: `RoiModel(id: {id})` is missing")
            })
    }
}

/// ID of a [`RoiAggregate`].
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
