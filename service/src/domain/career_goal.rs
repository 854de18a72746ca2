//! [`CareerGoal`] definitions.

use common::define_kind;

use super::{
    education_level::YearsOfCollege,
    lookup::{InstructionalProgram, Location, Occupation},
    roi_model::Config,
    EducationLevel, ValidationError,
};
use crate::{dto::CareerGoalDto, mapper::Mapper};

/// Career a user aims for, along with the degree leading to it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CareerGoal {
    /// [`Location`] where the career is pursued.
    location: Option<Location>,

    /// Targeted [`Occupation`].
    occupation: Option<Occupation>,

    /// Targeted degree [`EducationLevel`].
    degree_level: Option<EducationLevel>,

    /// Targeted degree [`InstructionalProgram`].
    degree_program: Option<InstructionalProgram>,

    /// Age at which the user expects to retire.
    retirement_age: u8,

    /// [`CareerGoalPath`] the user explores this goal with.
    career_goal_path: CareerGoalPath,
}

define_kind! {
    #[doc = "Way a user explores their [`CareerGoal`]."]
    enum CareerGoalPath {
        #[doc = "Picking a career first."]
        ExploreCareers = 1,

        #[doc = "Picking a degree first."]
        ExploreDegrees = 2,
    }
}

impl CareerGoal {
    /// Creates a new default [`CareerGoal`] with nothing chosen yet.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            location: None,
            occupation: None,
            degree_level: None,
            degree_program: None,
            retirement_age: config.default_retirement_age,
            career_goal_path: CareerGoalPath::ExploreCareers,
        }
    }

    /// Returns the [`Location`] of this [`CareerGoal`].
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the targeted [`Occupation`].
    #[must_use]
    pub fn occupation(&self) -> Option<&Occupation> {
        self.occupation.as_ref()
    }

    /// Returns the targeted degree [`EducationLevel`].
    #[must_use]
    pub fn degree_level(&self) -> Option<EducationLevel> {
        self.degree_level
    }

    /// Returns the targeted degree [`InstructionalProgram`].
    #[must_use]
    pub fn degree_program(&self) -> Option<&InstructionalProgram> {
        self.degree_program.as_ref()
    }

    /// Returns the expected retirement age.
    #[must_use]
    pub fn retirement_age(&self) -> u8 {
        self.retirement_age
    }

    /// Returns the [`CareerGoalPath`] of this [`CareerGoal`].
    #[must_use]
    pub fn career_goal_path(&self) -> CareerGoalPath {
        self.career_goal_path
    }

    /// Returns the number of college years the targeted degree requires.
    #[must_use]
    pub fn years_of_college(&self, years: &YearsOfCollege) -> u8 {
        EducationLevel::years_of_college(self.degree_level, years)
    }

    /// Indicates whether the occupation, the degree level and the degree
    /// program are all chosen.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.occupation.is_some()
            && self.degree_level.is_some()
            && self.degree_program.is_some()
    }

    /// Replaces the [`Location`] of this [`CareerGoal`].
    #[must_use]
    pub fn with_location(self, location: Option<Location>) -> Self {
        Self { location, ..self }
    }

    /// Replaces the targeted [`Occupation`].
    #[must_use]
    pub fn with_occupation(self, occupation: Option<Occupation>) -> Self {
        Self { occupation, ..self }
    }

    /// Replaces the targeted degree [`EducationLevel`].
    #[must_use]
    pub fn with_degree_level(self, degree_level: Option<EducationLevel>) -> Self {
        Self {
            degree_level,
            ..self
        }
    }

    /// Replaces the targeted degree [`InstructionalProgram`].
    #[must_use]
    pub fn with_degree_program(
        self,
        degree_program: Option<InstructionalProgram>,
    ) -> Self {
        Self {
            degree_program,
            ..self
        }
    }

    /// Replaces the expected retirement age, falling back to the configured
    /// default one when [`None`].
    #[must_use]
    pub fn with_retirement_age(
        self,
        retirement_age: Option<u8>,
        config: &Config,
    ) -> Self {
        Self {
            retirement_age: retirement_age
                .unwrap_or(config.default_retirement_age),
            ..self
        }
    }
}

impl Mapper for CareerGoal {
    type Dto = CareerGoalDto;

    fn to_domain(
        dto: Self::Dto,
        config: &Config,
    ) -> Result<Self, ValidationError> {
        let CareerGoalDto {
            location,
            occupation,
            degree_level,
            degree_program,
            retirement_age,
            career_goal_path_type,
        } = dto;

        if config.strict_validation {
            const ENTITY: &str = "CareerGoal";
            ValidationError::require(ENTITY, "occupation", occupation.as_ref())?;
            ValidationError::require(
                ENTITY,
                "degreeLevel",
                degree_level.as_ref(),
            )?;
            ValidationError::require(
                ENTITY,
                "degreeProgram",
                degree_program.as_ref(),
            )?;
        }

        Ok(Self {
            location,
            occupation,
            degree_level,
            degree_program,
            retirement_age: retirement_age
                .unwrap_or(config.default_retirement_age),
            career_goal_path: career_goal_path_type
                .unwrap_or(CareerGoalPath::ExploreCareers),
        })
    }

    fn to_dto(&self) -> Self::Dto {
        CareerGoalDto {
            location: self.location.clone(),
            occupation: self.occupation.clone(),
            degree_level: self.degree_level,
            degree_program: self.degree_program.clone(),
            retirement_age: Some(self.retirement_age),
            career_goal_path_type: Some(self.career_goal_path),
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            lookup::{InstructionalProgram, Occupation},
            roi_model::Config,
            EducationLevel,
        },
        dto::CareerGoalDto,
        mapper::Mapper as _,
    };

    use super::{CareerGoal, CareerGoalPath};

    fn occupation() -> Occupation {
        Occupation {
            onet_code: "15-1252.00".into(),
            title: "Software Developers".into(),
            typical_education_level_group_id: Some(6),
        }
    }

    fn program() -> InstructionalProgram {
        InstructionalProgram {
            cip_code: "11.0701".into(),
            title: "Computer Science".into(),
        }
    }

    #[test]
    fn defaults() {
        let goal = CareerGoal::new(&Config::default());

        assert_eq!(goal.retirement_age(), 67);
        assert_eq!(goal.career_goal_path(), CareerGoalPath::ExploreCareers);
        assert!(goal.occupation().is_none());
        assert!(!goal.is_valid());
    }

    #[test]
    fn valid_once_occupation_degree_and_program_are_chosen() {
        let config = Config::default();
        let dto = CareerGoalDto {
            occupation: None,
            degree_level: None,
            degree_program: None,
            ..CareerGoalDto::default()
        };
        assert!(!CareerGoal::to_domain(dto, &config).unwrap().is_valid());

        let dto = CareerGoalDto {
            occupation: Some(occupation()),
            degree_level: Some(EducationLevel::BachelorsDegree),
            degree_program: Some(program()),
            ..CareerGoalDto::default()
        };
        assert!(CareerGoal::to_domain(dto, &config).unwrap().is_valid());
    }

    #[test]
    fn strict_validation_requires_degree_program() {
        let config = Config {
            strict_validation: true,
            ..Config::default()
        };
        let dto = CareerGoalDto {
            occupation: Some(occupation()),
            degree_level: Some(EducationLevel::BachelorsDegree),
            ..CareerGoalDto::default()
        };

        let err = CareerGoal::to_domain(dto, &config).unwrap_err();
        assert_eq!(err.entity, "CareerGoal");
        assert_eq!(err.field, "degreeProgram");
    }

    #[test]
    fn absent_retirement_age_falls_back_to_default() {
        let config = Config::default();

        let goal = CareerGoal::new(&config)
            .with_retirement_age(Some(60), &config)
            .with_retirement_age(None, &config);
        assert_eq!(goal.retirement_age(), 67);

        let goal = CareerGoal::to_domain(
            CareerGoalDto {
                retirement_age: Some(62),
                ..CareerGoalDto::default()
            },
            &config,
        )
        .unwrap();
        assert_eq!(goal.retirement_age(), 62);
    }

    #[test]
    fn years_of_college_follow_degree_level() {
        let config = Config::default();
        let goal = CareerGoal::new(&config);
        assert_eq!(goal.years_of_college(&config.years_of_college), 4);

        let goal = goal.with_degree_level(Some(EducationLevel::AssociatesDegree));
        assert_eq!(goal.years_of_college(&config.years_of_college), 2);

        let goal =
            goal.with_degree_level(Some(EducationLevel::HighSchoolGraduate));
        assert_eq!(goal.years_of_college(&config.years_of_college), 0);
    }
}
