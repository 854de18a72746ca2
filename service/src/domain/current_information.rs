//! [`CurrentInformation`] definitions.

use super::{
    lookup::{Location, Occupation},
    roi_model::Config,
    EducationLevel, ValidationError,
};
use crate::{dto::CurrentInformationDto, mapper::Mapper};

/// Present circumstances of a user, shared by all their ROI models.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct CurrentInformation {
    /// Current age in years.
    current_age: Option<u8>,

    /// Current [`Occupation`].
    occupation: Option<Occupation>,

    /// Current [`Location`].
    location: Option<Location>,

    /// Attained [`EducationLevel`].
    education_level: Option<EducationLevel>,
}

impl CurrentInformation {
    /// Returns the current age in years.
    #[must_use]
    pub fn current_age(&self) -> Option<u8> {
        self.current_age
    }

    /// Returns the current [`Occupation`].
    #[must_use]
    pub fn occupation(&self) -> Option<&Occupation> {
        self.occupation.as_ref()
    }

    /// Returns the current [`Location`].
    #[must_use]
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    /// Returns the attained [`EducationLevel`].
    #[must_use]
    pub fn education_level(&self) -> Option<EducationLevel> {
        self.education_level
    }

    /// Indicates whether every field of this [`CurrentInformation`] is set.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.current_age.is_some()
            && self.occupation.is_some()
            && self.location.is_some()
            && self.education_level.is_some()
    }
}

impl Mapper for CurrentInformation {
    type Dto = CurrentInformationDto;

    fn to_domain(
        dto: Self::Dto,
        config: &Config,
    ) -> Result<Self, ValidationError> {
        let CurrentInformationDto {
            current_age,
            occupation,
            location,
            education_level,
        } = dto;

        if config.strict_validation {
            const ENTITY: &str = "CurrentInformation";
            ValidationError::require(ENTITY, "currentAge", current_age.as_ref())?;
            ValidationError::require(ENTITY, "location", location.as_ref())?;
            ValidationError::require(
                ENTITY,
                "educationLevel",
                education_level.as_ref(),
            )?;
        }

        Ok(Self {
            current_age,
            occupation,
            location,
            education_level,
        })
    }

    fn to_dto(&self) -> Self::Dto {
        CurrentInformationDto {
            current_age: self.current_age,
            occupation: self.occupation.clone(),
            location: self.location.clone(),
            education_level: self.education_level,
        }
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{
            lookup::{Location, Occupation, ZipCode},
            roi_model::Config,
            EducationLevel,
        },
        dto::CurrentInformationDto,
        mapper::Mapper as _,
    };

    use super::CurrentInformation;

    fn complete() -> CurrentInformationDto {
        CurrentInformationDto {
            current_age: Some(17),
            occupation: Some(Occupation {
                onet_code: "41-2031.00".into(),
                title: "Retail Salespersons".into(),
                typical_education_level_group_id: Some(1),
            }),
            location: Some(Location {
                zip_code: ZipCode::new("02139").unwrap(),
                city_name: Some("Cambridge".into()),
                state_abbreviation: Some("MA".into()),
                latitude: None,
                longitude: None,
            }),
            education_level: Some(EducationLevel::EleventhGradeStudent),
        }
    }

    #[test]
    fn valid_only_when_complete() {
        let config = Config::default();

        let info = CurrentInformation::to_domain(complete(), &config).unwrap();
        assert!(info.is_valid());

        let info = CurrentInformation::to_domain(
            CurrentInformationDto {
                occupation: None,
                ..complete()
            },
            &config,
        )
        .unwrap();
        assert!(!info.is_valid());

        assert!(!CurrentInformation::default().is_valid());
    }

    #[test]
    fn strict_validation_rejects_missing_age() {
        let config = Config {
            strict_validation: true,
            ..Config::default()
        };

        let err = CurrentInformation::to_domain(
            CurrentInformationDto {
                current_age: None,
                ..complete()
            },
            &config,
        )
        .unwrap_err();
        assert_eq!(err.field, "currentAge");
    }

    #[test]
    fn dto_round_trip() {
        let dto = complete();
        let info =
            CurrentInformation::to_domain(dto.clone(), &Config::default())
                .unwrap();

        assert_eq!(info.to_dto(), dto);
    }
}
