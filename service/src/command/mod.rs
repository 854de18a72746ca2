//! [`Command`] definition.

pub mod load_roi_aggregate;
pub mod save_roi_aggregate;
pub mod share_roi_aggregate;
pub mod update_roi_aggregate;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    load_roi_aggregate::LoadRoiAggregate,
    save_roi_aggregate::SaveRoiAggregate,
    share_roi_aggregate::ShareRoiAggregate,
    update_roi_aggregate::{mutation, Mutation, UpdateRoiAggregate},
};

#[cfg(test)]
pub(crate) mod mock {
    //! Shared fixtures of [`Command`] tests.

    use crate::{
        domain::{
            lookup::{Location, Occupation, ZipCode},
            owner::{TenantId, UserId},
            roi_model, EducationLevel, Owner,
        },
        dto::CurrentInformationDto,
        infra::{calculator::mock::Counting, Memory},
        Config, Service,
    };

    /// Creates a new [`Service`] backed by an empty [`Memory`] database.
    pub(crate) fn service(calculator: Counting) -> Service<Memory, Counting> {
        Service::new(Config::default(), Memory::default(), calculator)
    }

    /// Creates a new [`Service`] enforcing required fields of incoming DTOs.
    pub(crate) fn strict_service(
        calculator: Counting,
    ) -> Service<Memory, Counting> {
        let config = Config {
            roi_model: roi_model::Config {
                strict_validation: true,
                ..roi_model::Config::default()
            },
        };
        Service::new(config, Memory::default(), calculator)
    }

    /// Creates a new random [`Owner`].
    pub(crate) fn owner() -> Owner {
        Owner {
            tenant_id: TenantId::new(),
            user_id: UserId::new(),
        }
    }

    /// Creates a complete [`CurrentInformationDto`].
    pub(crate) fn valid_current_information() -> CurrentInformationDto {
        CurrentInformationDto {
            current_age: Some(18),
            occupation: Some(Occupation {
                onet_code: "35-3023.00".into(),
                title: "Fast Food and Counter Workers".into(),
                typical_education_level_group_id: None,
            }),
            location: Some(Location {
                zip_code: ZipCode::new("60601").unwrap(),
                city_name: Some("Chicago".into()),
                state_abbreviation: Some("IL".into()),
                latitude: None,
                longitude: None,
            }),
            education_level: Some(EducationLevel::HighSchoolGraduate),
        }
    }
}
