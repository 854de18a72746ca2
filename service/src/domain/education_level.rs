//! [`EducationLevel`] definitions.

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Level of education, either attained or targeted.
///
/// High school grades are encoded with negative [`value()`]s, meaning the
/// number of school years remaining before graduation.
///
/// [`value()`]: EducationLevel::value
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EducationLevel {
    /// Student of the 9th grade.
    NinthGradeStudent,

    /// Student of the 10th grade.
    TenthGradeStudent,

    /// Student of the 11th grade.
    EleventhGradeStudent,

    /// Student of the 12th grade.
    TwelfthGradeStudent,

    /// High school graduate.
    HighSchoolGraduate,

    /// Some college credits, no degree.
    SomeCollege,

    /// Associate's degree.
    AssociatesDegree,

    /// Bachelor's degree.
    BachelorsDegree,

    /// Master's degree.
    MastersDegree,

    /// Doctoral or professional degree.
    DoctorateDegree,
}

impl EducationLevel {
    /// Returns the numeric value of this [`EducationLevel`] understood by
    /// the ROI calculator.
    #[must_use]
    pub const fn value(self) -> i8 {
        match self {
            Self::NinthGradeStudent => -4,
            Self::TenthGradeStudent => -3,
            Self::EleventhGradeStudent => -2,
            Self::TwelfthGradeStudent => -1,
            Self::HighSchoolGraduate => 1,
            Self::SomeCollege => 2,
            Self::AssociatesDegree => 3,
            Self::BachelorsDegree => 4,
            Self::MastersDegree => 5,
            Self::DoctorateDegree => 6,
        }
    }

    /// Returns the [`value()`] clamped to be non-negative, suitable for
    /// indexing.
    ///
    /// [`value()`]: EducationLevel::value
    #[must_use]
    pub fn index(self) -> u8 {
        u8::try_from(self.value()).unwrap_or(0)
    }

    /// Maps the group ID of an occupation's typical entry education (as
    /// published by BLS) to an [`EducationLevel`].
    #[must_use]
    pub const fn from_group_id(group_id: u8) -> Option<Self> {
        Some(match group_id {
            1 | 2 => Self::HighSchoolGraduate,
            3 | 4 => Self::SomeCollege,
            5 => Self::AssociatesDegree,
            6 => Self::BachelorsDegree,
            7 => Self::MastersDegree,
            8 => Self::DoctorateDegree,
            _ => return None,
        })
    }

    /// Returns the number of years of college needed to reach this
    /// [`EducationLevel`] according to the provided [`YearsOfCollege`].
    #[must_use]
    pub const fn years_of_college(
        level: Option<Self>,
        years: &YearsOfCollege,
    ) -> u8 {
        match level {
            Some(
                Self::NinthGradeStudent
                | Self::TenthGradeStudent
                | Self::EleventhGradeStudent
                | Self::TwelfthGradeStudent
                | Self::HighSchoolGraduate,
            ) => years.high_school,
            Some(Self::AssociatesDegree) => years.associates,
            Some(Self::MastersDegree) => years.masters,
            Some(Self::DoctorateDegree) => years.doctorate,
            Some(Self::BachelorsDegree | Self::SomeCollege) | None => {
                years.bachelors
            }
        }
    }
}

/// Years of college required to complete a degree of some
/// [`EducationLevel`].
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, SmartDefault)]
#[serde(default)]
pub struct YearsOfCollege {
    /// High school levels.
    #[default(0)]
    pub high_school: u8,

    /// Associate's degree.
    #[default(2)]
    pub associates: u8,

    /// Bachelor's degree, also used when the level is unknown.
    #[default(4)]
    pub bachelors: u8,

    /// Master's degree.
    #[default(6)]
    pub masters: u8,

    /// Doctoral or professional degree.
    #[default(8)]
    pub doctorate: u8,
}
