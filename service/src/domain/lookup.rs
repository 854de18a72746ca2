//! Resolved records provided by the lookup collaborators (location,
//! occupation, instructional program and institution resolution).
//!
//! These records are consumed as-is: this crate never performs the lookups
//! itself.

use std::sync::LazyLock;

use common::Percent;
use derive_more::{AsRef, Display};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Geographical location resolved from a ZIP code.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// [`ZipCode`] of this [`Location`].
    pub zip_code: ZipCode,

    /// Name of the city.
    #[serde(default)]
    pub city_name: Option<String>,

    /// Abbreviation of the state.
    #[serde(default)]
    pub state_abbreviation: Option<String>,

    /// Latitude of the [`ZipCode`] centroid.
    #[serde(default)]
    pub latitude: Option<Decimal>,

    /// Longitude of the [`ZipCode`] centroid.
    #[serde(default)]
    pub longitude: Option<Decimal>,
}

/// Five-digit US ZIP code.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Creates a new [`ZipCode`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`ZipCode`].
    fn check(code: impl AsRef<str>) -> bool {
        /// Regular expression checking [`ZipCode`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^\d{5}$").expect("valid regex")
        });

        REGEX.is_match(code.as_ref())
    }
}

impl TryFrom<String> for ZipCode {
    type Error = &'static str;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::new(code).ok_or("invalid `ZipCode`")
    }
}

impl From<ZipCode> for String {
    fn from(code: ZipCode) -> Self {
        code.0
    }
}

/// Occupation resolved from its O*NET-SOC code.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupation {
    /// O*NET-SOC code of this [`Occupation`].
    pub onet_code: String,

    /// Title of this [`Occupation`].
    pub title: String,

    /// Group ID of the education level typically required to enter this
    /// [`Occupation`], if known.
    ///
    /// See [`EducationLevel::from_group_id()`] for the mapping.
    ///
    /// [`EducationLevel::from_group_id()`]: super::EducationLevel::from_group_id
    #[serde(default)]
    pub typical_education_level_group_id: Option<u8>,
}

/// Instructional program resolved from its CIP code.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructionalProgram {
    /// CIP code of this [`InstructionalProgram`].
    pub cip_code: String,

    /// Title of this [`InstructionalProgram`].
    pub title: String,
}

/// Postsecondary institution resolved from its IPEDS unit ID.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Institution {
    /// IPEDS unit ID of this [`Institution`].
    pub unit_id: String,

    /// Name of this [`Institution`].
    pub name: String,

    /// Published [`CostOfAttendanceInfo`] of this [`Institution`].
    #[serde(default)]
    pub cost_of_attendance_info: CostOfAttendanceInfo,

    /// Average grant and scholarship aid received by students of this
    /// [`Institution`], if published.
    #[serde(default)]
    pub avg_grant_scholarship_aid_info: Option<GrantScholarshipAidInfo>,
}

/// Published cost of attendance of an [`Institution`].
///
/// Any part may be absent from the source data.
#[derive(
    Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct CostOfAttendanceInfo {
    /// Tuition and fees per residency.
    pub tuition_and_fees: Option<TuitionAndFees>,

    /// Books and supplies.
    pub books_and_supplies: Option<Expense>,

    /// Living costs per living arrangement.
    pub living_arrangement: Option<LivingArrangement>,
}

/// Annual expense along with its last year change.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct Expense {
    /// Amount of this [`Expense`].
    pub expense_amount: Option<Decimal>,

    /// Change of the amount since the last year.
    pub percent_change_from_last_year: Option<Percent>,
}

impl Expense {
    /// Returns the amount of this [`Expense`], if it's present and non-zero.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        self.expense_amount.filter(|a| !a.is_zero())
    }

    /// Returns the change of this [`Expense`], if it's present and
    /// non-zero.
    #[must_use]
    pub fn change(&self) -> Option<Percent> {
        self.percent_change_from_last_year.filter(|p| !p.is_zero())
    }
}

/// Tuition and fees of an [`Institution`] per residency.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct TuitionAndFees {
    /// Tuition and fees for in-district students.
    pub in_district: Expense,

    /// Tuition and fees for in-state students.
    pub in_state: Expense,

    /// Tuition and fees for out-of-state students.
    pub out_of_state: Expense,
}

/// Living costs of an [`Institution`] per living arrangement.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct LivingArrangement {
    /// Living on campus.
    pub on_campus: LivingCosts,

    /// Living off campus, not with family.
    pub off_campus_not_with_family: LivingCosts,

    /// Living off campus, with family.
    pub off_campus_with_family: LivingCosts,
}

/// Living costs of a single living arrangement.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct LivingCosts {
    /// Room and board.
    pub room_and_board: Expense,

    /// Other living expenses.
    pub other_expenses: Expense,
}

/// Average grant and scholarship aid received at an [`Institution`].
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct GrantScholarshipAidInfo {
    /// Federal grants other than the Pell grant.
    pub other_federal_grants: AidReceived,

    /// State or local government grants and scholarships.
    pub state_local_govt_grant_or_scholarships: AidReceived,

    /// Institutional grants and scholarships.
    pub institutional_grants_or_scholarships: AidReceived,
}

impl GrantScholarshipAidInfo {
    /// Sums all the grant and scholarship aid, excluding the Pell grant.
    ///
    /// Absent amounts count as zero.
    #[must_use]
    pub fn total_excluding_pell_grant(&self) -> Decimal {
        [
            self.other_federal_grants,
            self.state_local_govt_grant_or_scholarships,
            self.institutional_grants_or_scholarships,
        ]
        .iter()
        .map(|a| a.avg_amount_aid_received.unwrap_or_default())
        .sum()
    }
}

/// Average amount of a single kind of aid received.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize,
)]
#[serde(default, rename_all = "camelCase")]
pub struct AidReceived {
    /// Average amount received, if published.
    pub avg_amount_aid_received: Option<Decimal>,
}
