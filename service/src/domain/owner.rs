//! [`Owner`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User of a tenant owning a saved [`RoiAggregate`].
///
/// [`RoiAggregate`]: super::RoiAggregate
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[display("{tenant_id}/{user_id}")]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// ID of the tenant the user belongs to.
    pub tenant_id: TenantId,

    /// ID of the user.
    pub user_id: UserId,
}

/// ID of a tenant.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct TenantId(Uuid);

/// ID of a user within a tenant.
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
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct UserId(Uuid);

impl UserId {
    /// Creates a new random [`UserId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl TenantId {
    /// Creates a new random [`TenantId`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
