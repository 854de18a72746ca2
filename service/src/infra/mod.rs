//! Infrastructure layer.

pub mod calculator;
pub mod database;

pub use self::{calculator::Calculator, database::Database};
#[cfg(feature = "memory")]
pub use self::database::Memory;
