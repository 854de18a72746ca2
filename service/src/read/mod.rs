//! Read entities definitions.

pub mod roi_aggregate;

pub use self::roi_aggregate::SavedRoiAggregate;
