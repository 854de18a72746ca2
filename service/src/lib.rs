//! Service contains the ROI modeling business logic.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod dto;
pub mod infra;
pub mod mapper;
pub mod query;
pub mod read;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use smart_default::SmartDefault;

#[cfg(doc)]
use infra::{Calculator, Database};

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Config {
    /// [`domain::roi_model::Config`] of all the [`domain::RoiModel`]s.
    pub roi_model: domain::roi_model::Config,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the `CONF`-prefixed environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, Calc> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Calculator`] of this [`Service`].
    calculator: Calc,
}

impl<Db, Calc> Service<Db, Calc> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, calculator: Calc) -> Self {
        Self {
            config,
            database,
            calculator,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Calculator`] of this [`Service`].
    #[must_use]
    pub fn calculator(&self) -> &Calc {
        &self.calculator
    }
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::Config;

    #[test]
    fn loads_defaults_without_sources() {
        let config = Config::new("nonexistent.toml").unwrap();

        assert_eq!(config.roi_model.default_retirement_age, 67);
        assert_eq!(config.roi_model.years_to_complete_default, 4);
        assert_eq!(config.roi_model.radius_in_miles, 50);
        assert_eq!(config.roi_model.estimated_efc, Decimal::from(3500));
        assert!(!config.roi_model.strict_validation);
    }
}
