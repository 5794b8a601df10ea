pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::catalog_source::{catalog_source_from_location, load_catalog};
pub use adapters::storage::LocalStorage;
pub use adapters::svg::SvgPlanRenderer;
pub use core::{catalog::Catalog, engine::PlannerEngine, matcher::PlanMatcher};
pub use domain::model::{ApartmentType, CalculationRequest, CalculationResult, PlanRecord};
pub use utils::error::{PlannerError, Result};
