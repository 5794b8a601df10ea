pub mod catalog;
pub mod engine;
pub mod matcher;

pub use crate::domain::model::{CalculationRequest, CalculationResult, PlanRecord, ScoredPlan};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, PlanRenderer, Storage};
pub use crate::utils::error::Result;
