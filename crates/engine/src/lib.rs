//! `renoplan-engine`: renovation cost and financial estimation.
//!
//! Pure engine crate: every calculator takes plain inputs and returns a fresh,
//! serializable result. No CLI or IO dependencies.

pub mod allocation;
pub mod allocation_tables;
pub mod category;
pub mod confidence;
pub mod config;
pub mod error;
pub mod estimate;
pub mod model;
pub mod payment;
pub mod quality;
pub mod roi;
pub mod timeline;

pub use allocation::{allocate, CostBreakdown};
pub use category::{classify, Category};
pub use confidence::Confidence;
pub use config::EngineConfig;
pub use error::EstimateError;
pub use estimate::{estimate, ProjectEstimate};
pub use model::{CostTotals, LineItem, ProjectDescriptor};
pub use quality::QualityTier;
