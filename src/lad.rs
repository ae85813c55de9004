//! The `Lad` learner, its configuration, and the trained model.

/// Configuration types.
pub mod config;

/// Defines `LadBuilder`.
pub mod builder;

/// Defines `Lad`.
pub mod lad_algorithm;

/// Defines `TrainedModel`.
pub mod model;


pub use config::{FeatureSelection, LadConfig, RuleGeneration};
pub use builder::LadBuilder;
pub use lad_algorithm::Lad;
pub use model::{Diagnostic, TrainedModel};
