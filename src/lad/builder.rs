use crate::error::Result;
use super::config::{FeatureSelection, LadConfig, RuleGeneration};
use super::lad_algorithm::Lad;


/// A struct that builds [`Lad`].
/// `LadBuilder` keeps the parameters of every stage.
///
/// # Example
///
/// ```no_run
/// use minilad::prelude::*;
///
/// let lad = LadBuilder::default()
///     .cutpoint_tolerance(0.0)
///     .minimum_purity(0.9)
///     .feature_selection(FeatureSelection::iterated_sampling(1))
///     .rule_generation(RuleGeneration::random())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct LadBuilder {
    config: LadConfig,
}


impl LadBuilder {
    /// Construct a new instance of [`LadBuilder`].
    /// By default, [`LadBuilder`] sets the parameters as follows;
    /// ```text
    /// cutpoint_tolerance: 0.0,
    /// minimum_purity: 0.85,
    /// feature_selection: FeatureSelection::GreedySetCover { separation_level: 1 },
    /// rule_generation: RuleGeneration::MaxPatterns,
    /// verbose: false,
    /// ```
    pub fn new() -> Self {
        Self::default()
    }


    /// Start from an existing configuration.
    pub fn from_config(config: LadConfig) -> Self {
        Self { config }
    }


    /// Set the minimum gap between two values to place a cutpoint.
    /// Default value is `0.0`.
    pub fn cutpoint_tolerance(mut self, tolerance: f64) -> Self {
        self.config.cutpoint_tolerance = tolerance;
        self
    }


    /// Set the minimum purity of an accepted rule.
    /// Default value is `0.85`.
    pub fn minimum_purity(mut self, purity: f64) -> Self {
        self.config.minimum_purity = purity;
        self
    }


    /// Set the cutpoint selection strategy.
    /// See [`FeatureSelection`].
    pub fn feature_selection(mut self, selection: FeatureSelection) -> Self {
        self.config.feature_selection = selection;
        self
    }


    /// Set the rule generation strategy.
    /// See [`RuleGeneration`].
    pub fn rule_generation(mut self, generation: RuleGeneration) -> Self {
        self.config.rule_generation = generation;
        self
    }


    /// Print the stats of each training run.
    pub fn verbose(mut self, flag: bool) -> Self {
        self.config.verbose = flag;
        self
    }


    /// Build a [`Lad`].
    /// This method consumes `self`
    /// and fails if a parameter is out of range.
    pub fn build(self) -> Result<Lad> {
        self.config.validate()?;
        Ok(Lad::from_config(self.config))
    }
}
