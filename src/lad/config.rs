use serde::{Serialize, Deserialize};

use crate::common::checker;
use crate::error::Result;
use crate::feature_selection::{
    FeatureSelector,
    GreedySetCover,
    IteratedSampling,
    greedy_set_cover::DEFAULT_SEPARATION_LEVEL,
    iterated_sampling,
};
use crate::rule_generator::{
    RuleGenerator,
    MaxPatterns,
    RandomRules,
    random_rules::RandomParams,
};


/// The default cutpoint tolerance.
pub const DEFAULT_CUTPOINT_TOLERANCE: f64 = 0.0;
/// The default minimum purity.
pub const DEFAULT_MINIMUM_PURITY: f64 = 0.85;


/// The cutpoint selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FeatureSelection {
    /// Chvátal's greedy heuristic on the full problem.
    GreedySetCover {
        /// Separation level, `0` disables the selection.
        separation_level: usize,
    },
    /// Greedy heuristic on sampled sub-problems.
    IteratedSampling {
        /// Separation level, `0` disables the selection.
        separation_level: usize,
        /// Number of sampled sub-problems.
        n_rounds: usize,
        /// Fraction of the problem sampled per round.
        sample_size: f64,
        /// Number of returned cutpoints.
        solution_size: usize,
        /// Whether the cutpoints are sampled too.
        sample_cutpoints: bool,
        /// Seed of the sampler.
        seed: u64,
    },
}


impl Default for FeatureSelection {
    fn default() -> Self {
        Self::GreedySetCover { separation_level: DEFAULT_SEPARATION_LEVEL }
    }
}


impl FeatureSelection {
    /// Iterated sampling with the default parameters.
    pub fn iterated_sampling(separation_level: usize) -> Self {
        Self::IteratedSampling {
            separation_level,
            n_rounds: iterated_sampling::DEFAULT_N_ROUNDS,
            sample_size: iterated_sampling::DEFAULT_SAMPLE_SIZE,
            solution_size: iterated_sampling::DEFAULT_SOLUTION_SIZE,
            sample_cutpoints: true,
            seed: iterated_sampling::DEFAULT_SEED,
        }
    }


    /// The separation level.
    pub fn separation_level(&self) -> usize {
        match *self {
            Self::GreedySetCover { separation_level } => separation_level,
            Self::IteratedSampling { separation_level, .. } => separation_level,
        }
    }


    /// Check the parameter ranges.
    pub fn check(&self) -> Result<()> {
        match *self {
            Self::GreedySetCover { .. } => Ok(()),
            Self::IteratedSampling {
                n_rounds, sample_size, solution_size, ..
            } => {
                checker::check_sampling(n_rounds, sample_size, solution_size)
            },
        }
    }


    /// Construct the selector.
    pub fn selector(&self) -> Box<dyn FeatureSelector> {
        match *self {
            Self::GreedySetCover { separation_level } => {
                Box::new(GreedySetCover::new(separation_level))
            },
            Self::IteratedSampling {
                separation_level,
                n_rounds,
                sample_size,
                solution_size,
                sample_cutpoints,
                seed,
            } => {
                let selector = IteratedSampling::new(separation_level)
                    .n_rounds(n_rounds)
                    .sample_size(sample_size)
                    .solution_size(solution_size)
                    .sample_cutpoints(sample_cutpoints)
                    .seed(seed);
                Box::new(selector)
            },
        }
    }
}


/// The rule generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum RuleGeneration {
    /// Maximized prime patterns, one per instance.
    #[default]
    MaxPatterns,
    /// Randomized greedy growth.
    Random(RandomParams),
}


impl RuleGeneration {
    /// Randomized growth with the default parameters.
    pub fn random() -> Self {
        Self::Random(RandomParams::default())
    }


    /// Check the parameter ranges.
    pub fn check(&self) -> Result<()> {
        match self {
            Self::MaxPatterns => Ok(()),
            Self::Random(params) => {
                checker::check_random_rules(
                    params.n_rules,
                    params.n_random_features,
                    params.min_relative_coverage,
                )
            },
        }
    }


    /// Construct the generator.
    pub fn generator(&self, minimum_purity: f64) -> Box<dyn RuleGenerator> {
        match self {
            Self::MaxPatterns => Box::new(MaxPatterns::new(minimum_purity)),
            Self::Random(params) => {
                Box::new(RandomRules::with_params(minimum_purity, *params))
            },
        }
    }
}


/// The whole configuration of [`Lad`](crate::Lad).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LadConfig {
    /// Minimum gap between two values to place a cutpoint.
    pub cutpoint_tolerance: f64,
    /// Minimum purity of an accepted rule.
    pub minimum_purity: f64,
    /// Cutpoint selection strategy.
    pub feature_selection: FeatureSelection,
    /// Rule generation strategy.
    pub rule_generation: RuleGeneration,
    /// Print the stats of each training run.
    #[serde(default)]
    pub verbose: bool,
}


impl Default for LadConfig {
    fn default() -> Self {
        Self {
            cutpoint_tolerance: DEFAULT_CUTPOINT_TOLERANCE,
            minimum_purity: DEFAULT_MINIMUM_PURITY,
            feature_selection: FeatureSelection::default(),
            rule_generation: RuleGeneration::default(),
            verbose: false,
        }
    }
}


impl LadConfig {
    /// Check every parameter range.
    pub fn validate(&self) -> Result<()> {
        checker::check_tolerance(self.cutpoint_tolerance)?;
        checker::check_purity(self.minimum_purity)?;
        self.feature_selection.check()?;
        self.rule_generation.check()?;
        Ok(())
    }


    /// Read a configuration from JSON.
    /// The configuration is validated.
    pub fn from_json<S: AsRef<str>>(json: S) -> Result<Self> {
        let config: Self = serde_json::from_str(json.as_ref())?;
        config.validate()?;
        Ok(config)
    }


    /// Write the configuration as JSON.
    pub fn to_json(&self) -> Result<String> {
        let json = serde_json::to_string_pretty(self)?;
        Ok(json)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LadError;

    #[test]
    fn defaults_are_valid() {
        let config = LadConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.feature_selection.separation_level(), 1);
    }


    #[test]
    fn json_round_trip_keeps_the_strategies() {
        let config = LadConfig {
            feature_selection: FeatureSelection::iterated_sampling(2),
            rule_generation: RuleGeneration::random(),
            ..LadConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(LadConfig::from_json(json).unwrap(), config);
    }


    #[test]
    fn invalid_json_values_are_rejected() {
        let json = r#"{
            "cutpoint_tolerance": 0.0,
            "minimum_purity": 0.3,
            "feature_selection": { "GreedySetCover": { "separation_level": 1 } },
            "rule_generation": "MaxPatterns"
        }"#;
        let result = LadConfig::from_json(json);
        assert!(matches!(result, Err(LadError::InvalidConfiguration(_))));
    }
}
