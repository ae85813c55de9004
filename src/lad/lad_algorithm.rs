use colored::Colorize;

use crate::binarization::Binarizer;
use crate::binary::BinaryData;
use crate::error::{LadError, Result};
use crate::feature_selection::FeatureSelector;
use crate::rule_generator::RuleGenerator;
use crate::rule_manager::RuleManager;
use crate::sample::Sample;
use super::builder::LadBuilder;
use super::config::LadConfig;
use super::model::{Diagnostic, TrainedModel};


const FULL_WIDTH: usize = 60;
const STAT_WIDTH: usize = (FULL_WIDTH - 4) / 2;


/// Logical Analysis of Data.
///
/// The training runs the following stages in order;
/// 1. Binarization: [`Binarizer`] places the cutpoints.
/// 2. Feature selection (if the separation level is positive):
///    a [`FeatureSelector`] narrows the cutpoints.
/// 3. Rule generation: a [`RuleGenerator`] searches pure rules.
/// 4. [`RuleManager`] weights the rules for voting.
///
/// A failure of the feature selection stage leaves the cutpoints
/// unreduced. A failure of the rule generation stage keeps
/// the rules found so far. Both are reported through
/// [`TrainedModel::diagnostics`].
///
/// # Example
/// ```no_run
/// use minilad::prelude::*;
///
/// let sample = SampleReader::default()
///     .file("iris.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()
///     .unwrap();
///
/// let lad = Lad::builder()
///     .minimum_purity(0.9)
///     .build()
///     .unwrap();
/// let model = lad.fit(&sample).unwrap();
///
/// println!("{model}");
/// println!("accuracy: {}", model.accuracy(&sample));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lad {
    config: LadConfig,
}


/// Counts of a training run, for the verbose report.
struct Stats {
    n_cutpoints: usize,
    n_selected: usize,
    n_candidates: usize,
    n_rules: usize,
}


impl Lad {
    /// Returns a [`LadBuilder`] with the default parameters.
    pub fn builder() -> LadBuilder {
        LadBuilder::default()
    }


    pub(crate) fn from_config(config: LadConfig) -> Self {
        Self { config }
    }


    /// The configuration of this learner.
    pub fn config(&self) -> &LadConfig {
        &self.config
    }


    /// Train on `sample`.
    pub fn fit(&self, sample: &Sample) -> Result<TrainedModel> {
        self.config.validate()?;
        let mut diagnostics = Vec::new();

        let mut cutpoints = Binarizer::new(self.config.cutpoint_tolerance)
            .fit(sample)?;
        let n_cutpoints = cutpoints.len();

        let selector = self.config.feature_selection.selector();
        if selector.separation_level() > 0 {
            let selection = {
                let data = BinaryData::new(sample, &cutpoints);
                selector.select(&data)
            };
            match selection {
                Ok(indices) => { cutpoints.narrow(&indices); },
                Err(e) => {
                    recover("feature selection", e, &mut diagnostics)?;
                },
            }
        }
        tracing::debug!(
            n_cutpoints,
            n_selected = cutpoints.len(),
            "feature selection stage done"
        );

        let mut generator = self.config.rule_generation
            .generator(self.config.minimum_purity);
        let rules = {
            let data = BinaryData::new(sample, &cutpoints);
            if let Err(e) = generator.fit(&data) {
                recover("rule generation", e, &mut diagnostics)?;
            }
            generator.take_rules()
        };
        tracing::debug!(n_candidates = rules.len(), "rule generation stage done");

        let manager = RuleManager::new(&rules, sample, &cutpoints);

        if self.config.verbose {
            let stats = Stats {
                n_cutpoints,
                n_selected: cutpoints.len(),
                n_candidates: rules.len(),
                n_rules: manager.rules().len(),
            };
            self.print_stats(selector.as_ref(), generator.as_ref(), &stats);
        }

        Ok(TrainedModel::new(cutpoints, manager, diagnostics))
    }


    fn print_stats(
        &self,
        selector: &dyn FeatureSelector,
        generator: &dyn RuleGenerator,
        stats: &Stats,
    )
    {
        let header = format!(
            "{:=>FULL_WIDTH$}\n{:^FULL_WIDTH$}\n{:->FULL_WIDTH$}",
            "", "STATS".bold(), "",
        );
        println!(
            "\n{header}\n\
            + {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
            "Cutpoint tolerance".bold(),
            self.config.cutpoint_tolerance.to_string().bold().green(),
        );

        let stages = [
            ("Feature Selection", selector.name(), selector.info()),
            ("Rule Generation", generator.name(), generator.info()),
        ];
        for (stage, name, info) in stages {
            println!(
                "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
                stage.bold(),
                name.bold().green(),
            );
            if let Some(info) = info {
                let line = info.into_iter()
                    .map(|(key, val)| {
                        format!(
                            "    + {:<STAT_WIDTH$}\t{:>width$}",
                            key,
                            val.bold().yellow(),
                            width = STAT_WIDTH - 8
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                println!("{line}");
            }
        }

        let counts = [
            ("# of cutpoints", stats.n_cutpoints),
            ("# of selected cutpoints", stats.n_selected),
            ("# of candidate rules", stats.n_candidates),
            ("# of rules", stats.n_rules),
        ];
        for (key, val) in counts {
            println!(
                "+ {:<STAT_WIDTH$}\t{:>STAT_WIDTH$}",
                key.bold(),
                val.to_string().bold().green(),
            );
        }
        println!("{:=^FULL_WIDTH$}", "");
    }
}


/// Keep going after a recoverable error, fail otherwise.
fn recover(
    stage: &'static str,
    error: LadError,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<()>
{
    if !error.is_recoverable() {
        return Err(error);
    }
    tracing::warn!(stage, %error, "recovered from a failed stage");
    diagnostics.push(Diagnostic::new(stage, &error));
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhausted_memory_becomes_a_diagnostic() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let error = LadError::exhausted("rule generation")(source);
        let mut diagnostics = Vec::new();

        recover("rule generation", error, &mut diagnostics).unwrap();

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].stage, "rule generation");
        assert!(!diagnostics[0].message.is_empty());
    }


    #[test]
    fn other_errors_are_not_recovered() {
        let mut diagnostics = Vec::new();
        let result = recover(
            "rule generation", LadError::NoSignalFound, &mut diagnostics
        );

        assert!(matches!(result, Err(LadError::NoSignalFound)));
        assert!(diagnostics.is_empty());
    }
}
