use serde::{Serialize, Deserialize};

use std::fmt;

use crate::binary::BinaryRule;
use crate::binarization::CutpointSet;
use crate::hypothesis::Classifier;
use crate::sample::Sample;
use super::numerical_rule::NumericalRule;


/// Weight moved per misclassified row during the adjustment pass.
pub const WEIGHT_STEP: f64 = 0.01;


/// The final classifier: a weighted vote over [`NumericalRule`]s.
///
/// Built once from the accepted rules. The weights start uniform per class
/// and go through one adjustment pass over the training sample.
/// Rules whose weight falls to `0` are dropped and
/// the remaining weights are normalized so that
/// the weights of each class sum to `1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleManager {
    rules: Vec<NumericalRule>,
    counts: Vec<usize>,
    class_names: Vec<String>,
    majority: usize,
}


impl RuleManager {
    /// Construct the manager from the accepted rules,
    /// the training sample, and the cutpoints the rules were built with.
    pub fn new(rules: &[BinaryRule], sample: &Sample, cutpoints: &CutpointSet)
        -> Self
    {
        let n_classes = sample.n_classes();

        let mut numerical: Vec<NumericalRule> = Vec::new();
        let mut counts = vec![0_usize; n_classes];
        for rule in rules {
            let rule = NumericalRule::new(rule, cutpoints);
            if !numerical.contains(&rule) {
                counts[rule.label()] += 1;
                numerical.push(rule);
            }
        }

        let class_counts = sample.class_counts();
        let majority = class_counts.iter()
            .enumerate()
            .fold(0, |best, (k, &c)| if c > class_counts[best] { k } else { best });

        let mut manager = Self {
            rules: numerical,
            counts,
            class_names: sample.class_names().to_vec(),
            majority,
        };
        manager.adjust_weights(sample);

        tracing::debug!(n_rules = manager.rules.len(), "rule manager built");
        manager
    }


    /// One pass over `sample` moving weight from the rules
    /// voting for a wrong label to the rules voting for the true one.
    fn adjust_weights(&mut self, sample: &Sample) {
        for rule in self.rules.iter_mut() {
            let weight = 1f64 / self.counts[rule.label()] as f64;
            rule.set_weight(weight);
        }

        let n_sample = sample.shape().0;
        for row in 0..n_sample {
            let votes = self.votes(sample, row);
            let argmax = argmax(&votes);
            let y = sample.label(row);
            if argmax == y || votes[argmax] == 0f64 { continue; }

            for rule in self.rules.iter_mut() {
                if !rule.covers(sample, row) { continue; }
                let weight = if rule.label() == y {
                    rule.weight() + WEIGHT_STEP
                } else {
                    rule.weight() - WEIGHT_STEP
                };
                rule.set_weight(weight);
            }
        }

        self.rules.retain(|rule| rule.weight() > 0f64);

        let n_classes = self.class_names.len();
        let mut totals = vec![0f64; n_classes];
        self.counts = vec![0; n_classes];
        for rule in self.rules.iter() {
            totals[rule.label()] += rule.weight();
            self.counts[rule.label()] += 1;
        }
        for rule in self.rules.iter_mut() {
            let weight = rule.weight() / totals[rule.label()];
            rule.set_weight(weight);
        }
    }


    /// Sum of the weights of the rules covering `row`, per label.
    /// A negative weight counts as `0`.
    pub fn votes(&self, sample: &Sample, row: usize) -> Vec<f64> {
        let mut votes = vec![0f64; self.class_names.len()];
        self.rules.iter()
            .filter(|rule| rule.covers(sample, row))
            .for_each(|rule| {
                votes[rule.label()] += rule.weight().max(0f64);
            });
        votes
    }


    /// All the rules, in insertion order.
    pub fn rules(&self) -> &[NumericalRule] {
        &self.rules[..]
    }


    /// The rules voting for `label`.
    pub fn rules_for(&self, label: usize) -> impl Iterator<Item = &NumericalRule> {
        self.rules.iter().filter(move |rule| rule.label() == label)
    }


    /// Number of rules voting for `label`.
    pub fn n_rules(&self, label: usize) -> usize {
        self.counts[label]
    }


    /// The most frequent training label, lowest index on ties.
    pub fn majority_label(&self) -> usize {
        self.majority
    }


    /// The class names.
    pub fn class_names(&self) -> &[String] {
        &self.class_names[..]
    }
}


/// Index of the first maximum.
#[inline]
pub(crate) fn argmax(values: &[f64]) -> usize {
    values.iter()
        .enumerate()
        .fold(0, |best, (k, &v)| if v > values[best] { k } else { best })
}


impl Classifier for RuleManager {
    /// The per-label votes at `row`.
    /// If every label gets the same score, the output is
    /// the one-hot vector of the majority label.
    fn distribution(&self, sample: &Sample, row: usize) -> Vec<f64> {
        let mut votes = self.votes(sample, row);
        let first = votes[0];
        if votes.iter().all(|&v| v == first) {
            votes.iter_mut().for_each(|v| { *v = 0f64; });
            votes[self.majority] = 1f64;
        }
        votes
    }
}


impl fmt::Display for RuleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, name) in self.class_names.iter().enumerate() {
            if label > 0 { writeln!(f)?; }
            writeln!(
                f,
                " # Patterns class \"{name}\": {}\n",
                self.counts[label]
            )?;
            for rule in self.rules_for(label) {
                writeln!(f, "{rule}")?;
            }
        }
        Ok(())
    }
}
