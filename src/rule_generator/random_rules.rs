use rand::prelude::*;
use rand::rngs::StdRng;
use rand::seq::index;
use serde::{Serialize, Deserialize};

use crate::binary::{BinaryData, BinaryRule, LabelCounts, Literal};
use crate::error::{LadError, Result};
use super::core::{RuleGenerator, RulePool};


const STAGE: &str = "rule generation";


/// Default number of grown rules per class.
pub const DEFAULT_N_RULES: usize = 250;
/// Default number of candidate literals per step.
pub const DEFAULT_N_RANDOM_FEATURES: usize = 10;
/// Default minimum relative coverage of the rule's own class.
pub const DEFAULT_MIN_RELATIVE_COVERAGE: f64 = 0.01;
/// Default seed.
pub const DEFAULT_SEED: u64 = 1;


/// Randomized greedy rule growth.
///
/// For every repetition and every class label, a rule is grown
/// from the empty conjunction.
/// At each step, a random batch of unused cutpoints is drawn,
/// each one is turned into a random literal, and the literal
/// giving the purest (then widest) coverage is appended.
/// Every time the purity reaches the current bar, the rule is
/// accepted and the bar moves a tenth of the way towards `1`.
///
/// # Example
/// ```no_run
/// use minilad::prelude::*;
/// let generator = RandomRules::new(0.85)
///     .n_rules(100)
///     .n_random_features(5)
///     .seed(42);
/// ```
#[derive(Debug, Clone)]
pub struct RandomRules {
    pool: RulePool,
    params: RandomParams,
}


/// Parameters of [`RandomRules`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandomParams {
    /// Number of grown rules per class.
    pub n_rules: usize,
    /// Number of candidate literals per step.
    pub n_random_features: usize,
    /// Minimum fraction of the own class a rule must cover.
    pub min_relative_coverage: f64,
    /// Seed of the generator.
    pub seed: u64,
}


impl Default for RandomParams {
    fn default() -> Self {
        Self {
            n_rules: DEFAULT_N_RULES,
            n_random_features: DEFAULT_N_RANDOM_FEATURES,
            min_relative_coverage: DEFAULT_MIN_RELATIVE_COVERAGE,
            seed: DEFAULT_SEED,
        }
    }
}


/// The coverage of a candidate literal.
struct Candidate {
    position: usize,
    literal: Literal,
    covered: Vec<usize>,
    counts: LabelCounts,
}


impl RandomRules {
    /// Construct a new generator with the given minimum purity.
    /// By default, the other parameters are set as follows;
    /// ```text
    /// n_rules: 250,
    /// n_random_features: 10,
    /// min_relative_coverage: 0.01,
    /// seed: 1,
    /// ```
    pub fn new(minimum_purity: f64) -> Self {
        Self::with_params(minimum_purity, RandomParams::default())
    }


    /// Construct a new generator from the given parameters.
    pub fn with_params(minimum_purity: f64, params: RandomParams) -> Self {
        Self { pool: RulePool::new(minimum_purity), params, }
    }


    /// Set the number of grown rules per class.
    pub fn n_rules(mut self, n_rules: usize) -> Self {
        self.params.n_rules = n_rules;
        self
    }


    /// Set the number of candidate literals per step.
    pub fn n_random_features(mut self, n_random_features: usize) -> Self {
        self.params.n_random_features = n_random_features;
        self
    }


    /// Set the minimum fraction of the own class a rule must cover.
    pub fn min_relative_coverage(mut self, coverage: f64) -> Self {
        self.params.min_relative_coverage = coverage;
        self
    }


    /// Set the seed of the generator.
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = seed;
        self
    }


    /// Returns the parameters.
    pub fn params(&self) -> &RandomParams {
        &self.params
    }


    /// Grow rules for `label` from the empty conjunction.
    fn expand<R: Rng>(
        &mut self,
        data: &BinaryData<'_>,
        label: usize,
        rng: &mut R,
    ) -> Result<()>
    {
        let n_label = data.coverage(label) as f64;

        let mut unused = (0..data.n_cutpoints()).collect::<Vec<_>>();
        unused.shuffle(rng);

        let mut covered = Vec::new();
        covered.try_reserve(data.len())
            .map_err(LadError::exhausted(STAGE))?;
        covered.extend(0..data.len());

        let mut literals = Vec::new();
        let mut bar = self.pool.minimum_purity();
        while !unused.is_empty() {
            let size = self.params.n_random_features.min(unused.len());
            let batch = index::sample(rng, unused.len(), size);

            let mut best: Option<Candidate> = None;
            for position in batch.iter() {
                let Some(literal) = random_literal(data, unused[position], rng)
                else { continue; };

                let candidate = coverage(
                    data, &covered, literal, label, position
                )?;
                let purity = candidate.counts.purity(label);
                let better = match &best {
                    None => true,
                    Some(b) => {
                        let best_purity = b.counts.purity(label);
                        purity > best_purity
                            || (
                                purity == best_purity
                                && candidate.counts.count(label)
                                    > b.counts.count(label)
                            )
                    },
                };
                if better { best = Some(candidate); }
            }

            let Some(best) = best else { break; };
            literals.push(best.literal);
            unused.swap_remove(best.position);
            covered = best.covered;
            let counts = best.counts;

            let relative = counts.count(label) as f64 / n_label;
            if relative < self.params.min_relative_coverage {
                break;
            }

            let purity = counts.purity(label);
            if purity >= bar {
                let rule = BinaryRule::new(literals.clone(), label, purity);
                self.pool.add(rule);
                bar += (1f64 - bar) / 10f64;
                if bar >= 1f64 { break; }
            }
        }
        Ok(())
    }
}


/// A literal on the `index`-th cutpoint with a random sign or category.
/// Returns `None` for a nominal cutpoint without any category.
fn random_literal<R: Rng>(data: &BinaryData<'_>, index: usize, rng: &mut R)
    -> Option<Literal>
{
    let cutpoint = &data.get(0).cutpoints()[index];
    if cutpoint.is_numeric() {
        let sign = rng.gen_bool(0.5);
        Some(Literal::Numeric { index, sign })
    } else {
        let n_categories = cutpoint.n_categories();
        if n_categories == 0 { return None; }
        let value = rng.gen_range(0..n_categories);
        Some(Literal::Nominal { index, value })
    }
}


/// The instances of `covered` that stay covered once `literal` is added.
/// An instance missing the tested value stays covered
/// only if it belongs to another class than `label`.
fn coverage(
    data: &BinaryData<'_>,
    covered: &[usize],
    literal: Literal,
    label: usize,
    position: usize,
) -> Result<Candidate>
{
    let mut kept = Vec::new();
    kept.try_reserve(covered.len())
        .map_err(LadError::exhausted(STAGE))?;
    let mut counts = LabelCounts::new(data.n_classes());
    for &i in covered {
        let instance = data.get(i);
        let keep = match literal.holds(instance) {
            Some(holds) => holds,
            None => instance.label() != label,
        };
        if keep {
            kept.push(i);
            counts.add(instance.label());
        }
    }
    Ok(Candidate { position, literal, covered: kept, counts, })
}


impl RuleGenerator for RandomRules {
    fn name(&self) -> &str {
        "Random Rules"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Minimum purity", format!("{}", self.pool.minimum_purity())),
            ("# of rules", format!("{}", self.params.n_rules)),
            ("# of random features", format!("{}", self.params.n_random_features)),
            ("Min. relative coverage", format!("{}", self.params.min_relative_coverage)),
            ("Seed", format!("{}", self.params.seed)),
        ]);
        Some(info)
    }


    fn minimum_purity(&self) -> f64 {
        self.pool.minimum_purity()
    }


    fn fit(&mut self, data: &BinaryData<'_>) -> Result<()> {
        self.pool.clear();
        if data.is_empty() { return Ok(()); }

        let mut rng = StdRng::seed_from_u64(self.params.seed);
        for _ in 0..self.params.n_rules {
            for label in 0..data.n_classes() {
                if data.coverage(label) == 0 { continue; }
                self.expand(data, label, &mut rng)?;
            }
        }
        tracing::debug!(n_rules = self.pool.len(), "random rules done");
        Ok(())
    }


    fn rules(&self) -> &[BinaryRule] {
        self.pool.rules()
    }


    fn take_rules(&mut self) -> Vec<BinaryRule> {
        self.pool.take()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarization::{Cutpoint, CutpointSet};
    use crate::sample::{Feature, Sample};

    fn toy() -> (Sample, CutpointSet) {
        let x = Feature::numeric("x", vec![1.0, 2.0, 3.0, 7.0, 8.0, 9.0]);
        let c = Feature::nominal_from_strs(
            "c", &[Some("r"), Some("g"), Some("r"), Some("g"), None, Some("g")]
        );
        let sample = Sample::new(
            vec![x, c], &["A", "B"], vec![0, 0, 0, 1, 1, 1]
        ).unwrap();
        let cutpoints = CutpointSet::from_cutpoints(vec![
            Cutpoint::threshold(0, "x", 5.0),
            Cutpoint::nominal(1, "c", vec!["r".into(), "g".into()]),
        ]);
        (sample, cutpoints)
    }


    #[test]
    fn accepted_rules_reach_the_minimum_purity() {
        let (sample, cutpoints) = toy();
        let data = BinaryData::new(&sample, &cutpoints);
        let mut generator = RandomRules::new(0.9).n_rules(25);
        generator.fit(&data).unwrap();

        assert!(!generator.rules().is_empty());
        assert!(generator.rules().iter().all(|r| r.purity() >= 0.9));
    }


    #[test]
    fn missing_values_stay_covered_for_other_classes() {
        let (sample, cutpoints) = toy();
        let data = BinaryData::new(&sample, &cutpoints);
        let literal = Literal::Nominal { index: 1, value: 0 };

        let for_a = coverage(&data, &[0, 1, 2, 3, 4, 5], literal, 0, 0)
            .unwrap();
        assert_eq!(for_a.covered, vec![0, 2, 4]);

        let for_b = coverage(&data, &[0, 1, 2, 3, 4, 5], literal, 1, 0)
            .unwrap();
        assert_eq!(for_b.covered, vec![0, 2]);
    }
}
