use crate::binary::{
    BinaryData,
    BinaryInstance,
    BinaryRule,
    LabelCounts,
    Literal,
    merged_coverage,
    merged_purity,
};
use crate::error::{LadError, Result};
use super::core::{RuleGenerator, RulePool};


const STAGE: &str = "rule generation";


/// Purity drift tolerated while the seed itself is below the minimum
/// purity. Purity lies in `[0, 1]`, so any drift is tolerated.
const SAFETY_TOLERANCE: f64 = 1.0E4;


/// The maximized prime patterns heuristic.
///
/// For every instance, the minterm of the instance is generalized
/// by dropping one literal at a time, choosing the literal
/// whose removal covers the most instances of the seed's class.
/// Ties go to the lower discrepancy over the uncovered instances.
/// A removal is allowed only if the purity stays above
/// the minimum purity.
#[derive(Debug, Clone)]
pub struct MaxPatterns {
    pool: RulePool,
}


/// A candidate removal.
struct Candidate {
    position: usize,
    gained: LabelCounts,
    newly_covered: Vec<usize>,
    coverage: usize,
    discrepancy: f64,
}


impl MaxPatterns {
    /// Construct a new generator with the given minimum purity.
    pub fn new(minimum_purity: f64) -> Self {
        Self { pool: RulePool::new(minimum_purity) }
    }


    /// Grow the maximal pattern of the `seed`-th instance.
    fn expand(&self, data: &BinaryData<'_>, seed: usize)
        -> Result<Option<BinaryRule>>
    {
        let minimum_purity = self.pool.minimum_purity();
        let instance = data.get(seed);
        let label = instance.label();

        let mut literals = (0..data.n_cutpoints())
            .filter_map(|index| Literal::from_instance(instance, index))
            .collect::<Vec<_>>();

        let mut counts = LabelCounts::new(data.n_classes());
        let mut uncovered = Vec::new();
        uncovered.try_reserve(data.len())
            .map_err(LadError::exhausted(STAGE))?;
        for (i, other) in data.iter().enumerate() {
            if covers(&literals, other, label) {
                counts.add(other.label());
            } else {
                uncovered.push(i);
            }
        }

        let seed_purity = counts.purity(label);
        let safety_mode = seed_purity < minimum_purity;

        let mut candidate = Vec::with_capacity(literals.len());
        while !literals.is_empty() {
            let mut best: Option<Candidate> = None;
            for position in 0..literals.len() {
                candidate.clear();
                candidate.extend(
                    literals.iter()
                        .enumerate()
                        .filter(|&(k, _)| k != position)
                        .map(|(_, &literal)| literal)
                );

                let mut gained = LabelCounts::new(data.n_classes());
                let mut newly_covered = Vec::new();
                for &i in uncovered.iter() {
                    let other = data.get(i);
                    if covers(&candidate, other, label) {
                        gained.add(other.label());
                        newly_covered.push(i);
                    }
                }

                let purity = merged_purity(&counts, &gained, label);
                let allowed = purity >= minimum_purity
                    || (
                        safety_mode
                        && (purity - seed_purity).abs() < SAFETY_TOLERANCE
                    );
                if !allowed { continue; }

                let coverage = merged_coverage(&counts, &gained, label);
                let discrepancy = discrepancy(
                    data, &uncovered, &candidate, label
                );
                let better = match &best {
                    None => true,
                    Some(b) => {
                        coverage > b.coverage
                            || (
                                coverage == b.coverage
                                && discrepancy < b.discrepancy
                            )
                    },
                };
                if better {
                    best = Some(Candidate {
                        position,
                        gained,
                        newly_covered,
                        coverage,
                        discrepancy,
                    });
                }
            }

            let Some(best) = best else { break; };
            literals.remove(best.position);
            counts.merge(&best.gained);
            uncovered.retain(|i| !best.newly_covered.contains(i));
        }

        if literals.is_empty() {
            return Ok(None);
        }
        let rule = BinaryRule::new(literals, label, counts.purity(label));
        Ok(Some(rule))
    }
}


/// Returns `true` if `instance` is covered by the conjunction `literals`
/// grown for `label`.
/// A missing value keeps an instance of another class covered
/// and uncovers an instance of `label`.
fn covers(literals: &[Literal], instance: &BinaryInstance<'_>, label: usize)
    -> bool
{
    literals.iter()
        .all(|literal| {
            match literal.holds(instance) {
                Some(holds) => holds,
                None => instance.label() != label,
            }
        })
}


/// Number of literals of `literals` that `instance` violates.
fn distance(literals: &[Literal], instance: &BinaryInstance<'_>, label: usize)
    -> usize
{
    literals.iter()
        .filter(|literal| {
            match literal.holds(instance) {
                Some(holds) => !holds,
                None => instance.label() == label,
            }
        })
        .count()
}


/// Ratio of the mean distance of the uncovered instances of `label`
/// to the mean distance of the uncovered instances of the other classes.
/// Lower is better.
fn discrepancy(
    data: &BinaryData<'_>,
    uncovered: &[usize],
    literals: &[Literal],
    label: usize,
) -> f64
{
    let (mut same, mut n_same) = (0_usize, 0_usize);
    let (mut other, mut n_other) = (0_usize, 0_usize);
    for &i in uncovered {
        let instance = data.get(i);
        let dist = distance(literals, instance, label);
        if instance.label() == label {
            same += dist;
            n_same += 1;
        } else {
            other += dist;
            n_other += 1;
        }
    }

    let same = same as f64 / (1f64 + n_same as f64);
    let other = other as f64 / (1f64 + n_other as f64);
    if other == 0f64 { f64::INFINITY } else { same / other }
}


impl RuleGenerator for MaxPatterns {
    fn name(&self) -> &str {
        "Maximized Prime Patterns"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Minimum purity", format!("{}", self.pool.minimum_purity())),
        ]);
        Some(info)
    }


    fn minimum_purity(&self) -> f64 {
        self.pool.minimum_purity()
    }


    fn fit(&mut self, data: &BinaryData<'_>) -> Result<()> {
        self.pool.clear();
        for seed in 0..data.len() {
            if let Some(rule) = self.expand(data, seed)? {
                self.pool.add(rule);
            }
        }
        tracing::debug!(n_rules = self.pool.len(), "maximal patterns done");
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
        let x = Feature::numeric("x", vec![1.0, 2.0, 8.0, 9.0]);
        let y = Feature::numeric("y", vec![5.0, 1.0, 5.0, 1.0]);
        let sample = Sample::new(vec![x, y], &["A", "B"], vec![0, 0, 1, 1])
            .unwrap();
        let cutpoints = CutpointSet::from_cutpoints(vec![
            Cutpoint::threshold(0, "x", 5.0),
            Cutpoint::threshold(1, "y", 3.0),
        ]);
        (sample, cutpoints)
    }


    #[test]
    fn patterns_drop_irrelevant_literals() {
        let (sample, cutpoints) = toy();
        let data = BinaryData::new(&sample, &cutpoints);
        let mut generator = MaxPatterns::new(0.9);
        generator.fit(&data).unwrap();

        let rules = generator.rules();
        assert_eq!(rules.len(), 4);
        for rule in rules {
            assert_eq!(rule.len(), 1);
            assert_eq!(rule.literals()[0].index(), 0);
            assert_eq!(rule.purity(), 1.0);
        }
    }


    #[test]
    fn impure_seeds_yield_no_pattern() {
        // Rows 0 to 2 share `x = 1` but not their label,
        // so no seed among them reaches the minimum purity.
        let x = Feature::numeric("x", vec![1.0, 1.0, 1.0, 8.0, 9.0]);
        let sample = Sample::new(vec![x], &["A", "B"], vec![0, 0, 1, 1, 1])
            .unwrap();
        let cutpoints = CutpointSet::from_cutpoints(vec![
            Cutpoint::threshold(0, "x", 5.0),
        ]);
        let data = BinaryData::new(&sample, &cutpoints);
        let mut generator = MaxPatterns::new(0.85);

        for seed in 0..3 {
            assert!(generator.expand(&data, seed).unwrap().is_none());
        }

        generator.fit(&data).unwrap();
        let rules = generator.rules();
        assert!(!rules.is_empty());
        for rule in rules {
            assert!(rule.purity() >= 0.85, "{rule}");
            assert_eq!(rule.label(), 1);
            let above = Literal::Numeric { index: 0, sign: true };
            assert_eq!(rule.literals(), &[above]);
        }
    }


    #[test]
    fn discrepancy_without_other_class_is_infinite() {
        let (sample, cutpoints) = toy();
        let data = BinaryData::new(&sample, &cutpoints);
        let literals = [Literal::Numeric { index: 0, sign: false }];

        assert_eq!(discrepancy(&data, &[0, 1], &literals, 0), f64::INFINITY);
    }
}
