use fixedbitset::FixedBitSet;

use crate::common::checker;
use crate::error::{LadError, Result};
use crate::sample::{Feature, NumericFeature, Sample};
use super::cutpoint::{Cutpoint, CutpointSet};


/// Generates the [`CutpointSet`] of a sample.
///
/// For each numeric attribute, the observed values are grouped
/// and sorted. A cutpoint is placed at the midpoint of two consecutive
/// values `v < u` if `u - v` exceeds the tolerance and
/// the two groups are not both pure with the same label.
///
/// # Example
/// ```no_run
/// use minilad::{Binarizer, Sample};
/// # fn run(sample: &Sample) -> minilad::Result<()> {
/// let cutpoints = Binarizer::new(0.0).fit(sample)?;
/// println!("{cutpoints}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Binarizer {
    tolerance: f64,
}


impl Default for Binarizer {
    fn default() -> Self {
        Self::new(0f64)
    }
}


impl Binarizer {
    /// Construct a new binarizer with the given cutpoint tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }


    /// Returns the cutpoint tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }


    /// Check the tolerance parameter.
    pub fn check(&self) -> Result<()> {
        checker::check_tolerance(self.tolerance)
    }


    /// Scan every attribute of `sample` and returns the cutpoints.
    pub fn fit(&self, sample: &Sample) -> Result<CutpointSet> {
        self.check()?;

        let n_classes = sample.n_classes();
        let target = sample.target();

        let mut cutpoints = Vec::new();
        for (att, feature) in sample.features().iter().enumerate() {
            match feature {
                Feature::Numeric(feat) => {
                    let groups = value_groups(feat, target, n_classes);
                    for pair in groups.windows(2) {
                        let (v, lv) = &pair[0];
                        let (u, lu) = &pair[1];
                        let delta = u - v;
                        if delta > self.tolerance && has_transition(lv, lu) {
                            let threshold = v + delta / 2f64;
                            cutpoints.push(
                                Cutpoint::threshold(att, &feat.name, threshold)
                            );
                        }
                    }
                },
                Feature::Nominal(feat) => {
                    cutpoints.push(
                        Cutpoint::nominal(
                            att, &feat.name, feat.categories.clone()
                        )
                    );
                },
            }
        }

        if cutpoints.is_empty() {
            return Err(LadError::NoSignalFound);
        }

        let cutpoints = CutpointSet::from_cutpoints(cutpoints);
        tracing::debug!(n_cutpoints = cutpoints.len(), "binarization done");
        Ok(cutpoints)
    }
}


/// Returns the distinct non-missing values of `feature`
/// in ascending order, paired with the set of labels observed at each.
fn value_groups(
    feature: &NumericFeature,
    target: &[usize],
    n_classes: usize,
) -> Vec<(f64, FixedBitSet)>
{
    let mut pairs = feature.sample.iter()
        .copied()
        .zip(target.iter().copied())
        .filter(|(v, _)| !v.is_nan())
        .collect::<Vec<_>>();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<(f64, FixedBitSet)> = Vec::new();
    for (v, y) in pairs {
        match groups.last_mut() {
            Some((value, labels)) if *value == v => {
                labels.insert(y);
            },
            _ => {
                let mut labels = FixedBitSet::with_capacity(n_classes);
                labels.insert(y);
                groups.push((v, labels));
            },
        }
    }
    groups
}


/// Returns `false` only if both groups hold exactly one,
/// and the same, label.
#[inline]
fn has_transition(left: &FixedBitSet, right: &FixedBitSet) -> bool {
    let pure = left.count_ones(..) == 1 && right.count_ones(..) == 1;
    !(pure && left == right)
}


#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: Vec<f64>, y: Vec<usize>) -> Sample {
        Sample::new(vec![Feature::numeric("x", x)], &["A", "B"], y).unwrap()
    }


    #[test]
    fn single_transition_yields_single_cutpoint() {
        let sample = sample(vec![1.0, 2.0, 8.0, 9.0], vec![0, 0, 1, 1]);
        let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();

        assert_eq!(cutpoints.len(), 1);
        assert!((cutpoints.value_at(0) - 5.0).abs() < 1e-12);
    }


    #[test]
    fn mixed_groups_yield_cutpoints() {
        // value 2.0 is seen with both labels.
        let sample = sample(vec![1.0, 2.0, 2.0, 3.0], vec![0, 0, 1, 0]);
        let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();

        let values = cutpoints.iter().map(|c| c.value()).collect::<Vec<_>>();
        assert_eq!(values, vec![1.5, 2.5]);
    }


    #[test]
    fn tolerance_filters_close_values() {
        let sample = sample(vec![1.0, 1.1, 5.0, 6.0], vec![0, 1, 0, 1]);
        let cutpoints = Binarizer::new(0.5).fit(&sample).unwrap();

        let values = cutpoints.iter().map(|c| c.value()).collect::<Vec<_>>();
        assert_eq!(values, vec![3.05, 5.5]);
    }


    #[test]
    fn missing_values_are_ignored() {
        let x = vec![1.0, f64::NAN, 8.0, 9.0];
        let sample = sample(x, vec![0, 1, 1, 1]);
        let cutpoints = Binarizer::new(0.0).fit(&sample).unwrap();

        assert_eq!(cutpoints.len(), 1);
        assert_eq!(cutpoints.value_at(0), 4.5);
    }


    #[test]
    fn constant_attribute_is_no_signal() {
        let sample = sample(vec![3.0; 4], vec![0, 1, 0, 1]);
        let result = Binarizer::new(0.0).fit(&sample);

        assert!(matches!(result, Err(LadError::NoSignalFound)));
    }


    #[test]
    fn negative_tolerance_is_rejected() {
        let sample = sample(vec![1.0, 2.0], vec![0, 1]);
        let result = Binarizer::new(-1.0).fit(&sample);

        assert!(matches!(result, Err(LadError::InvalidConfiguration(_))));
    }
}
