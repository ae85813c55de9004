use std::slice::Iter;

use crate::sample::Sample;
use crate::binarization::CutpointSet;
use super::binary_instance::BinaryInstance;


/// Per-label instance counts of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCounts {
    counts: Vec<usize>,
    total: usize,
}


impl LabelCounts {
    /// Construct zero counts over `n_classes` labels.
    pub fn new(n_classes: usize) -> Self {
        Self { counts: vec![0; n_classes], total: 0, }
    }


    /// Count one more instance of `label`.
    #[inline]
    pub fn add(&mut self, label: usize) {
        self.counts[label] += 1;
        self.total += 1;
    }


    /// Count one less instance of `label`.
    #[inline]
    pub fn remove(&mut self, label: usize) {
        assert!(self.counts[label] > 0, "no instance of label {label} left");
        self.counts[label] -= 1;
        self.total -= 1;
    }


    /// Number of instances of `label`.
    #[inline]
    pub fn count(&self, label: usize) -> usize {
        self.counts[label]
    }


    /// Number of instances.
    #[inline]
    pub fn total(&self) -> usize {
        self.total
    }


    /// Number of labels.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }


    /// Fraction of instances labeled `label`, `0` for an empty collection.
    #[inline]
    pub fn purity(&self, label: usize) -> f64 {
        ratio(self.counts[label], self.total)
    }


    /// Number of instances labeled `label`.
    #[inline]
    pub fn coverage(&self, label: usize) -> usize {
        self.counts[label]
    }


    /// Add the counts of `other` to `self`.
    pub fn merge(&mut self, other: &Self) {
        assert_eq!(self.counts.len(), other.counts.len());
        self.counts.iter_mut()
            .zip(&other.counts)
            .for_each(|(a, b)| { *a += b; });
        self.total += other.total;
    }
}


#[inline(always)]
fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 { 0f64 } else { count as f64 / total as f64 }
}


/// Purity of `label` over the union of the collections
/// counted by `a` and `b`. Neither input is modified.
#[inline]
pub fn merged_purity(a: &LabelCounts, b: &LabelCounts, label: usize) -> f64 {
    ratio(a.count(label) + b.count(label), a.total() + b.total())
}


/// Coverage of `label` over the union of the collections
/// counted by `a` and `b`. Neither input is modified.
#[inline]
pub fn merged_coverage(a: &LabelCounts, b: &LabelCounts, label: usize)
    -> usize
{
    a.count(label) + b.count(label)
}


/// A collection of [`BinaryInstance`]s with its running label counts.
#[derive(Debug, Clone)]
pub struct BinaryData<'a> {
    instances: Vec<BinaryInstance<'a>>,
    counts: LabelCounts,
    n_cutpoints: usize,
}


impl<'a> BinaryData<'a> {
    /// Wrap every row of `sample`.
    pub fn new(sample: &'a Sample, cutpoints: &'a CutpointSet) -> Self {
        let n_sample = sample.shape().0;
        let mut data = Self::empty(sample.n_classes(), cutpoints.len());
        (0..n_sample).for_each(|row| {
            data.push(BinaryInstance::new(sample, cutpoints, row));
        });
        data
    }


    /// Construct an empty collection.
    pub fn empty(n_classes: usize, n_cutpoints: usize) -> Self {
        Self {
            instances: Vec::new(),
            counts: LabelCounts::new(n_classes),
            n_cutpoints,
        }
    }


    /// Append an instance.
    pub fn push(&mut self, instance: BinaryInstance<'a>) {
        assert_eq!(
            instance.n_cutpoints(), self.n_cutpoints,
            "the instance is read through another cutpoint set"
        );
        self.counts.add(instance.label());
        self.instances.push(instance);
    }


    /// Keep only the instances for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
        where F: FnMut(&BinaryInstance<'a>) -> bool
    {
        let counts = &mut self.counts;
        self.instances.retain(|instance| {
            let kept = keep(instance);
            if !kept { counts.remove(instance.label()); }
            kept
        });
    }


    /// Returns the `i`-th instance.
    #[inline]
    pub fn get(&self, i: usize) -> &BinaryInstance<'a> {
        &self.instances[i]
    }


    /// Returns the instances.
    #[inline]
    pub fn instances(&self) -> &[BinaryInstance<'a>] {
        &self.instances[..]
    }


    /// Returns an iterator over the instances.
    pub fn iter(&self) -> Iter<'_, BinaryInstance<'a>> {
        self.instances.iter()
    }


    /// Number of instances.
    #[inline]
    pub fn len(&self) -> usize {
        self.instances.len()
    }


    /// Returns `true` if there is no instance.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }


    /// Number of binary attributes (cutpoints).
    #[inline]
    pub fn n_cutpoints(&self) -> usize {
        self.n_cutpoints
    }


    /// Number of labels.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.counts.n_classes()
    }


    /// Running label counts.
    #[inline]
    pub fn counts(&self) -> &LabelCounts {
        &self.counts
    }


    /// Fraction of instances labeled `label`.
    #[inline]
    pub fn purity(&self, label: usize) -> f64 {
        self.counts.purity(label)
    }


    /// Number of instances labeled `label`.
    #[inline]
    pub fn coverage(&self, label: usize) -> usize {
        self.counts.coverage(label)
    }
}


impl<'a, 'b> IntoIterator for &'b BinaryData<'a> {
    type Item = &'b BinaryInstance<'a>;
    type IntoIter = Iter<'b, BinaryInstance<'a>>;
    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarization::Cutpoint;
    use crate::sample::Feature;

    #[test]
    fn merged_statistics_do_not_touch_inputs() {
        let mut a = LabelCounts::new(2);
        a.add(0);
        a.add(0);
        a.add(1);
        let mut b = LabelCounts::new(2);
        b.add(0);

        assert_eq!(merged_coverage(&a, &b, 0), 3);
        assert!((merged_purity(&a, &b, 0) - 0.75).abs() < 1e-12);
        assert_eq!(a.total(), 3);
        assert_eq!(b.total(), 1);

        a.merge(&b);
        assert_eq!(a.purity(0), merged_purity(&a, &LabelCounts::new(2), 0));
    }


    #[test]
    fn empty_collection_has_zero_purity() {
        let counts = LabelCounts::new(3);
        assert_eq!(counts.purity(1), 0.0);
        assert_eq!(merged_purity(&counts, &counts, 2), 0.0);
    }


    #[test]
    fn retain_keeps_counts_in_sync() {
        let x = Feature::numeric("x", vec![1.0, 2.0, 3.0, 4.0]);
        let sample = Sample::new(vec![x], &["A", "B"], vec![0, 0, 1, 1])
            .unwrap();
        let cutpoints = CutpointSet::from_cutpoints(vec![
            Cutpoint::threshold(0, "x", 2.5),
        ]);
        let mut data = BinaryData::new(&sample, &cutpoints);
        assert_eq!(data.coverage(0), 2);

        data.retain(|instance| instance.bin_at(0) == Some(true));
        assert_eq!(data.len(), 2);
        assert_eq!(data.coverage(0), 0);
        assert_eq!(data.purity(1), 1.0);
    }
}
