//! The `Classifier` trait.

use crate::sample::Sample;


/// A trait that defines the behavor of a multi-class classifier.
/// You only need to implement `distribution` method.
pub trait Classifier {
    /// Computes the per-label scores of the `row`-th example of `sample`.
    /// The returned vector has one entry per class label.
    fn distribution(&self, sample: &Sample, row: usize) -> Vec<f64>;


    /// Predicts the label of the `row`-th example of `sample`.
    /// Ties go to the lowest label index.
    fn predict(&self, sample: &Sample, row: usize) -> usize {
        let dist = self.distribution(sample, row);
        crate::rule_manager::manager::argmax(&dist)
    }


    /// Computes the per-label scores of every example.
    fn distribution_all(&self, sample: &Sample) -> Vec<Vec<f64>> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.distribution(sample, row))
            .collect::<Vec<_>>()
    }


    /// Predicts the labels of every example.
    fn predict_all(&self, sample: &Sample) -> Vec<usize>
    {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }
}
