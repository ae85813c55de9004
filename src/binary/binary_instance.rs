use crate::sample::Sample;
use crate::binarization::CutpointSet;


/// A read-only view pairing one row of a [`Sample`]
/// with a [`CutpointSet`].
///
/// For the `i`-th cutpoint,
/// a numeric attribute is read as the test `value > threshold` and
/// a nominal attribute is read as its raw category index.
#[derive(Debug, Clone, Copy)]
pub struct BinaryInstance<'a> {
    sample: &'a Sample,
    cutpoints: &'a CutpointSet,
    row: usize,
}


impl<'a> BinaryInstance<'a> {
    /// Construct the binary view of the `row`-th example.
    ///
    /// # Panics
    /// Panics if `row` is out of range.
    pub fn new(sample: &'a Sample, cutpoints: &'a CutpointSet, row: usize)
        -> Self
    {
        let n_sample = sample.shape().0;
        assert!(row < n_sample, "row {row} is out of range (0..{n_sample})");
        Self { sample, cutpoints, row, }
    }


    /// Returns the row index of this instance in the sample.
    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }


    /// Returns the label index of this instance.
    #[inline]
    pub fn label(&self) -> usize {
        self.sample.label(self.row)
    }


    /// Returns the number of binary attributes.
    #[inline]
    pub fn n_cutpoints(&self) -> usize {
        self.cutpoints.len()
    }


    /// Returns the cutpoint set this instance is read through.
    #[inline]
    pub fn cutpoints(&self) -> &'a CutpointSet {
        self.cutpoints
    }


    /// Raw value of the attribute tested by the `index`-th cutpoint.
    #[inline]
    fn raw(&self, index: usize) -> Option<f64> {
        let n_cutpoints = self.cutpoints.len();
        assert!(
            index < n_cutpoints,
            "cutpoint index {index} is out of range (0..{n_cutpoints})"
        );
        let attribute = self.cutpoints.attribute_at(index);
        let n_feature = self.sample.shape().1;
        assert!(
            attribute < n_feature,
            "attribute {attribute} is out of range (0..{n_feature})"
        );
        self.sample.value(attribute, self.row)
    }


    /// Returns `true` if the attribute tested by
    /// the `index`-th cutpoint is missing.
    #[inline]
    pub fn is_missing(&self, index: usize) -> bool {
        self.raw(index).is_none()
    }


    /// Returns `true` if the `index`-th cutpoint is a threshold.
    #[inline]
    pub fn is_numeric(&self, index: usize) -> bool {
        self.cutpoints.is_numeric(index)
    }


    /// Returns `value > threshold` for the `index`-th cutpoint,
    /// `None` if the value is missing.
    ///
    /// # Panics
    /// Panics if the `index`-th cutpoint is nominal.
    #[inline]
    pub fn bin_at(&self, index: usize) -> Option<bool> {
        assert!(
            self.is_numeric(index),
            "cutpoint {index} is nominal and has no binary value"
        );
        let threshold = self.cutpoints.value_at(index);
        self.raw(index).map(|v| v > threshold)
    }


    /// Returns the category index for the `index`-th cutpoint,
    /// `None` if the value is missing.
    ///
    /// # Panics
    /// Panics if the `index`-th cutpoint is numeric.
    #[inline]
    pub fn value_at(&self, index: usize) -> Option<usize> {
        assert!(
            !self.is_numeric(index),
            "cutpoint {index} is numeric and has no category"
        );
        self.raw(index).map(|v| v as usize)
    }


    /// Returns `true` if the `index`-th cutpoint tells
    /// `self` and `other` apart.
    /// A missing value on either side never separates.
    pub fn separates(&self, index: usize, other: &Self) -> bool {
        if self.is_numeric(index) {
            match (self.bin_at(index), other.bin_at(index)) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            }
        } else {
            match (self.value_at(index), other.value_at(index)) {
                (Some(a), Some(b)) => a != b,
                _ => false,
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarization::Cutpoint;
    use crate::sample::Feature;

    fn toy() -> (Sample, CutpointSet) {
        let x = Feature::numeric("x", vec![1.0, 4.0, f64::NAN]);
        let c = Feature::nominal_from_strs(
            "c", &[Some("r"), Some("g"), Some("r")]
        );
        let sample = Sample::new(vec![x, c], &["A", "B"], vec![0, 1, 1])
            .unwrap();
        let cutpoints = CutpointSet::from_cutpoints(vec![
            Cutpoint::threshold(0, "x", 2.5),
            Cutpoint::nominal(1, "c", vec!["r".into(), "g".into()]),
        ]);
        (sample, cutpoints)
    }


    #[test]
    fn reads_binary_and_nominal_values() {
        let (sample, cutpoints) = toy();
        let a = BinaryInstance::new(&sample, &cutpoints, 0);
        let b = BinaryInstance::new(&sample, &cutpoints, 1);

        assert_eq!(a.bin_at(0), Some(false));
        assert_eq!(b.bin_at(0), Some(true));
        assert_eq!(a.value_at(1), Some(0));
        assert_eq!(b.value_at(1), Some(1));
        assert!(a.separates(0, &b));
        assert!(a.separates(1, &b));
    }


    #[test]
    fn missing_values_never_separate() {
        let (sample, cutpoints) = toy();
        let a = BinaryInstance::new(&sample, &cutpoints, 0);
        let c = BinaryInstance::new(&sample, &cutpoints, 2);

        assert!(c.is_missing(0));
        assert!(!a.separates(0, &c));
        assert!(!c.separates(0, &a));
    }


    #[test]
    #[should_panic]
    fn out_of_range_cutpoint_panics() {
        let (sample, cutpoints) = toy();
        let a = BinaryInstance::new(&sample, &cutpoints, 0);
        a.is_missing(2);
    }
}
