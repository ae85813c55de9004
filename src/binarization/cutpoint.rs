use serde::{Serialize, Deserialize};

use std::fmt;
use std::ops::Index;
use std::slice::Iter;
use std::cmp::Ordering;

use crate::sample::AttributeKind;


/// A single binary test on one attribute.
///
/// For a numeric attribute, `value` is the threshold.
/// For a nominal attribute, `value` is the number of categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cutpoint {
    attribute: usize,
    name: String,
    value: f64,
    kind: AttributeKind,
    #[serde(default)]
    categories: Vec<String>,
}


impl Cutpoint {
    /// Construct a threshold on a numeric attribute.
    pub fn threshold<T: ToString>(attribute: usize, name: T, value: f64)
        -> Self
    {
        Self {
            attribute,
            name: name.to_string(),
            value,
            kind: AttributeKind::Numeric,
            categories: Vec::with_capacity(0),
        }
    }


    /// Construct the cutpoint of a nominal attribute.
    pub fn nominal<T: ToString>(
        attribute: usize,
        name: T,
        categories: Vec<String>,
    ) -> Self
    {
        Self {
            attribute,
            name: name.to_string(),
            value: categories.len() as f64,
            kind: AttributeKind::Nominal,
            categories,
        }
    }


    /// Index of the original attribute.
    #[inline]
    pub fn attribute(&self) -> usize {
        self.attribute
    }


    /// Name of the original attribute.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// Threshold (numeric) or category count (nominal).
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }


    /// Kind of the original attribute.
    #[inline]
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }


    /// Returns `true` if this cutpoint is a threshold.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }


    /// Number of categories of a nominal cutpoint, `0` otherwise.
    #[inline]
    pub fn n_categories(&self) -> usize {
        match self.kind {
            AttributeKind::Numeric => 0,
            AttributeKind::Nominal => self.value as usize,
        }
    }


    /// Name of the `k`-th category of a nominal cutpoint.
    pub fn category_name(&self, k: usize) -> Option<&str> {
        self.categories.get(k).map(|c| &c[..])
    }


    fn cmp_position(&self, other: &Self) -> Ordering {
        self.attribute.cmp(&other.attribute)
            .then(self.value.total_cmp(&other.value))
    }
}


impl fmt::Display for Cutpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AttributeKind::Numeric => {
                write!(f, " [ {} : {} ]", self.name, self.value)
            },
            AttributeKind::Nominal => {
                write!(f, " [ {} : {} categories ]", self.name, self.value)
            },
        }
    }
}


/// An ordered sequence of [`Cutpoint`]s, sorted by `(attribute, value)`.
///
/// Once built, a `CutpointSet` changes only through
/// [`CutpointSet::narrow`].
/// Literals and rules refer to cutpoints by position,
/// so they are only meaningful against the set they were built with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CutpointSet {
    cutpoints: Vec<Cutpoint>,
}


impl CutpointSet {
    /// Construct an empty set.
    pub fn new() -> Self {
        Self { cutpoints: Vec::new() }
    }


    /// Construct a set from the given cutpoints.
    /// The cutpoints are sorted by `(attribute, value)`.
    pub fn from_cutpoints(mut cutpoints: Vec<Cutpoint>) -> Self {
        cutpoints.sort_by(|a, b| a.cmp_position(b));
        Self { cutpoints }
    }


    /// Keep only the cutpoints at `indices`, in the given order.
    ///
    /// # Panics
    /// Panics if an index is out of range.
    pub fn narrow(&mut self, indices: &[usize]) {
        let n_cutpoints = self.cutpoints.len();
        let narrowed = indices.iter()
            .map(|&i| {
                assert!(
                    i < n_cutpoints,
                    "cutpoint index {i} is out of range (0..{n_cutpoints})"
                );
                self.cutpoints[i].clone()
            })
            .collect::<Vec<_>>();
        self.cutpoints = narrowed;
    }


    /// Returns the number of cutpoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.cutpoints.len()
    }


    /// Returns `true` if there is no cutpoint.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cutpoints.is_empty()
    }


    /// Returns an iterator over the cutpoints.
    pub fn iter(&self) -> Iter<'_, Cutpoint> {
        self.cutpoints.iter()
    }


    /// Returns the cutpoint at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Cutpoint> {
        self.cutpoints.get(index)
    }


    /// Index of the attribute tested by the `index`-th cutpoint.
    #[inline]
    pub fn attribute_at(&self, index: usize) -> usize {
        self.cutpoints[index].attribute
    }


    /// Threshold or category count of the `index`-th cutpoint.
    #[inline]
    pub fn value_at(&self, index: usize) -> f64 {
        self.cutpoints[index].value
    }


    /// Returns `true` if the `index`-th cutpoint is a threshold.
    #[inline]
    pub fn is_numeric(&self, index: usize) -> bool {
        self.cutpoints[index].is_numeric()
    }
}


impl Index<usize> for CutpointSet {
    type Output = Cutpoint;
    fn index(&self, index: usize) -> &Self::Output {
        &self.cutpoints[index]
    }
}


impl<'a> IntoIterator for &'a CutpointSet {
    type Item = &'a Cutpoint;
    type IntoIter = Iter<'a, Cutpoint>;
    fn into_iter(self) -> Self::IntoIter {
        self.cutpoints.iter()
    }
}


impl fmt::Display for CutpointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Cutpoints: {}", self.cutpoints.len())?;
        for cutpoint in self.cutpoints.iter() {
            writeln!(f, "{cutpoint}")?;
        }
        Ok(())
    }
}
