use std::fmt;

use super::binary_instance::BinaryInstance;
use super::literal::Literal;


/// A conjunction of [`Literal`]s voting for a class label.
///
/// The literals are kept sorted and without duplicates,
/// so two rules with the same literal set compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryRule {
    literals: Vec<Literal>,
    label: usize,
    purity: f64,
}


impl BinaryRule {
    /// Construct a new rule.
    /// `purity` is the purity measured on the binarized training data.
    pub fn new<T>(literals: T, label: usize, purity: f64) -> Self
        where T: Into<Vec<Literal>>
    {
        let mut literals = literals.into();
        literals.sort_unstable();
        literals.dedup();
        Self { literals, label, purity, }
    }


    /// The literals of this rule.
    #[inline]
    pub fn literals(&self) -> &[Literal] {
        &self.literals[..]
    }


    /// The label this rule votes for.
    #[inline]
    pub fn label(&self) -> usize {
        self.label
    }


    /// Purity measured when the rule was built.
    #[inline]
    pub fn purity(&self) -> f64 {
        self.purity
    }


    /// Number of literals.
    #[inline]
    pub fn len(&self) -> usize {
        self.literals.len()
    }


    /// Returns `true` if the rule has no literal.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }


    /// Returns `true` if every literal holds on `instance`.
    /// A missing value never satisfies a literal.
    pub fn covers(&self, instance: &BinaryInstance<'_>) -> bool {
        self.literals.iter()
            .all(|literal| literal.holds(instance) == Some(true))
    }
}


impl fmt::Display for BinaryRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.literals.iter()
            .map(|literal| literal.to_string())
            .collect::<Vec<_>>()
            .join(" AND ");
        write!(f, "[{:.4}] {body} => {}", self.purity, self.label)
    }
}
