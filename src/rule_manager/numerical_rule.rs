use serde::{Serialize, Deserialize};

use std::fmt;

use crate::binary::{BinaryRule, Literal};
use crate::binarization::CutpointSet;
use crate::sample::Sample;


/// Two thresholds closer than this are the same condition.
pub const CONDITION_TOLERANCE: f64 = 1e-3;


/// The relation tested by a [`Condition`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
    Serialize, Deserialize
)]
pub enum Relation {
    /// `value > threshold`
    Greater,
    /// `value <= threshold`
    LessEqual,
    /// `value == category`
    Equal,
}


impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let relation = match self {
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::Equal => "=",
        };
        write!(f, "{relation}")
    }
}


/// A test on one original attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    attribute: usize,
    name: String,
    relation: Relation,
    value: f64,
    #[serde(default)]
    category: Option<String>,
}


impl Condition {
    /// The condition tested by `literal` on `cutpoints`.
    pub fn from_literal(literal: &Literal, cutpoints: &CutpointSet) -> Self {
        let cutpoint = &cutpoints[literal.index()];
        let attribute = cutpoint.attribute();
        let name = cutpoint.name().to_string();
        match *literal {
            Literal::Numeric { sign, .. } => {
                let relation = if sign {
                    Relation::Greater
                } else {
                    Relation::LessEqual
                };
                Self {
                    attribute,
                    name,
                    relation,
                    value: cutpoint.value(),
                    category: None,
                }
            },
            Literal::Nominal { value, .. } => {
                Self {
                    attribute,
                    name,
                    relation: Relation::Equal,
                    value: value as f64,
                    category: cutpoint.category_name(value)
                        .map(|c| c.to_string()),
                }
            },
        }
    }


    /// Index of the tested attribute.
    #[inline]
    pub fn attribute(&self) -> usize {
        self.attribute
    }


    /// Name of the tested attribute.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }


    /// The tested relation.
    #[inline]
    pub fn relation(&self) -> Relation {
        self.relation
    }


    /// Threshold, or category index for [`Relation::Equal`].
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }


    /// Returns `true` if the condition holds at `row`.
    /// A missing value never satisfies a condition.
    ///
    /// # Panics
    /// Panics if the attribute is out of range for `sample`.
    #[inline]
    pub fn holds(&self, sample: &Sample, row: usize) -> bool {
        let n_feature = sample.shape().1;
        assert!(
            self.attribute < n_feature,
            "attribute {} is out of range (0..{n_feature})",
            self.attribute,
        );
        let Some(v) = sample.value(self.attribute, row) else {
            return false;
        };
        match self.relation {
            Relation::Greater => v > self.value,
            Relation::LessEqual => v <= self.value,
            Relation::Equal => v == self.value,
        }
    }
}


impl PartialEq for Condition {
    fn eq(&self, other: &Self) -> bool {
        self.attribute == other.attribute
            && self.relation == other.relation
            && (self.value - other.value).abs() < CONDITION_TOLERANCE
    }
}


impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.category {
            Some(category) => {
                write!(f, "{} {} {category}", self.name, self.relation)
            },
            None => {
                write!(f, "{} {} {}", self.name, self.relation, self.value)
            },
        }
    }
}


/// A [`BinaryRule`] read back in the original attribute space.
///
/// The literals on the same attribute are consolidated into
/// the tightest bound: the largest `>` threshold and
/// the smallest `<=` threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericalRule {
    label: usize,
    purity: f64,
    weight: f64,
    conditions: Vec<Condition>,
}


impl NumericalRule {
    /// Convert `rule` against the cutpoints it was built with.
    pub fn new(rule: &BinaryRule, cutpoints: &CutpointSet) -> Self {
        let mut conditions = rule.literals()
            .iter()
            .map(|literal| Condition::from_literal(literal, cutpoints))
            .collect::<Vec<_>>();
        conditions.sort_by(|a, b| {
            a.attribute.cmp(&b.attribute)
                .then(a.relation.cmp(&b.relation))
                .then(a.value.total_cmp(&b.value))
        });

        let mut consolidated: Vec<Condition> = Vec::new();
        for condition in conditions {
            match consolidated.last_mut() {
                Some(last) if last.attribute == condition.attribute
                    && last.relation == condition.relation =>
                {
                    match condition.relation {
                        // Sorted ascending, the last one is the largest.
                        Relation::Greater => { *last = condition; },
                        Relation::LessEqual => {},
                        Relation::Equal => {
                            if *last != condition {
                                consolidated.push(condition);
                            }
                        },
                    }
                },
                _ => { consolidated.push(condition); },
            }
        }

        Self {
            label: rule.label(),
            purity: rule.purity(),
            weight: 0f64,
            conditions: consolidated,
        }
    }


    /// The label this rule votes for.
    #[inline]
    pub fn label(&self) -> usize {
        self.label
    }


    /// Purity measured on the binarized training data.
    #[inline]
    pub fn purity(&self) -> f64 {
        self.purity
    }


    /// The voting weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }


    #[inline]
    pub(super) fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }


    /// The consolidated conditions.
    #[inline]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions[..]
    }


    /// Returns `true` if every condition holds at `row`.
    pub fn covers(&self, sample: &Sample, row: usize) -> bool {
        self.conditions.iter()
            .all(|condition| condition.holds(sample, row))
    }
}


impl PartialEq for NumericalRule {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
            && self.conditions.len() == other.conditions.len()
            && other.conditions.iter()
                .all(|c| self.conditions.contains(c))
    }
}


impl fmt::Display for NumericalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body = self.conditions.iter()
            .map(|condition| condition.to_string())
            .collect::<Vec<_>>()
            .join(" AND ");
        write!(f, "{{{}}} {body}", self.weight)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::binarization::Cutpoint;

    fn cutpoints() -> CutpointSet {
        CutpointSet::from_cutpoints(vec![
            Cutpoint::threshold(0, "x", 2.0),
            Cutpoint::threshold(0, "x", 5.0),
            Cutpoint::threshold(0, "x", 8.0),
            Cutpoint::nominal(1, "c", vec!["r".into(), "g".into()]),
        ])
    }


    #[test]
    fn bounds_are_consolidated() {
        let cutpoints = cutpoints();
        let rule = BinaryRule::new(
            vec![
                Literal::Numeric { index: 0, sign: true },
                Literal::Numeric { index: 1, sign: true },
                Literal::Numeric { index: 2, sign: false },
                Literal::Nominal { index: 3, value: 1 },
            ],
            0,
            1.0,
        );
        let rule = NumericalRule::new(&rule, &cutpoints);

        let text = rule.conditions()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        assert_eq!(text, vec!["x > 5", "x <= 8", "c = g"]);
    }


    #[test]
    fn lower_bounds_keep_the_smallest_threshold() {
        let cutpoints = cutpoints();
        let rule = BinaryRule::new(
            vec![
                Literal::Numeric { index: 2, sign: false },
                Literal::Numeric { index: 1, sign: false },
            ],
            1,
            1.0,
        );
        let rule = NumericalRule::new(&rule, &cutpoints);

        assert_eq!(rule.conditions().len(), 1);
        assert_eq!(rule.conditions()[0].value(), 5.0);
    }


    #[test]
    fn consolidation_is_idempotent() {
        let cutpoints = cutpoints();
        let rule = BinaryRule::new(
            vec![
                Literal::Numeric { index: 1, sign: true },
                Literal::Numeric { index: 0, sign: true },
            ],
            0,
            0.9,
        );
        let a = NumericalRule::new(&rule, &cutpoints);
        let b = NumericalRule::new(&rule, &cutpoints);
        assert_eq!(a, b);
    }
}
