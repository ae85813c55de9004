use crate::binary::{BinaryData, BinaryRule};
use crate::error::Result;


/// The trait [`RuleGenerator`] defines the contract of
/// the rule generation stage.
///
/// [`RuleGenerator::fit`] fills an internal list of accepted rules.
/// If `fit` fails half way, the rules accepted so far are kept
/// and can still be read.
///
/// # Required Methods
/// - [`RuleGenerator::name`]
/// - [`RuleGenerator::minimum_purity`]
/// - [`RuleGenerator::fit`]
/// - [`RuleGenerator::rules`]
/// - [`RuleGenerator::take_rules`]
/// - [`RuleGenerator::info`] ... optional.
pub trait RuleGenerator {
    /// Returns the name of the generator.
    fn name(&self) -> &str;


    /// Returns the parameters of the generator.
    fn info(&self) -> Option<Vec<(&str, String)>> {
        None
    }


    /// Purity a rule must reach to be accepted.
    fn minimum_purity(&self) -> f64;


    /// Search rules on `data`.
    /// The previously accepted rules are discarded.
    fn fit(&mut self, data: &BinaryData<'_>) -> Result<()>;


    /// The accepted rules.
    fn rules(&self) -> &[BinaryRule];


    /// Move the accepted rules out of `self`.
    fn take_rules(&mut self) -> Vec<BinaryRule>;
}


/// The list of accepted rules of a generator.
/// A rule whose purity is below the minimum purity is never stored.
#[derive(Debug, Clone)]
pub struct RulePool {
    minimum_purity: f64,
    rules: Vec<BinaryRule>,
}


impl RulePool {
    /// Construct an empty pool.
    pub fn new(minimum_purity: f64) -> Self {
        Self { minimum_purity, rules: Vec::new(), }
    }


    /// Purity a rule must reach to be accepted.
    #[inline]
    pub fn minimum_purity(&self) -> f64 {
        self.minimum_purity
    }


    /// Store `rule` if its purity reaches the minimum purity.
    /// Returns `true` if the rule was stored.
    pub fn add(&mut self, rule: BinaryRule) -> bool {
        let accepted = rule.purity() >= self.minimum_purity;
        if accepted {
            self.rules.push(rule);
        }
        accepted
    }


    /// Drop every stored rule.
    pub fn clear(&mut self) {
        self.rules.clear();
    }


    /// The stored rules.
    #[inline]
    pub fn rules(&self) -> &[BinaryRule] {
        &self.rules[..]
    }


    /// Move the stored rules out of the pool.
    pub fn take(&mut self) -> Vec<BinaryRule> {
        std::mem::take(&mut self.rules)
    }


    /// Number of stored rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }


    /// Returns `true` if no rule is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
