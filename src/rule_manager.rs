//! Rules in the original attribute space and the voting classifier.

/// Conditions and numerical rules.
pub mod numerical_rule;

/// Weighted voting over numerical rules.
pub mod manager;


pub use numerical_rule::{Condition, NumericalRule, Relation};
pub use manager::RuleManager;
