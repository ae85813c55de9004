//! Rule generation over the binarized sample.
//!
//! Both generators search conjunctions of [`Literal`](crate::Literal)s
//! and keep the ones whose purity reaches the minimum purity.

/// Provides `RuleGenerator` trait and the shared rule pool.
pub mod core;

/// Maximal patterns grown from every instance.
pub mod max_patterns;

/// Randomized greedy rule growth.
pub mod random_rules;


pub use self::core::{RuleGenerator, RulePool};
pub use max_patterns::MaxPatterns;
pub use random_rules::RandomRules;
