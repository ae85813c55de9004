//! Feature selection by set covering.
//!
//! Every pair of differently labeled instances must be told apart by
//! at least `k` selected cutpoints, where `k` is the separation level.
//! The selected indices are used to narrow the
//! [`CutpointSet`](crate::CutpointSet).

/// Provides `FeatureSelector` trait.
pub mod core;

/// The set-cover engine shared by the selectors.
pub mod set_cover;

/// Chvátal's greedy selector.
pub mod greedy_set_cover;

/// The sampling selector for large problems.
pub mod iterated_sampling;


pub use self::core::FeatureSelector;
pub use set_cover::SetCover;
pub use greedy_set_cover::GreedySetCover;
pub use iterated_sampling::IteratedSampling;
