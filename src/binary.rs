//! The binary view of a sample.
//!
//! A [`BinaryInstance`] reads one row of a [`Sample`](crate::Sample)
//! through a [`CutpointSet`](crate::CutpointSet)
//! without materializing a dense binary matrix.
//! [`Literal`]s and [`BinaryRule`]s refer to cutpoints by position.

/// Defines `BinaryInstance`.
pub mod binary_instance;
/// Defines `BinaryData` and the label count arithmetic.
pub mod binary_data;
/// Defines `Literal`.
pub mod literal;
/// Defines `BinaryRule`.
pub mod binary_rule;


pub use binary_instance::BinaryInstance;
pub use binary_data::{
    BinaryData,
    LabelCounts,
    merged_purity,
    merged_coverage,
};
pub use literal::Literal;
pub use binary_rule::BinaryRule;
