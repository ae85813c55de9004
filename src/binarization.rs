//! Binarization: maps every attribute to a set of binary tests.
//!
//! A numeric attribute yields one threshold per class transition
//! between two consecutive observed values.
//! A nominal attribute yields a single cutpoint recording
//! its number of categories; it is tested by equality.

/// Defines `Cutpoint` and `CutpointSet`.
pub mod cutpoint;
/// Defines the `Binarizer`.
pub mod binarizer;


pub use cutpoint::{Cutpoint, CutpointSet};
pub use binarizer::Binarizer;
