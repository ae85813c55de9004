#![warn(missing_docs)]

//!
//! A crate that provides Logical Analysis of Data (LAD),
//! a rule-based classifier built from interpretable patterns.
//!
//! The training runs the following stages in order.
//!
//! - Binarization
//!     Numeric attributes are cut at the class transitions and
//!     nominal attributes are tested by equality.
//!     See [`Binarizer`].
//!
//! - Feature selection
//!     A set-cover heuristic keeps a subset of the cutpoints
//!     that still separates every pair of differently labeled examples.
//!     See [`GreedySetCover`] and [`IteratedSampling`].
//!
//! - Rule generation
//!     Pure conjunctions of binary tests are searched.
//!     See [`MaxPatterns`] and [`RandomRules`].
//!
//! - Voting
//!     The rules are read back in the attribute space and weighted.
//!     See [`RuleManager`].
//!
//! # Example
//! ```no_run
//! use minilad::prelude::*;
//!
//! let sample = SampleReader::default()
//!     .file("iris.csv")
//!     .has_header(true)
//!     .target_feature("class")
//!     .read()
//!     .unwrap();
//!
//! let model = Lad::builder()
//!     .build()
//!     .unwrap()
//!     .fit(&sample)
//!     .unwrap();
//!
//! let predictions = model.predict_all(&sample);
//! ```

pub mod error;
pub mod sample;
pub mod binarization;
pub mod binary;
pub mod feature_selection;
pub mod rule_generator;
pub mod rule_manager;
pub mod hypothesis;
pub mod lad;
pub mod prelude;

mod common;


pub use error::{LadError, Result};

pub use sample::{
    Sample,
    SampleReader,
    Feature,
    AttributeKind,
};

pub use binarization::{Binarizer, Cutpoint, CutpointSet};

pub use binary::{
    BinaryData,
    BinaryInstance,
    BinaryRule,
    LabelCounts,
    Literal,
};

pub use feature_selection::{
    FeatureSelector,
    GreedySetCover,
    IteratedSampling,
    SetCover,
};

pub use rule_generator::{
    RuleGenerator,
    MaxPatterns,
    RandomRules,
};

pub use rule_manager::{
    Condition,
    NumericalRule,
    Relation,
    RuleManager,
};

pub use hypothesis::Classifier;

pub use lad::{
    Diagnostic,
    FeatureSelection,
    Lad,
    LadBuilder,
    LadConfig,
    RuleGeneration,
    TrainedModel,
};
