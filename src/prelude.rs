//! Exports the learner, the stages, and the traits.
//!
pub use crate::lad::{
    Lad,
    LadBuilder,
    LadConfig,
    FeatureSelection,
    RuleGeneration,
    TrainedModel,
    Diagnostic,
};


pub use crate::sample::{
    Sample,
    SampleReader,
    Feature,
};


pub use crate::binarization::{
    Binarizer,
    Cutpoint,
    CutpointSet,
};


pub use crate::binary::{
    BinaryData,
    BinaryInstance,
    BinaryRule,
    Literal,
};


pub use crate::feature_selection::{
    // Feature selector trait
    FeatureSelector,

    GreedySetCover,
    IteratedSampling,
};


pub use crate::rule_generator::{
    // Rule generator trait
    RuleGenerator,

    MaxPatterns,
    RandomRules,
};


pub use crate::rule_manager::{
    RuleManager,
    NumericalRule,
    Condition,
};


pub use crate::hypothesis::Classifier;


pub use crate::error::{LadError, Result};
