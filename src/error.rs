//! Error types shared by every stage of the LAD pipeline.

use std::io;
use std::collections::TryReserveError;

use polars::prelude::PolarsError;


/// Errors that can occur while configuring or training [`Lad`](crate::Lad).
///
/// `InfeasibleSeparation` and `ResourceExhausted` are recoverable:
/// [`Lad::fit`](crate::Lad::fit) keeps going with the results of the
/// previous stages and reports them through
/// [`TrainedModel::diagnostics`](crate::TrainedModel::diagnostics).
#[derive(Debug, thiserror::Error)]
pub enum LadError {
    /// A hyperparameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The training sample is malformed.
    #[error("invalid sample: {0}")]
    InvalidSample(String),

    /// Binarization produced no cutpoint at all.
    #[error("binarization: no cutpoint was found")]
    NoSignalFound,

    /// The set covering model cannot separate every pair of observations
    /// `level` times.
    #[error(
        "feature selection: separation level {level} is infeasible \
        ({unsatisfied} pairs of observations cannot be separated)"
    )]
    InfeasibleSeparation {
        /// Requested separation level.
        level: usize,
        /// Number of pairs left unsatisfied.
        unsatisfied: usize,
    },

    /// A working set could not be allocated.
    #[error("{stage}: out of memory ({source})")]
    ResourceExhausted {
        /// Name of the stage that failed.
        stage: &'static str,
        /// The failed reservation.
        source: TryReserveError,
    },

    /// Error while reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error raised by polars.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    /// Error while (de)serializing a model or a configuration.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}


impl LadError {
    /// Returns `true` if training can proceed after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InfeasibleSeparation { .. } | Self::ResourceExhausted { .. }
        )
    }


    pub(crate) fn exhausted(stage: &'static str)
        -> impl FnOnce(TryReserveError) -> Self
    {
        move |source| Self::ResourceExhausted { stage, source }
    }
}


/// Result type of this crate.
pub type Result<T> = std::result::Result<T, LadError>;
