use serde::{Serialize, Deserialize};

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::binarization::CutpointSet;
use crate::error::{LadError, Result};
use crate::hypothesis::Classifier;
use crate::rule_manager::RuleManager;
use crate::sample::Sample;


/// A recoverable failure of a training stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the stage.
    pub stage: String,
    /// Description of the failure.
    pub message: String,
}


impl Diagnostic {
    pub(crate) fn new(stage: &str, error: &LadError) -> Self {
        Self { stage: stage.to_string(), message: error.to_string(), }
    }
}


impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)
    }
}


/// The output of [`Lad::fit`](crate::Lad::fit).
///
/// Owns the cutpoints the rules were built with and the rule manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedModel {
    cutpoints: CutpointSet,
    manager: RuleManager,
    #[serde(default)]
    diagnostics: Vec<Diagnostic>,
}


impl TrainedModel {
    pub(crate) fn new(
        cutpoints: CutpointSet,
        manager: RuleManager,
        diagnostics: Vec<Diagnostic>,
    ) -> Self
    {
        Self { cutpoints, manager, diagnostics, }
    }


    /// The cutpoints used by the rules.
    pub fn cutpoints(&self) -> &CutpointSet {
        &self.cutpoints
    }


    /// The rule manager.
    pub fn rule_manager(&self) -> &RuleManager {
        &self.manager
    }


    /// The recoverable failures met during training.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics[..]
    }


    /// Fraction of the examples of `sample` predicted correctly.
    pub fn accuracy(&self, sample: &Sample) -> f64 {
        let n_sample = sample.shape().0;
        if n_sample == 0 { return 0f64; }

        let n_correct = self.predict_all(sample)
            .into_iter()
            .zip(sample.target())
            .filter(|(p, y)| p == *y)
            .count();
        n_correct as f64 / n_sample as f64
    }


    /// Write the model to `path` as JSON.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, self)?;
        Ok(())
    }


    /// Read a model written by [`TrainedModel::save_json`].
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let model = serde_json::from_reader(reader)?;
        Ok(model)
    }
}


impl Classifier for TrainedModel {
    fn distribution(&self, sample: &Sample, row: usize) -> Vec<f64> {
        self.manager.distribution(sample, row)
    }
}


impl fmt::Display for TrainedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.cutpoints)?;
        write!(f, "{}", self.manager)?;
        if !self.diagnostics.is_empty() {
            writeln!(f, "\nDiagnostics:")?;
            for diagnostic in self.diagnostics.iter() {
                writeln!(f, " {diagnostic}")?;
            }
        }
        Ok(())
    }
}
