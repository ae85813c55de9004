use serde::{Serialize, Deserialize};

use crate::binary::BinaryData;
use crate::error::Result;
use super::core::FeatureSelector;
use super::set_cover::SetCover;


/// The default separation level.
pub const DEFAULT_SEPARATION_LEVEL: usize = 1;


/// Chvátal's greedy algorithm on the full separation problem.
///
/// Every pair of differently labeled instances becomes an element,
/// so the working set grows quadratically in the number of instances.
/// Use [`IteratedSampling`](super::IteratedSampling) for large samples.
///
/// # Example
/// ```no_run
/// use minilad::prelude::*;
/// # fn run(sample: &Sample, cutpoints: &CutpointSet) -> minilad::Result<()> {
/// let data = BinaryData::new(sample, cutpoints);
/// let selected = GreedySetCover::new(1).select(&data)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreedySetCover {
    separation_level: usize,
}


impl Default for GreedySetCover {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATION_LEVEL)
    }
}


impl GreedySetCover {
    /// Construct a new selector with the given separation level.
    pub fn new(separation_level: usize) -> Self {
        Self { separation_level }
    }
}


impl FeatureSelector for GreedySetCover {
    fn name(&self) -> &str {
        "Greedy Set Cover"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Separation level", format!("{}", self.separation_level)),
        ]);
        Some(info)
    }


    fn separation_level(&self) -> usize {
        self.separation_level
    }


    fn select(&self, data: &BinaryData<'_>) -> Result<Vec<usize>> {
        let n_cutpoints = data.n_cutpoints();
        let all = (0..n_cutpoints).collect::<Vec<_>>();
        if self.separation_level == 0 {
            return Ok(all);
        }

        let instances = (0..data.len()).collect::<Vec<_>>();
        let problem = SetCover::separation(data, &instances, &all)?;

        // Nothing needs separating; keep every cutpoint.
        if problem.n_elements() == 0 {
            tracing::debug!("feature selection: no separable pair");
            return Ok(all);
        }

        let solution = problem.solve(self.separation_level)?;
        tracing::debug!(
            n_elements = problem.n_elements(),
            n_selected = solution.len(),
            "greedy set cover done"
        );
        Ok(solution)
    }
}
