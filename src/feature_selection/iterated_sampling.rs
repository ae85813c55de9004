use rand::prelude::*;
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use crate::binary::BinaryData;
use crate::error::{LadError, Result};
use super::core::FeatureSelector;
use super::set_cover::SetCover;


/// Default number of sampled sub-problems.
pub const DEFAULT_N_ROUNDS: usize = 100;
/// Default fraction of instances (and cutpoints) per sub-problem.
pub const DEFAULT_SAMPLE_SIZE: f64 = 1.0;
/// Default number of returned cutpoints.
pub const DEFAULT_SOLUTION_SIZE: usize = 30;
/// Default seed.
pub const DEFAULT_SEED: u64 = 2;


/// Iterated sampling of the separation problem.
///
/// Each round draws a fraction of the instances
/// (and, optionally, of the cutpoints), solves the smaller problem
/// with the greedy set-cover heuristic, and tallies how often
/// each cutpoint was sampled and how often it was selected.
/// The cutpoints with the highest selected/sampled ratio are returned.
///
/// # Example
/// ```no_run
/// use minilad::prelude::*;
/// let selector = IteratedSampling::new(1)
///     .n_rounds(50)
///     .sample_size(0.3)
///     .solution_size(20)
///     .seed(7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IteratedSampling {
    separation_level: usize,
    n_rounds: usize,
    sample_size: f64,
    solution_size: usize,
    sample_cutpoints: bool,
    seed: u64,
}


/// Sampling/selection tally of a cutpoint.
#[derive(Debug, Clone, Copy, Default)]
struct Persistence {
    id: usize,
    n_samples: usize,
    n_selections: usize,
}


impl Persistence {
    #[inline]
    fn ratio(&self) -> f64 {
        self.n_selections as f64 / self.n_samples as f64
    }
}


impl Default for IteratedSampling {
    fn default() -> Self {
        Self::new(super::greedy_set_cover::DEFAULT_SEPARATION_LEVEL)
    }
}


impl IteratedSampling {
    /// Construct a new selector with the given separation level.
    /// By default, the other parameters are set as follows;
    /// ```text
    /// n_rounds: 100,
    /// sample_size: 1.0,
    /// solution_size: 30,
    /// sample_cutpoints: true,
    /// seed: 2,
    /// ```
    pub fn new(separation_level: usize) -> Self {
        Self {
            separation_level,
            n_rounds: DEFAULT_N_ROUNDS,
            sample_size: DEFAULT_SAMPLE_SIZE,
            solution_size: DEFAULT_SOLUTION_SIZE,
            sample_cutpoints: true,
            seed: DEFAULT_SEED,
        }
    }


    /// Set the number of sampled sub-problems.
    pub fn n_rounds(mut self, n_rounds: usize) -> Self {
        self.n_rounds = n_rounds;
        self
    }


    /// Set the fraction of the problem sampled per round.
    pub fn sample_size(mut self, sample_size: f64) -> Self {
        self.sample_size = sample_size;
        self
    }


    /// Set the number of returned cutpoints.
    pub fn solution_size(mut self, solution_size: usize) -> Self {
        self.solution_size = solution_size;
        self
    }


    /// If `false`, every cutpoint takes part in every sub-problem.
    pub fn sample_cutpoints(mut self, flag: bool) -> Self {
        self.sample_cutpoints = flag;
        self
    }


    /// Set the seed of the sampler.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Number of items drawn out of `n`, at least `min` (capped by `n`).
    #[inline]
    fn n_drawn(&self, n: usize, min: usize) -> usize {
        let drawn = (n as f64 * self.sample_size).floor() as usize;
        drawn.clamp(min.min(n), n)
    }
}


impl FeatureSelector for IteratedSampling {
    fn name(&self) -> &str {
        "Iterated Sampling"
    }


    fn info(&self) -> Option<Vec<(&str, String)>> {
        let info = Vec::from([
            ("Separation level", format!("{}", self.separation_level)),
            ("# of rounds", format!("{}", self.n_rounds)),
            ("Sample size", format!("{}", self.sample_size)),
            ("Solution size", format!("{}", self.solution_size)),
            ("Sample cutpoints", format!("{}", self.sample_cutpoints)),
            ("Seed", format!("{}", self.seed)),
        ]);
        Some(info)
    }


    fn separation_level(&self) -> usize {
        self.separation_level
    }


    fn select(&self, data: &BinaryData<'_>) -> Result<Vec<usize>> {
        let n_cutpoints = data.n_cutpoints();
        if self.separation_level == 0 {
            return Ok((0..n_cutpoints).collect());
        }

        let n_instances = self.n_drawn(data.len(), 2);
        let n_sampled = if self.sample_cutpoints {
            self.n_drawn(n_cutpoints, 1)
        } else {
            n_cutpoints
        };

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut instances = (0..data.len()).collect::<Vec<_>>();
        let mut cutpoints = (0..n_cutpoints).collect::<Vec<_>>();
        let mut tally = (0..n_cutpoints)
            .map(|id| Persistence { id, ..Persistence::default() })
            .collect::<Vec<_>>();

        for round in 0..self.n_rounds {
            instances.shuffle(&mut rng);
            cutpoints.shuffle(&mut rng);
            let sampled = &cutpoints[..n_sampled];

            let problem = SetCover::separation(
                data, &instances[..n_instances], sampled
            )?;
            sampled.iter().for_each(|&c| { tally[c].n_samples += 1; });

            match problem.solve(self.separation_level) {
                Ok(solution) => {
                    solution.into_iter()
                        .for_each(|s| { tally[sampled[s]].n_selections += 1; });
                },
                Err(LadError::InfeasibleSeparation { unsatisfied, .. }) => {
                    tracing::debug!(round, unsatisfied, "infeasible sub-problem");
                },
                Err(e) => { return Err(e); },
            }
        }

        let mut ranking = tally.into_iter()
            .filter(|p| p.n_samples > 0)
            .collect::<Vec<_>>();
        ranking.sort_by(|a, b| {
            b.ratio().total_cmp(&a.ratio())
                .then(b.n_samples.cmp(&a.n_samples))
                .then(a.id.cmp(&b.id))
        });

        let mut solution = ranking.into_iter()
            .take(self.solution_size)
            .map(|p| p.id)
            .collect::<Vec<_>>();
        solution.sort_unstable();

        tracing::debug!(
            n_rounds = self.n_rounds,
            n_selected = solution.len(),
            "iterated sampling done"
        );
        Ok(solution)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drawn_counts_respect_minimums() {
        let selector = IteratedSampling::new(1).sample_size(0.05);
        assert_eq!(selector.n_drawn(10, 2), 2);
        assert_eq!(selector.n_drawn(1, 2), 1);
        assert_eq!(selector.n_drawn(100, 1), 5);
    }


    #[test]
    fn ratio_ranks_persistent_cutpoints_first() {
        let a = Persistence { id: 0, n_samples: 4, n_selections: 2 };
        let b = Persistence { id: 1, n_samples: 2, n_selections: 2 };
        assert!(b.ratio() > a.ratio());
    }
}
