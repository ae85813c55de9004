use fixedbitset::FixedBitSet;

use crate::binary::BinaryData;
use crate::error::{LadError, Result};


const STAGE: &str = "feature selection";


/// A set-cover instance with unit costs.
///
/// Sets and elements live in two parallel arenas indexed by id;
/// each side keeps the ids of the other side it is linked to.
#[derive(Debug, Clone, Default)]
pub struct SetCover {
    /// `sets[s]` holds the elements covered by the set `s`.
    sets: Vec<Vec<usize>>,
    /// `elements[e]` holds the sets covering the element `e`.
    elements: Vec<Vec<usize>>,
}


impl SetCover {
    /// Construct an instance with `n_sets` empty sets.
    pub fn new(n_sets: usize) -> Self {
        Self { sets: vec![Vec::new(); n_sets], elements: Vec::new(), }
    }


    /// Build the separation problem over the given instances and cutpoints.
    ///
    /// Every pair of `instances` with different labels is an element,
    /// covered by the positions in `cutpoints` that separate the pair.
    /// Set `s` of the returned problem stands for `cutpoints[s]`.
    pub fn separation(
        data: &BinaryData<'_>,
        instances: &[usize],
        cutpoints: &[usize],
    ) -> Result<Self>
    {
        let mut problem = Self::new(cutpoints.len());

        // Reserve the element table up front.
        let mut counts = vec![0_usize; data.n_classes()];
        instances.iter()
            .for_each(|&i| { counts[data.get(i).label()] += 1; });
        let n_same = counts.iter().map(|c| c * c.saturating_sub(1) / 2)
            .sum::<usize>();
        let n_all = instances.len() * instances.len().saturating_sub(1) / 2;
        problem.elements.try_reserve(n_all - n_same)
            .map_err(LadError::exhausted(STAGE))?;

        let mut covering = Vec::with_capacity(cutpoints.len());
        for (k, &i) in instances.iter().enumerate() {
            let a = data.get(i);
            for &j in &instances[k + 1..] {
                let b = data.get(j);
                if a.label() == b.label() { continue; }

                covering.clear();
                covering.extend(
                    cutpoints.iter()
                        .enumerate()
                        .filter(|&(_, &c)| a.separates(c, b))
                        .map(|(s, _)| s)
                );
                problem.add_element(&covering)?;
            }
        }
        Ok(problem)
    }


    /// Add an element covered by `sets`.
    /// An element covered by no set can never be satisfied
    /// and is not added.
    pub fn add_element(&mut self, sets: &[usize]) -> Result<()> {
        if sets.is_empty() { return Ok(()); }

        let e = self.elements.len();
        let mut covering = Vec::new();
        covering.try_reserve_exact(sets.len())
            .map_err(LadError::exhausted(STAGE))?;
        for &s in sets {
            self.sets[s].try_reserve(1)
                .map_err(LadError::exhausted(STAGE))?;
            self.sets[s].push(e);
            covering.push(s);
        }
        self.elements.try_reserve(1)
            .map_err(LadError::exhausted(STAGE))?;
        self.elements.push(covering);
        Ok(())
    }


    /// Number of sets.
    #[inline]
    pub fn n_sets(&self) -> usize {
        self.sets.len()
    }


    /// Number of elements.
    #[inline]
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }


    /// Choose sets so that every element is covered by a forced set
    /// or by at least `k` chosen sets.
    ///
    /// Sets that are the only cover of some element are taken first,
    /// and every element they cover is satisfied right away.
    /// Then the set covering the most unsatisfied elements is taken
    /// until every element is satisfied, ties going to the lowest id.
    /// Otherwise an element is satisfied once `k` chosen sets cover it.
    ///
    /// Returns the chosen set ids in ascending order, or
    /// [`LadError::InfeasibleSeparation`] when some element
    /// cannot reach `k` covers.
    pub fn solve(&self, k: usize) -> Result<Vec<usize>> {
        if k == 0 {
            return Ok((0..self.n_sets()).collect());
        }

        let mut state = SolverState::new(self, k);

        // Forced picks
        for covering in self.elements.iter() {
            if let [s] = covering.as_slice() {
                if state.available(*s) {
                    state.force(self, *s);
                }
            }
        }

        // Greedy picks
        while state.n_unsatisfied > 0 {
            let best = state.alive.ones()
                .filter(|&s| state.live[s] > 0)
                .fold(None, |best: Option<usize>, s| {
                    match best {
                        Some(b) if state.live[b] >= state.live[s] => Some(b),
                        _ => Some(s),
                    }
                });

            match best {
                Some(s) => { state.pick(self, s); },
                None => {
                    return Err(LadError::InfeasibleSeparation {
                        level: k,
                        unsatisfied: state.n_unsatisfied,
                    });
                },
            }
        }

        let mut solution = state.solution;
        solution.sort_unstable();
        Ok(solution)
    }
}


/// The mutable bookkeeping of a single `solve` call.
struct SolverState {
    k: usize,
    /// Number of unsatisfied elements covered by each set.
    live: Vec<usize>,
    /// Sets not chosen yet.
    alive: FixedBitSet,
    /// Number of chosen sets covering each element.
    counter: Vec<usize>,
    satisfied: FixedBitSet,
    n_unsatisfied: usize,
    solution: Vec<usize>,
}


impl SolverState {
    fn new(problem: &SetCover, k: usize) -> Self {
        let n_sets = problem.n_sets();
        let n_elements = problem.n_elements();

        let live = problem.sets.iter()
            .map(|elements| elements.len())
            .collect::<Vec<_>>();
        let mut alive = FixedBitSet::with_capacity(n_sets);
        alive.insert_range(..);

        Self {
            k,
            live,
            alive,
            counter: vec![0; n_elements],
            satisfied: FixedBitSet::with_capacity(n_elements),
            n_unsatisfied: n_elements,
            solution: Vec::new(),
        }
    }


    #[inline]
    fn available(&self, s: usize) -> bool {
        self.alive.contains(s) && self.live[s] > 0
    }


    /// Take `s` as the only possible cover of some element.
    /// Every element of `s` is satisfied at once.
    fn force(&mut self, problem: &SetCover, s: usize) {
        self.alive.set(s, false);
        self.solution.push(s);

        for &e in problem.sets[s].iter() {
            if self.satisfied.contains(e) { continue; }
            self.satisfy(problem, e);
        }
    }


    fn pick(&mut self, problem: &SetCover, s: usize) {
        self.alive.set(s, false);
        self.solution.push(s);

        for &e in problem.sets[s].iter() {
            if self.satisfied.contains(e) { continue; }

            self.counter[e] += 1;
            if self.counter[e] == self.k {
                self.satisfy(problem, e);
            }
        }
    }


    #[inline]
    fn satisfy(&mut self, problem: &SetCover, e: usize) {
        self.satisfied.insert(e);
        self.n_unsatisfied -= 1;
        for &t in problem.elements[e].iter() {
            self.live[t] -= 1;
        }
    }
}
