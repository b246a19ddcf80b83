//! Tour builder: order all sentences into a cheap rotation cycle.
//!
//! The builder plans every ordered pair of sentences, then walks the cost
//! matrix greedily from the cheapest starting row, always moving to the
//! cheapest sentence it has not left from yet, and finally closes the loop
//! back to the start. The result is a Hamiltonian cycle, not necessarily
//! the optimal one.

use super::action::EditPlan;
use super::planner::plan;
use crate::text::TokenSequence;
use rand::seq::SliceRandom;
use rand::Rng;

/// One transition of a tour, between two sentence indices.
#[derive(Debug, Clone)]
pub struct TourLeg {
    /// Index of the sentence shown before the transition.
    pub source: usize,
    /// Index of the sentence shown after the transition.
    pub target: usize,
    /// The planned edits.
    pub plan: EditPlan,
}

/// A cyclic visiting order over all candidate sentences.
#[derive(Debug, Clone, Default)]
pub struct Tour {
    legs: Vec<TourLeg>,
}

impl Tour {
    /// Number of legs (equal to the number of sentences).
    #[inline]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Whether the tour has no legs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// The legs in visiting order.
    pub fn legs(&self) -> &[TourLeg] {
        &self.legs
    }

    /// Source sentence index of each leg, in visiting order.
    pub fn order(&self) -> Vec<usize> {
        self.legs.iter().map(|leg| leg.source).collect()
    }

    /// Sum of all leg costs.
    pub fn total_cost(&self) -> usize {
        self.legs.iter().map(|leg| leg.plan.cost()).sum()
    }

    /// Consume the tour, keeping only the plans.
    pub fn into_plans(self) -> Vec<EditPlan> {
        self.legs.into_iter().map(|leg| leg.plan).collect()
    }
}

/// Builds a [`Tour`] from tokenized sentences.
#[derive(Debug, Clone, Copy)]
pub struct TourBuilder {
    best: bool,
    random: bool,
}

impl Default for TourBuilder {
    fn default() -> Self {
        Self {
            best: true,
            random: false,
        }
    }
}

impl TourBuilder {
    /// Builder with the nearest-neighbour heuristic on and no randomness.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the nearest-neighbour heuristic (`true`) or the plain ring.
    #[must_use]
    pub const fn best(mut self, best: bool) -> Self {
        self.best = best;
        self
    }

    /// Randomize the starting point (heuristic) or the order (ring).
    #[must_use]
    pub const fn random(mut self, random: bool) -> Self {
        self.random = random;
        self
    }

    /// Build a tour using the thread-local RNG.
    pub fn build(&self, sequences: &[TokenSequence]) -> Tour {
        self.build_with_rng(sequences, &mut rand::thread_rng())
    }

    /// Build a tour drawing any randomness from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        sequences: &[TokenSequence],
        rng: &mut R,
    ) -> Tour {
        let n = sequences.len();
        if n == 0 {
            return Tour::default();
        }

        let legs = if self.best {
            let mut legs = nearest_neighbor(sequences);
            if self.random {
                legs.rotate_left(rng.gen_range(0..n));
            }
            legs
        } else {
            let mut order: Vec<usize> = (0..n).collect();
            if self.random {
                order.shuffle(rng);
            }
            ring(sequences, &order)
        };

        Tour { legs }
    }
}

/// Greedy cycle over the full pairwise plan matrix.
fn nearest_neighbor(sequences: &[TokenSequence]) -> Vec<TourLeg> {
    let n = sequences.len();
    if n == 1 {
        return vec![TourLeg {
            source: 0,
            target: 0,
            plan: plan(&sequences[0], &sequences[0]),
        }];
    }

    // Row i holds (target, plan) for every j != i, cheapest first. The
    // diagonal is never a candidate.
    let table: Vec<Vec<(usize, EditPlan)>> = (0..n)
        .map(|i| {
            let mut cells: Vec<(usize, EditPlan)> = (0..n)
                .filter(|&j| j != i)
                .map(|j| (j, plan(&sequences[i], &sequences[j])))
                .collect();
            cells.sort_by_key(|(_, cell)| cell.cost());
            cells
        })
        .collect();

    let mut rows: Vec<usize> = (0..n).collect();
    rows.sort_by_key(|&i| table[i].first().map_or(usize::MAX, |(_, cell)| cell.cost()));
    let first = rows[0];

    let mut used = vec![false; n];
    let mut legs = Vec::with_capacity(n);
    let mut current = first;

    for step in 0..n {
        let closing = step + 1 == n;
        let pick = table[current].iter().find(|(target, _)| {
            if closing {
                *target == first
            } else {
                !used[*target]
            }
        });
        // Unreachable for n >= 2: an unused sentence always remains until
        // the closing step, and the closing target is never the diagonal.
        let Some((target, cell)) = pick else {
            break;
        };

        legs.push(TourLeg {
            source: current,
            target: *target,
            plan: cell.clone(),
        });
        used[current] = true;
        current = *target;
    }

    legs
}

/// Plain ring: leg i goes from `order[i - 1]` to `order[i]`.
fn ring(sequences: &[TokenSequence], order: &[usize]) -> Vec<TourLeg> {
    let n = order.len();
    (0..n)
        .map(|i| {
            let source = order[(i + n - 1) % n];
            let target = order[i];
            TourLeg {
                source,
                target,
                plan: plan(&sequences[source], &sequences[target]),
            }
        })
        .collect()
}
