//! Evaluators: numeric scores that order a priority frontier.
//!
//! Lower is better. The engine never checks admissibility or consistency of
//! a heuristic; optimality guarantees of uniform-cost and A* methods hold
//! only when the caller supplies an admissible one.

use std::fmt;

use statespace_kernel::operators::operator::Cost;

/// Scores a state given the path cost accumulated to reach it.
pub trait Evaluator<S> {
    fn evaluate(&self, state: &S, path_cost: Cost) -> i64;
}

impl<S, F> Evaluator<S> for F
where
    F: Fn(&S, Cost) -> i64,
{
    fn evaluate(&self, state: &S, path_cost: Cost) -> i64 {
        self(state, path_cost)
    }
}

/// Estimates remaining cost from a state to the nearest goal.
pub trait Heuristic<S> {
    fn estimate(&self, state: &S) -> Cost;
}

impl<S, F> Heuristic<S> for F
where
    F: Fn(&S) -> Cost,
{
    fn estimate(&self, state: &S) -> Cost {
        self(state)
    }
}

fn score(cost: Cost) -> i64 {
    i64::try_from(cost).unwrap_or(i64::MAX)
}

/// `g`: path cost so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCost;

impl<S> Evaluator<S> for UniformCost {
    fn evaluate(&self, _state: &S, path_cost: Cost) -> i64 {
        score(path_cost)
    }
}

/// `h`: heuristic estimate only.
#[derive(Clone, Copy, Default)]
pub struct Greedy<H>(pub H);

impl<S, H: Heuristic<S>> Evaluator<S> for Greedy<H> {
    fn evaluate(&self, state: &S, _path_cost: Cost) -> i64 {
        score(self.0.estimate(state))
    }
}

/// `g + h`: path cost plus heuristic estimate.
#[derive(Clone, Copy, Default)]
pub struct AStar<H>(pub H);

impl<S, H: Heuristic<S>> Evaluator<S> for AStar<H> {
    fn evaluate(&self, state: &S, path_cost: Cost) -> i64 {
        score(path_cost.saturating_add(self.0.estimate(state)))
    }
}

impl<H> fmt::Debug for Greedy<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Greedy")
    }
}

impl<H> fmt::Debug for AStar<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AStar")
    }
}

/// The absent evaluator. Uninhabited: a method typed `Method<G, Blind>`
/// statically carries no evaluator.
#[derive(Debug, Clone, Copy)]
pub enum Blind {}

impl<S> Evaluator<S> for Blind {
    fn evaluate(&self, _state: &S, _path_cost: Cost) -> i64 {
        match *self {}
    }
}
