//! Run states, counters and results.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use statespace_kernel::operators::operator::Cost;

use crate::explored::ExploredRegistry;
use crate::node::{Node, NodeId, SearchTree, SolutionPath};
use crate::trace::SearchTrace;

/// Why a run stopped before the space was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutoffReason {
    /// The frontier emptied after at least one child was refused by a depth
    /// bound.
    DepthLimit,
    /// The node expansion budget was spent.
    NodeBudget,
    /// The wall-clock limit passed.
    TimeLimit,
}

impl CutoffReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DepthLimit => "depth_limit",
            Self::NodeBudget => "node_budget",
            Self::TimeLimit => "time_limit",
        }
    }
}

impl fmt::Display for CutoffReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// A goal node was popped.
    Solved,
    /// The frontier emptied and no child was ever refused by a depth bound.
    /// The reachable space holds no goal.
    Exhausted,
    /// The run stopped early.
    Cutoff(CutoffReason),
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved => f.write_str("solved"),
            Self::Exhausted => f.write_str("exhausted"),
            Self::Cutoff(reason) => write!(f, "cutoff({reason})"),
        }
    }
}

/// Run state machine.
///
/// `Initialized → Running → {Solved, Exhausted, Cutoff, Failed}`.
/// `Solved` may resume to `Running` to look for further goals; the other
/// end states are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Running,
    Solved,
    Exhausted,
    Cutoff(CutoffReason),
    /// A contract violation aborted the run.
    Failed,
}

impl Phase {
    /// The termination this phase represents, if it is an end state other
    /// than `Failed`.
    #[must_use]
    pub const fn termination(self) -> Option<Termination> {
        match self {
            Self::Solved => Some(Termination::Solved),
            Self::Exhausted => Some(Termination::Exhausted),
            Self::Cutoff(reason) => Some(Termination::Cutoff(reason)),
            Self::Initialized | Self::Running | Self::Failed => None,
        }
    }

    /// Whether no further goal can be produced.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Exhausted | Self::Cutoff(_) | Self::Failed)
    }
}

/// Counters accumulated over a run. Deterministic for a given method and
/// problem; wall-clock time is kept separately on [`SearchRun`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes whose successors were generated.
    pub expanded: u64,
    /// Actions consumed from the generator.
    pub generated: u64,
    /// Children discarded as already-known states.
    pub duplicates_suppressed: u64,
    /// Children that replaced a costlier entry for their state.
    pub upgrades: u64,
    /// Superseded frontier entries skipped on pop.
    pub stale_skipped: u64,
    /// Children rejected by the generator's validity filter.
    pub invalid_pruned: u64,
    /// Children refused by a depth bound.
    pub depth_denied: u64,
    /// Popped nodes discarded for reaching the upper cost bound.
    pub bound_pruned: u64,
    /// Goal nodes reached.
    pub solutions: u64,
    /// Largest frontier size observed.
    pub frontier_high_water: u64,
}

/// A goal state without its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalState<S> {
    pub state: S,
    pub depth: u32,
    pub path_cost: Cost,
}

/// Discriminated outcome of a search invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult<S, A> {
    /// A goal was reached; the full root-to-goal path.
    Path(SolutionPath<S, A>),
    /// A goal was reached; the goal state only.
    GoalState(GoalState<S>),
    /// The reachable space holds no goal.
    Exhausted,
    /// The run stopped early; a goal may still exist.
    Cutoff(CutoffReason),
}

impl<S, A> SearchResult<S, A> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Path(_) | Self::GoalState(_))
    }

    #[must_use]
    pub fn termination(&self) -> Termination {
        match self {
            Self::Path(_) | Self::GoalState(_) => Termination::Solved,
            Self::Exhausted => Termination::Exhausted,
            Self::Cutoff(reason) => Termination::Cutoff(*reason),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&SolutionPath<S, A>> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_path(self) -> Option<SolutionPath<S, A>> {
        match self {
            Self::Path(path) => Some(path),
            _ => None,
        }
    }

    /// The goal state, from either solved variant.
    #[must_use]
    pub fn goal_state(&self) -> Option<&S> {
        match self {
            Self::Path(path) => Some(path.goal_state()),
            Self::GoalState(goal) => Some(&goal.state),
            Self::Exhausted | Self::Cutoff(_) => None,
        }
    }
}

/// Complete record of one run: final phase, node arena, duplicate registry,
/// counters and optional audit log.
#[derive(Debug)]
pub struct SearchRun<S, A> {
    pub phase: Phase,
    /// The most recent goal node, when one was reached.
    pub goal: Option<NodeId>,
    pub tree: SearchTree<S, A>,
    pub explored: Option<ExploredRegistry<S>>,
    pub stats: SearchStats,
    pub trace: Option<SearchTrace>,
    pub elapsed: Duration,
}

impl<S, A> SearchRun<S, A> {
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.phase.termination()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }

    #[must_use]
    pub fn goal_node(&self) -> Option<&Node<S, A>> {
        self.goal.and_then(|id| self.tree.get(id))
    }
}

impl<S: Clone, A: Clone> SearchRun<S, A> {
    /// Root-to-goal path, when solved.
    #[must_use]
    pub fn path(&self) -> Option<SolutionPath<S, A>> {
        match (self.phase, self.goal) {
            (Phase::Solved, Some(goal)) => Some(self.tree.path_to(goal)),
            _ => None,
        }
    }

    /// The run as a [`SearchResult`]. `None` for a run that failed or was
    /// never driven to an end state.
    #[must_use]
    pub fn result(&self) -> Option<SearchResult<S, A>> {
        match self.phase {
            Phase::Solved => self.path().map(SearchResult::Path),
            Phase::Exhausted => Some(SearchResult::Exhausted),
            Phase::Cutoff(reason) => Some(SearchResult::Cutoff(reason)),
            Phase::Initialized | Phase::Running | Phase::Failed => None,
        }
    }
}
