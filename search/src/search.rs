//! The expansion engine.
//!
//! A [`Search`] is one run of a [`Method`] on a [`Problem`]. It is pull-based:
//! [`Search::next_goal`] drives the loop until a goal is popped or the run
//! ends, and may be called again after a goal to continue the same run.
//! A returned goal is a leaf: it is never expanded, so no later goal is
//! reached through it.
//!
//! Per iteration:
//!
//! 1. time limit check
//! 2. pop; an empty frontier ends the run
//! 3. skip superseded (stale) entries and entries at or above the upper bound
//! 4. goal test
//! 5. node budget check
//! 6. expand

use std::time::{Duration, Instant};

use statespace_kernel::generator::Generator;
use statespace_kernel::operators::operator::{Action, Cost};
use statespace_kernel::state::state_fingerprint;
use tracing::{debug, info, trace};

use crate::error::SearchError;
use crate::evaluator::Evaluator;
use crate::explored::{Admission, DuplicatePolicy, ExploredRegistry};
use crate::frontier::{Frontier, FrontierEntry};
use crate::method::Method;
use crate::node::{NodeId, SearchTree, SolutionPath};
use crate::outcome::{CutoffReason, GoalState, Phase, SearchResult, SearchRun, SearchStats};
use crate::policy::SearchPolicy;
use crate::problem::Problem;
use crate::trace::{ChildOutcome, ChildRecord, ExpansionEvent, SearchTrace};

type StateOf<G> = <G as Generator>::State;
type ArgsOf<G> = <G as Generator>::Args;

/// A successor that survived the depth bound and the validity filter.
struct Candidate<S, A> {
    index: u64,
    state: S,
    action: Action<S, A>,
    evaluation: Option<i64>,
}

/// One run of a method on a problem.
pub struct Search<'a, G: Generator, E> {
    method: &'a Method<G, E>,
    problem: &'a Problem<G::State>,
    policy: SearchPolicy,
    phase: Phase,
    tree: SearchTree<G::State, G::Args>,
    frontier: Box<dyn Frontier>,
    explored: Option<ExploredRegistry<G::State>>,
    stats: SearchStats,
    trace: Option<SearchTrace>,
    depth_refused: bool,
    goal: Option<NodeId>,
    started: Instant,
    finished: Option<Duration>,
}

impl<'a, G, E> Search<'a, G, E>
where
    G: Generator,
    E: Evaluator<G::State>,
{
    pub(crate) fn new(
        method: &'a Method<G, E>,
        problem: &'a Problem<G::State>,
        policy: SearchPolicy,
    ) -> Self {
        let initial = problem.initial().clone();
        let evaluation = method.evaluate(&initial, 0);
        let trace = policy
            .record_trace
            .then(|| SearchTrace::new(method.name(), method.discipline(), method.duplicates()));
        Self {
            method,
            problem,
            frontier: method.discipline().frontier(),
            explored: ExploredRegistry::for_policy(method.duplicates()),
            tree: SearchTree::with_root(initial, evaluation),
            policy,
            phase: Phase::Initialized,
            stats: SearchStats::default(),
            trace,
            depth_refused: false,
            goal: None,
            started: Instant::now(),
            finished: None,
        }
    }

    /// Current run state.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn tree(&self) -> &SearchTree<G::State, G::Args> {
        &self.tree
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Root-to-node path for any node of this run.
    #[must_use]
    pub fn path_to(&self, node: NodeId) -> SolutionPath<G::State, G::Args> {
        self.tree.path_to(node)
    }

    /// Lower the exclusive upper cost bound. Never raises it.
    pub fn tighten_upper_bound(&mut self, bound: Cost) {
        let tightened = self.policy.upper_bound.map_or(bound, |b| b.min(bound));
        self.policy.upper_bound = Some(tightened);
    }

    /// Drive the run until the next goal node is popped.
    ///
    /// Returns `Ok(None)` once the run has ended: exhausted, cut off, or
    /// previously failed. Inspect [`Self::phase`] for which.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnregisteredOperator`] or
    /// [`SearchError::Apply`] on a generator contract violation. The run is
    /// then in [`Phase::Failed`].
    pub fn next_goal(&mut self) -> Result<Option<NodeId>, SearchError> {
        match self.phase {
            Phase::Initialized => self.initialize(),
            // Goals are leaves: resuming never expands the goal just returned.
            Phase::Solved => self.phase = Phase::Running,
            Phase::Running => {}
            Phase::Exhausted | Phase::Cutoff(_) | Phase::Failed => return Ok(None),
        }

        let deadline = self.policy.time_limit().map(|limit| self.started + limit);
        loop {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                self.end(Phase::Cutoff(CutoffReason::TimeLimit));
                return Ok(None);
            }

            let Some(entry) = self.frontier.pop() else {
                let phase = if self.depth_refused {
                    Phase::Cutoff(CutoffReason::DepthLimit)
                } else {
                    Phase::Exhausted
                };
                self.end(phase);
                return Ok(None);
            };
            let node = &self.tree[entry.node];

            if self.method.duplicates() == DuplicatePolicy::DetectAndReplace
                && self
                    .explored
                    .as_ref()
                    .is_some_and(|reg| reg.is_stale(&node.state, entry.node))
            {
                self.stats.stale_skipped += 1;
                trace!(event = "stale_skip", node = %entry.node);
                continue;
            }

            if !self.policy.within_upper_bound(node.path_cost) {
                self.stats.bound_pruned += 1;
                continue;
            }

            if self.problem.is_goal(&node.state) {
                self.stats.solutions += 1;
                self.phase = Phase::Solved;
                self.goal = Some(entry.node);
                if let Some(log) = self.trace.as_mut() {
                    log.goals.push(entry.node);
                }
                debug!(
                    event = "goal",
                    node = %entry.node,
                    depth = node.depth,
                    path_cost = node.path_cost,
                    expanded = self.stats.expanded,
                );
                return Ok(Some(entry.node));
            }

            if self.budget_spent() {
                self.end(Phase::Cutoff(CutoffReason::NodeBudget));
                return Ok(None);
            }

            self.expand_or_fail(entry.node)?;
        }
    }

    /// Branch-and-bound: keep resuming, tightening the upper bound to each
    /// goal's cost, and return the cheapest goal found.
    ///
    /// Stops early once a goal costs no more than the policy's
    /// `lower_bound`.
    ///
    /// # Errors
    ///
    /// See [`Self::next_goal`].
    pub fn best_goal(&mut self) -> Result<Option<NodeId>, SearchError> {
        let mut best = None;
        while let Some(goal) = self.next_goal()? {
            let node = &self.tree[goal];
            let cost = node.path_cost;
            debug!(
                event = "incumbent",
                method = self.method.name(),
                node = %goal,
                cost,
                depth = node.depth,
            );
            best = Some(goal);
            if self.policy.lower_bound.is_some_and(|bound| cost <= bound) {
                break;
            }
            self.tighten_upper_bound(cost);
        }
        Ok(best)
    }

    /// Consume the engine into its run record.
    #[must_use]
    pub fn finish(mut self) -> SearchRun<G::State, G::Args> {
        let elapsed = self.finished.unwrap_or_else(|| self.started.elapsed());
        if let Some(log) = self.trace.as_mut() {
            log.termination = self.phase.termination();
        }
        SearchRun {
            phase: self.phase,
            goal: self.goal,
            tree: self.tree,
            explored: self.explored,
            stats: self.stats,
            trace: self.trace,
            elapsed,
        }
    }

    /// Result for a run that has ended without a goal.
    pub(crate) fn unsolved(&self) -> SearchResult<G::State, G::Args> {
        match self.phase {
            Phase::Cutoff(reason) => SearchResult::Cutoff(reason),
            _ => SearchResult::Exhausted,
        }
    }

    pub(crate) fn goal_state(&self, node: NodeId) -> GoalState<G::State> {
        let node = &self.tree[node];
        GoalState {
            state: node.state.clone(),
            depth: node.depth,
            path_cost: node.path_cost,
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn initialize(&mut self) {
        let root = self.tree.root();
        if let Some(reg) = self.explored.as_mut() {
            reg.seed(&self.tree[root].state, root);
        }
        self.frontier.push(FrontierEntry {
            node: root,
            depth: 0,
            evaluation: self.tree[root].evaluation.unwrap_or(0),
        });
        self.phase = Phase::Running;
        self.started = Instant::now();
        info!(
            event = "search_start",
            method = self.method.name(),
            generator = self.method.generator().name(),
            discipline = %self.method.discipline(),
            duplicates = %self.method.duplicates(),
            initial = %self.tree[root].state,
        );
    }

    fn budget_spent(&self) -> bool {
        self.policy
            .node_budget
            .is_some_and(|budget| self.stats.expanded >= budget)
    }

    fn end(&mut self, phase: Phase) {
        self.phase = phase;
        self.finished = Some(self.started.elapsed());
        if let Some(log) = self.trace.as_mut() {
            log.termination = phase.termination();
        }
        if let Phase::Cutoff(reason) = phase {
            debug!(event = "cutoff", reason = %reason, expanded = self.stats.expanded);
        }
        info!(
            event = "search_end",
            method = self.method.name(),
            outcome = ?phase,
            expanded = self.stats.expanded,
            generated = self.stats.generated,
            solutions = self.stats.solutions,
            frontier_high_water = self.stats.frontier_high_water,
        );
    }

    fn expand_or_fail(&mut self, node: NodeId) -> Result<(), SearchError> {
        self.expand(node).map_err(|err| {
            self.phase = Phase::Failed;
            self.finished = Some(self.started.elapsed());
            info!(event = "search_failed", method = self.method.name(), error = %err);
            err
        })
    }

    fn expand(&mut self, id: NodeId) -> Result<(), SearchError> {
        let method = self.method;
        let generator = method.generator();
        let registry = generator.registry();

        let (parent_state, depth, path_cost) = {
            let node = &self.tree[id];
            (node.state.clone(), node.depth, node.path_cost)
        };
        let child_depth = depth + 1;
        let depth_allowed = !matches!(self.policy.depth_limit, Some(limit) if child_depth > limit)
            && self.frontier.admits(child_depth);

        let mut records: Vec<ChildRecord> = Vec::new();
        let mut candidates: Vec<Candidate<StateOf<G>, ArgsOf<G>>> = Vec::new();

        for (index, action) in (0u64..).zip(generator.operations(&parent_state)) {
            self.stats.generated += 1;

            if !registry.contains(action.name()) {
                return Err(SearchError::UnregisteredOperator {
                    name: action.name(),
                    node: id,
                });
            }

            if !depth_allowed {
                self.stats.depth_denied += 1;
                self.depth_refused = true;
                records.push(ChildRecord {
                    index,
                    action: action.to_string(),
                    outcome: ChildOutcome::DepthLimited,
                });
                continue;
            }

            let state = action
                .apply(&parent_state)
                .map_err(|source| SearchError::Apply { node: id, source })?;

            if !generator.is_valid(&state) {
                self.stats.invalid_pruned += 1;
                records.push(ChildRecord {
                    index,
                    action: action.to_string(),
                    outcome: ChildOutcome::Invalid,
                });
                continue;
            }

            let evaluation = method.evaluate(&state, path_cost.saturating_add(action.cost()));
            candidates.push(Candidate {
                index,
                state,
                action,
                evaluation,
            });
        }

        if method.orders_children() {
            candidates.sort_by_key(|c| c.evaluation.unwrap_or(0));
        }

        let mut batch = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let child_cost = path_cost.saturating_add(candidate.action.cost());
            let prospective = self.tree.next_id();
            let admission = match self.explored.as_mut() {
                Some(reg) => reg.admit(&candidate.state, prospective, child_cost),
                None => Admission::Fresh,
            };

            let outcome = match admission {
                Admission::Duplicate { existing } => {
                    self.stats.duplicates_suppressed += 1;
                    ChildOutcome::Duplicate { existing }
                }
                Admission::Fresh | Admission::Upgrade { .. } => {
                    let action_text = self.trace.is_some().then(|| candidate.action.to_string());
                    let child = self.tree.child(
                        id,
                        candidate.state,
                        candidate.action,
                        candidate.evaluation,
                    );
                    batch.push(FrontierEntry {
                        node: child,
                        depth: child_depth,
                        evaluation: candidate.evaluation.unwrap_or(0),
                    });
                    let outcome = if let Admission::Upgrade {
                        previous,
                        previous_cost,
                    } = admission
                    {
                        self.stats.upgrades += 1;
                        debug!(
                            event = "upgrade",
                            node = %child,
                            previous = %previous,
                            previous_cost,
                            path_cost = child_cost,
                        );
                        ChildOutcome::Upgraded {
                            node: child,
                            previous,
                        }
                    } else {
                        ChildOutcome::Pushed { node: child }
                    };
                    if let Some(action) = action_text {
                        records.push(ChildRecord {
                            index: candidate.index,
                            action,
                            outcome,
                        });
                    }
                    continue;
                }
            };
            if self.trace.is_some() {
                records.push(ChildRecord {
                    index: candidate.index,
                    action: candidate.action.to_string(),
                    outcome,
                });
            }
        }

        let pushed = batch.len();
        self.frontier.extend(batch);
        self.stats.expanded += 1;
        self.stats.frontier_high_water =
            u64::try_from(self.frontier.high_water()).unwrap_or(u64::MAX);

        trace!(
            event = "expand",
            node = %id,
            depth,
            path_cost,
            pushed,
            frontier = self.frontier.len(),
        );

        if let Some(log) = self.trace.as_mut() {
            records.sort_by_key(|r| r.index);
            log.expansions.push(ExpansionEvent {
                order: self.stats.expanded - 1,
                node: id,
                depth,
                path_cost,
                state_fingerprint: state_fingerprint(&parent_state),
                children: records,
            });
        }
        Ok(())
    }

    /// Drive to the first goal and report it as a path.
    pub(crate) fn first_path(mut self) -> Result<SearchResult<G::State, G::Args>, SearchError> {
        Ok(match self.next_goal()? {
            Some(goal) => SearchResult::Path(self.path_to(goal)),
            None => self.unsolved(),
        })
    }

    /// Drive to the first goal and report the goal state only.
    pub(crate) fn first_goal_state(
        mut self,
    ) -> Result<SearchResult<G::State, G::Args>, SearchError> {
        Ok(match self.next_goal()? {
            Some(goal) => SearchResult::GoalState(self.goal_state(goal)),
            None => self.unsolved(),
        })
    }
}
