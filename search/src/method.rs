//! Method assembly: a generator, an optional evaluator, a frontier
//! discipline and a duplicate policy, validated together.
//!
//! | Constructor | Discipline | Evaluator |
//! |---|---|---|
//! | [`Method::breadth_first`] | FIFO | none |
//! | [`Method::depth_first`] | LIFO | none |
//! | [`Method::depth_limited`] | depth-bounded LIFO | none |
//! | [`Method::ordered_breadth_first`] | FIFO, children sorted | any |
//! | [`Method::ordered_depth_first`] | LIFO, children sorted | any |
//! | [`Method::best_first`] | priority | any |
//! | [`Method::greedy`] | priority | `h` |
//! | [`Method::uniform_cost`] | priority | `g` |
//! | [`Method::a_star`] | priority | `g + h` |
//!
//! Unless overridden, consistent generators get no duplicate registry.
//! Inconsistent generators get first-found-wins detection under FIFO/LIFO,
//! and cheaper-path replacement under depth-bounded and priority
//! disciplines.

use statespace_kernel::generator::{Generator, GeneratorKind};
use statespace_kernel::operators::operator::Cost;

use crate::error::SearchError;
use crate::evaluator::{AStar, Blind, Evaluator, Greedy, Heuristic, UniformCost};
use crate::explored::DuplicatePolicy;
use crate::frontier::Discipline;
use crate::node::SolutionPath;
use crate::outcome::{CutoffReason, SearchResult, SearchRun, SearchStats, Termination};
use crate::policy::{ConfigError, SearchPolicy};
use crate::problem::Problem;
use crate::search::Search;

/// A validated search algorithm over the states of generator `G`.
#[derive(Debug, Clone)]
pub struct Method<G: Generator, E = Blind> {
    name: String,
    generator: G,
    evaluator: Option<E>,
    discipline: Discipline,
    duplicates: DuplicatePolicy,
    order_children: bool,
    policy: SearchPolicy,
}

/// Duplicate policy used when the caller does not choose one.
#[must_use]
pub fn default_duplicates(kind: GeneratorKind, discipline: Discipline) -> DuplicatePolicy {
    match (kind, discipline) {
        (GeneratorKind::Consistent, _) => DuplicatePolicy::None,
        (GeneratorKind::Inconsistent, Discipline::Fifo | Discipline::Lifo) => {
            DuplicatePolicy::DetectOnly
        }
        (GeneratorKind::Inconsistent, Discipline::DepthBounded { .. } | Discipline::Priority) => {
            DuplicatePolicy::DetectAndReplace
        }
    }
}

impl<G: Generator> Method<G, Blind> {
    /// Breadth-first search: FIFO, no evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn breadth_first(generator: G) -> Result<Self, SearchError> {
        Self::assemble("breadth_first", generator, None, Discipline::Fifo, None, false)
    }

    /// Depth-first search: LIFO, no evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn depth_first(generator: G) -> Result<Self, SearchError> {
        Self::assemble("depth_first", generator, None, Discipline::Lifo, None, false)
    }

    /// Depth-first search that never generates nodes deeper than `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn depth_limited(generator: G, limit: u32) -> Result<Self, SearchError> {
        Self::assemble(
            format!("depth_limited({limit})"),
            generator,
            None,
            Discipline::DepthBounded { limit },
            None,
            false,
        )
    }
}

impl<G: Generator> Method<G, UniformCost> {
    /// Priority on path cost `g`. Optimal for non-negative costs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn uniform_cost(generator: G) -> Result<Self, SearchError> {
        Self::assemble(
            "uniform_cost",
            generator,
            Some(UniformCost),
            Discipline::Priority,
            None,
            false,
        )
    }
}

impl<G: Generator, H: Heuristic<G::State>> Method<G, Greedy<H>> {
    /// Priority on heuristic estimate `h` only. Not optimal.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn greedy(generator: G, heuristic: H) -> Result<Self, SearchError> {
        Self::assemble(
            "greedy",
            generator,
            Some(Greedy(heuristic)),
            Discipline::Priority,
            None,
            false,
        )
    }
}

impl<G: Generator, H: Heuristic<G::State>> Method<G, AStar<H>> {
    /// Priority on `g + h`. Optimal when `heuristic` never overestimates.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn a_star(generator: G, heuristic: H) -> Result<Self, SearchError> {
        Self::assemble(
            "a_star",
            generator,
            Some(AStar(heuristic)),
            Discipline::Priority,
            None,
            false,
        )
    }
}

impl<G, E> Method<G, E>
where
    G: Generator,
    E: Evaluator<G::State>,
{
    /// Priority on an arbitrary evaluator.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn best_first(generator: G, evaluator: E) -> Result<Self, SearchError> {
        Self::assemble(
            "best_first",
            generator,
            Some(evaluator),
            Discipline::Priority,
            None,
            false,
        )
    }

    /// Breadth-first, with each expansion's children sorted by evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn ordered_breadth_first(generator: G, evaluator: E) -> Result<Self, SearchError> {
        Self::assemble(
            "ordered_breadth_first",
            generator,
            Some(evaluator),
            Discipline::Fifo,
            None,
            true,
        )
    }

    /// Depth-first, with each expansion's children sorted by evaluation so
    /// the best-scored child is expanded first.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the generator's registry is empty.
    pub fn ordered_depth_first(generator: G, evaluator: E) -> Result<Self, SearchError> {
        Self::assemble(
            "ordered_depth_first",
            generator,
            Some(evaluator),
            Discipline::Lifo,
            None,
            true,
        )
    }

    /// General assembly. `duplicates: None` selects the default for the
    /// generator kind and discipline.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] when:
    /// - the generator declares no operators;
    /// - an inconsistent generator is paired with [`DuplicatePolicy::None`];
    /// - a priority discipline or child ordering has no evaluator.
    pub fn assemble(
        name: impl Into<String>,
        generator: G,
        evaluator: Option<E>,
        discipline: Discipline,
        duplicates: Option<DuplicatePolicy>,
        order_children: bool,
    ) -> Result<Self, SearchError> {
        let duplicates =
            duplicates.unwrap_or_else(|| default_duplicates(generator.kind(), discipline));
        let method = Self {
            name: name.into(),
            generator,
            evaluator,
            discipline,
            duplicates,
            order_children,
            policy: SearchPolicy::default(),
        };
        method.validate()?;
        Ok(method)
    }

    /// Replace the duplicate policy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnguardedDuplicates`] for an inconsistent
    /// generator with [`DuplicatePolicy::None`].
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Result<Self, SearchError> {
        self.duplicates = duplicates;
        self.validate()?;
        Ok(self)
    }

    /// Replace the search policy.
    ///
    /// # Errors
    ///
    /// Returns the policy's own validation error.
    pub fn with_policy(mut self, policy: SearchPolicy) -> Result<Self, SearchError> {
        self.policy = policy;
        self.validate()?;
        Ok(self)
    }

    /// Rename the method for logs and traces.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.registry().is_empty() {
            return Err(ConfigError::EmptyRegistry {
                generator: self.generator.name().to_string(),
            });
        }
        if self.generator.kind() == GeneratorKind::Inconsistent
            && self.duplicates == DuplicatePolicy::None
        {
            return Err(ConfigError::UnguardedDuplicates {
                method: self.name.clone(),
            });
        }
        if self.evaluator.is_none() {
            if self.discipline == Discipline::Priority {
                return Err(ConfigError::MissingEvaluator {
                    method: self.name.clone(),
                    requirement: "a priority frontier",
                });
            }
            if self.order_children {
                return Err(ConfigError::MissingEvaluator {
                    method: self.name.clone(),
                    requirement: "child ordering",
                });
            }
        }
        self.policy.validate()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    #[must_use]
    pub fn discipline(&self) -> Discipline {
        self.discipline
    }

    #[must_use]
    pub fn duplicates(&self) -> DuplicatePolicy {
        self.duplicates
    }

    #[must_use]
    pub fn orders_children(&self) -> bool {
        self.order_children
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    #[must_use]
    pub fn has_evaluator(&self) -> bool {
        self.evaluator.is_some()
    }

    /// Evaluator score for a state reached at `path_cost`, if the method
    /// carries an evaluator.
    #[must_use]
    pub fn evaluate(&self, state: &G::State, path_cost: Cost) -> Option<i64> {
        self.evaluator
            .as_ref()
            .map(|evaluator| evaluator.evaluate(state, path_cost))
    }

    // -----------------------------------------------------------------------
    // Invocation
    // -----------------------------------------------------------------------

    /// Begin a resumable run.
    ///
    /// # Errors
    ///
    /// Infallible for a method built through the validating constructors;
    /// the `Result` keeps the invocation surface uniform.
    pub fn start<'a>(
        &'a self,
        problem: &'a Problem<G::State>,
    ) -> Result<Search<'a, G, E>, SearchError> {
        self.start_with(problem, self.policy.clone())
    }

    fn start_with<'a>(
        &'a self,
        problem: &'a Problem<G::State>,
        policy: SearchPolicy,
    ) -> Result<Search<'a, G, E>, SearchError> {
        policy.validate()?;
        Ok(Search::new(self, problem, policy))
    }

    /// Run to the first goal and return its path.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the generator violates its contract.
    pub fn search(
        &self,
        problem: &Problem<G::State>,
    ) -> Result<SearchResult<G::State, G::Args>, SearchError> {
        self.start(problem)?.first_path()
    }

    /// Run to the first goal and return the goal state only.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the generator violates its contract.
    pub fn search_goal(
        &self,
        problem: &Problem<G::State>,
    ) -> Result<SearchResult<G::State, G::Args>, SearchError> {
        self.start(problem)?.first_goal_state()
    }

    /// Run with a node budget and depth limit overriding the method policy.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for a zero budget, or a generator
    /// contract violation.
    pub fn search_bounded(
        &self,
        problem: &Problem<G::State>,
        node_budget: Option<u64>,
        depth_limit: Option<u32>,
    ) -> Result<SearchResult<G::State, G::Args>, SearchError> {
        let mut policy = self.policy.clone();
        if node_budget.is_some() {
            policy.node_budget = node_budget;
        }
        if depth_limit.is_some() {
            policy.depth_limit = depth_limit;
        }
        self.start_with(problem, policy)?.first_path()
    }

    /// Run to the first goal and return the full run record.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the generator violates its contract.
    pub fn run(
        &self,
        problem: &Problem<G::State>,
    ) -> Result<SearchRun<G::State, G::Args>, SearchError> {
        let mut search = self.start(problem)?;
        search.next_goal()?;
        Ok(search.finish())
    }
}

// ---------------------------------------------------------------------------
// Iterative deepening
// ---------------------------------------------------------------------------

/// Depth-limited search repeated with limits `0, 1, 2, …` up to `max_depth`.
///
/// Stops at the first limit that solves or exhausts the space. A depth
/// cutoff widens the limit; any other cutoff ends the search.
#[derive(Debug, Clone)]
pub struct IterativeDeepening<G> {
    generator: G,
    max_depth: u32,
    policy: SearchPolicy,
}

/// Outcome of iterative deepening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepeningRun<S, A> {
    pub result: SearchResult<S, A>,
    /// The depth limit of the final iteration.
    pub final_limit: u32,
    /// Counters of every iteration, in order.
    pub iterations: Vec<SearchStats>,
}

impl<G: Generator> IterativeDeepening<G> {
    #[must_use]
    pub fn new(generator: G, max_depth: u32) -> Self {
        Self {
            generator,
            max_depth,
            policy: SearchPolicy::default(),
        }
    }

    /// Policy applied to each iteration. Its `depth_limit` is ignored.
    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = SearchPolicy {
            depth_limit: None,
            ..policy
        };
        self
    }

    /// Run every iteration needed and report the last.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] on invalid configuration or a generator
    /// contract violation.
    pub fn run(
        &self,
        problem: &Problem<G::State>,
    ) -> Result<DeepeningRun<G::State, G::Args>, SearchError> {
        let mut iterations = Vec::new();
        let mut limit = 0;
        loop {
            let method = Method::depth_limited(&self.generator, limit)?
                .with_name(format!("iterative_deepening({limit})"))
                .with_policy(self.policy.clone())?;
            let mut search = method.start(problem)?;
            let result = match search.next_goal()? {
                Some(goal) => SearchResult::Path(search.path_to(goal)),
                None => search.unsolved(),
            };
            iterations.push(search.stats().clone());

            let widen = result.termination() == Termination::Cutoff(CutoffReason::DepthLimit)
                && limit < self.max_depth;
            if !widen {
                return Ok(DeepeningRun {
                    result,
                    final_limit: limit,
                    iterations,
                });
            }
            limit += 1;
        }
    }

    /// Shortcut for [`Self::run`] returning only the path, if any.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub fn search(
        &self,
        problem: &Problem<G::State>,
    ) -> Result<Option<SolutionPath<G::State, G::Args>>, SearchError> {
        Ok(self.run(problem)?.result.into_path())
    }
}
