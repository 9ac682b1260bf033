//! Harness runner: drives one world under one method and packages the run
//! as a serializable, content-addressed [`RunReport`].
//!
//! The runner uses ONLY `statespace_search` APIs: `Method` assembly,
//! `Search::next_goal` / `Search::best_goal`, `IterativeDeepening`. It does
//! not implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig (TOML/JSON) → WorldChoice → World
//!   → generator() + problem() → Method (MethodChoice + SearchPolicy)
//!   → [next_goal() × N | best_goal()] per SolutionMode → finish()
//!   → RunReport → canonical JSON → digest
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use statespace_kernel::generator::{Generator, GeneratorKind};
use statespace_kernel::operators::operator::Cost;
use statespace_kernel::operators::operator_registry::RegistryError;
use statespace_kernel::proof::canon::{to_canonical_bytes, CanonError};
use statespace_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};
use statespace_search::evaluator::Evaluator;
use statespace_search::explored::DuplicatePolicy;
use statespace_search::frontier::Discipline;
use statespace_search::method::default_duplicates;
use statespace_search::node::SolutionPath;
use statespace_search::outcome::SearchStats;
use statespace_search::policy::{ConfigError, SearchPolicy};
use statespace_search::trace::SearchTrace;
use statespace_search::{IterativeDeepening, Method, Problem, SearchError, Termination};
use thiserror::Error;
use tracing::{debug, info};

use crate::contract::{World, WorldError, WorldState};
use crate::worlds::bridge_crossing::{BridgeCrossing, CrossingOrder};
use crate::worlds::queens::NQueens;
use crate::worlds::river_crossing::RiverCrossing;
use crate::worlds::tiles::SlidingTiles;
use crate::worlds::water_buckets::WaterBuckets;

// ---------------------------------------------------------------------------
// Choices
// ---------------------------------------------------------------------------

/// Which stock method to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodChoice {
    BreadthFirst,
    DepthFirst,
    DepthLimited { limit: u32 },
    IterativeDeepening { max_depth: u32 },
    UniformCost,
    /// Priority on the world's estimate.
    Greedy,
    /// Priority on path cost plus the world's estimate.
    AStar,
}

/// Which solutions the run collects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionMode {
    /// Stop at the first goal.
    #[default]
    First,
    /// Resume after every goal until the run ends.
    All,
    /// Branch-and-bound for the cheapest goal.
    Optimal,
}

impl SolutionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::All => "all",
            Self::Optimal => "optimal",
        }
    }
}

impl fmt::Display for SolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A world and its instance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldChoice {
    RiverCrossing,
    WaterBuckets { capacities: Vec<u32>, target: u32 },
    BridgeCrossing { times: Vec<Cost>, order: CrossingOrder },
    Queens { size: usize },
    Tiles { size: usize, cells: Vec<u16> },
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Everything needed to reproduce one run.
///
/// ```toml
/// solutions = "optimal"
///
/// [world]
/// kind = "bridge_crossing"
/// times = [1, 2, 5, 10]
/// order = "adaptive"
///
/// [method]
/// kind = "a_star"
///
/// [policy]
/// node_budget = 10000
/// record_trace = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub world: WorldChoice,
    pub method: MethodChoice,
    #[serde(default)]
    pub solutions: SolutionMode,
    #[serde(default)]
    pub policy: SearchPolicy,
}

impl RunConfig {
    /// Loads a config from a file: JSON for a `.json` extension, TOML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or its
    /// policy fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input, or a policy
    /// validation error.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input, or a policy
    /// validation error.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Build the configured world and run it.
    ///
    /// # Errors
    ///
    /// See [`run_world_with`]; also [`RunError::World`] for bad instance
    /// parameters.
    pub fn run(&self) -> Result<RunReport, RunError> {
        let (method, mode, policy) = (self.method, self.solutions, &self.policy);
        match &self.world {
            WorldChoice::RiverCrossing => run_world_with(&RiverCrossing, method, mode, policy),
            WorldChoice::WaterBuckets { capacities, target } => {
                let world = WaterBuckets::new(capacities.clone(), *target)?;
                run_world_with(&world, method, mode, policy)
            }
            WorldChoice::BridgeCrossing { times, order } => {
                let world = BridgeCrossing::new(times.clone(), *order)?;
                run_world_with(&world, method, mode, policy)
            }
            WorldChoice::Queens { size } => {
                run_world_with(&NQueens::new(*size)?, method, mode, policy)
            }
            WorldChoice::Tiles { size, cells } => {
                let world = SlidingTiles::new(*size, cells.clone())?;
                run_world_with(&world, method, mode, policy)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// One solution as it appears in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionSummary {
    pub depth: usize,
    pub cost: Cost,
    /// Textual actions, root first.
    pub actions: Vec<String>,
    /// Textual goal state.
    pub goal: String,
}

impl<S: fmt::Display, A: fmt::Display> From<&SolutionPath<S, A>> for SolutionSummary {
    fn from(path: &SolutionPath<S, A>) -> Self {
        Self {
            depth: path.depth(),
            cost: path.cost(),
            actions: path.actions().map(ToString::to_string).collect(),
            goal: path.goal_state().to_string(),
        }
    }
}

/// Serializable record of one harness run.
///
/// Contains no wall-clock data: two runs of the same config produce the
/// same canonical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub world_id: String,
    pub method: String,
    pub generator: String,
    pub generator_kind: GeneratorKind,
    pub discipline: Discipline,
    pub duplicates: DuplicatePolicy,
    pub mode: SolutionMode,
    /// `None` only if the run never ended (not produced by the runner).
    pub termination: Option<Termination>,
    /// Solutions in discovery order.
    pub solutions: Vec<SolutionSummary>,
    /// Counters of the (final) run.
    pub stats: SearchStats,
    /// Number of depth-limited passes (1 unless iterative deepening).
    pub iterations: u32,
    pub registry_digest: ContentHash,
    /// Digest of the expansion trace, when the policy recorded one.
    pub trace_digest: Option<ContentHash>,
}

impl RunReport {
    /// Cheapest solution, first found on ties.
    #[must_use]
    pub fn best(&self) -> Option<&SolutionSummary> {
        self.solutions
            .iter()
            .reduce(|best, s| if s.cost < best.cost { s } else { best })
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.solutions.is_empty()
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        to_canonical_bytes(self)
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &self.to_canonical_json_bytes()?))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    /// World construction failed.
    #[error(transparent)]
    World(#[from] WorldError),
    /// Method assembly or the search itself failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Registry digest failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// Trace digest failed.
    #[error(transparent)]
    Canon(#[from] CanonError),
    /// The method cannot collect solutions in this mode.
    #[error("{method} does not support `{mode}` solutions")]
    UnsupportedMode {
        method: &'static str,
        mode: SolutionMode,
    },
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Run `world` to its first solution.
///
/// # Errors
///
/// See [`run_world_with`].
pub fn run_world<W: World>(
    world: &W,
    choice: MethodChoice,
    policy: &SearchPolicy,
) -> Result<RunReport, RunError> {
    run_world_with(world, choice, SolutionMode::First, policy)
}

/// Run `world` under `choice`, collecting solutions per `mode`.
///
/// # Errors
///
/// Returns [`RunError::World`] if the generator cannot be built,
/// [`RunError::Search`] for invalid method configuration or a generator
/// contract violation, and [`RunError::UnsupportedMode`] for iterative
/// deepening with a mode other than [`SolutionMode::First`].
pub fn run_world_with<W: World>(
    world: &W,
    choice: MethodChoice,
    mode: SolutionMode,
    policy: &SearchPolicy,
) -> Result<RunReport, RunError> {
    let generator = world.generator()?;
    let problem = world.problem();
    let heuristic = |state: &WorldState<W>| world.estimate(state);

    info!(
        event = "run_start",
        world = world.world_id(),
        method = ?choice,
        mode = %mode,
        initial = %problem.initial(),
    );

    let report = match choice {
        MethodChoice::BreadthFirst => {
            let method = Method::breadth_first(generator)?.with_policy(policy.clone())?;
            drive(world, &method, &problem, mode)
        }
        MethodChoice::DepthFirst => {
            let method = Method::depth_first(generator)?.with_policy(policy.clone())?;
            drive(world, &method, &problem, mode)
        }
        MethodChoice::DepthLimited { limit } => {
            let method = Method::depth_limited(generator, limit)?.with_policy(policy.clone())?;
            drive(world, &method, &problem, mode)
        }
        MethodChoice::UniformCost => {
            let method = Method::uniform_cost(generator)?.with_policy(policy.clone())?;
            drive(world, &method, &problem, mode)
        }
        MethodChoice::Greedy => {
            let method = Method::greedy(generator, heuristic)?.with_policy(policy.clone())?;
            drive(world, &method, &problem, mode)
        }
        MethodChoice::AStar => {
            let method = Method::a_star(generator, heuristic)?.with_policy(policy.clone())?;
            drive(world, &method, &problem, mode)
        }
        MethodChoice::IterativeDeepening { max_depth } => {
            deepen(world, generator, max_depth, policy, &problem, mode)
        }
    }?;

    info!(
        event = "run_end",
        world = %report.world_id,
        method = %report.method,
        termination = ?report.termination,
        solutions = report.solutions.len(),
        expanded = report.stats.expanded,
        generated = report.stats.generated,
    );
    Ok(report)
}

fn drive<W, E>(
    world: &W,
    method: &Method<W::Generator, E>,
    problem: &Problem<WorldState<W>>,
    mode: SolutionMode,
) -> Result<RunReport, RunError>
where
    W: World,
    E: Evaluator<WorldState<W>>,
{
    let mut search = method.start(problem)?;
    let mut solutions = Vec::new();
    match mode {
        SolutionMode::First => {
            if let Some(goal) = search.next_goal()? {
                solutions.push(SolutionSummary::from(&search.path_to(goal)));
            }
        }
        SolutionMode::All => {
            while let Some(goal) = search.next_goal()? {
                solutions.push(SolutionSummary::from(&search.path_to(goal)));
            }
        }
        SolutionMode::Optimal => {
            if let Some(goal) = search.best_goal()? {
                solutions.push(SolutionSummary::from(&search.path_to(goal)));
            }
        }
    }

    let run = search.finish();
    let trace_digest = run.trace.as_ref().map(SearchTrace::digest).transpose()?;
    let generator = method.generator();
    Ok(RunReport {
        world_id: world.world_id().to_string(),
        method: method.name().to_string(),
        generator: generator.name().to_string(),
        generator_kind: generator.kind(),
        discipline: method.discipline(),
        duplicates: method.duplicates(),
        mode,
        termination: run.termination(),
        solutions,
        stats: run.stats,
        iterations: 1,
        registry_digest: generator.registry().digest()?,
        trace_digest,
    })
}

fn deepen<W: World>(
    world: &W,
    generator: W::Generator,
    max_depth: u32,
    policy: &SearchPolicy,
    problem: &Problem<WorldState<W>>,
    mode: SolutionMode,
) -> Result<RunReport, RunError> {
    if mode != SolutionMode::First {
        return Err(RunError::UnsupportedMode {
            method: "iterative_deepening",
            mode,
        });
    }
    let registry_digest = generator.registry().digest()?;
    let generator_name = generator.name().to_string();
    let generator_kind = generator.kind();

    let deepening = IterativeDeepening::new(generator, max_depth).with_policy(policy.clone());
    let mut run = deepening.run(problem)?;
    debug!(
        event = "deepening_done",
        world = world.world_id(),
        final_limit = run.final_limit,
        iterations = run.iterations.len(),
    );

    let discipline = Discipline::DepthBounded {
        limit: run.final_limit,
    };
    Ok(RunReport {
        world_id: world.world_id().to_string(),
        method: format!("iterative_deepening({max_depth})"),
        generator: generator_name,
        generator_kind,
        discipline,
        duplicates: default_duplicates(generator_kind, discipline),
        mode,
        termination: Some(run.result.termination()),
        solutions: run.result.path().map(SolutionSummary::from).into_iter().collect(),
        iterations: u32::try_from(run.iterations.len()).unwrap_or(u32::MAX),
        stats: run.iterations.pop().unwrap_or_default(),
        registry_digest,
        trace_digest: None,
    })
}
