//! Search policy: budgets, bounds and trace recording for one run.
//!
//! Loadable from TOML or JSON so budgets can change without code changes:
//!
//! ```
//! use statespace_search::policy::SearchPolicy;
//! use std::time::Duration;
//!
//! let policy = SearchPolicy::from_toml_str(r#"
//!     node_budget = 5000
//!     depth_limit = 30
//!     time_limit_ms = 250
//!     record_trace = true
//! "#).unwrap();
//!
//! assert_eq!(policy.node_budget, Some(5000));
//! assert_eq!(policy.time_limit(), Some(Duration::from_millis(250)));
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use statespace_kernel::operators::operator::Cost;
use thiserror::Error;

/// Configuration error. Raised before any search step is taken.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("node budget must be at least 1")]
    ZeroNodeBudget,

    #[error("time limit must be at least 1 ms")]
    ZeroTimeLimit,

    #[error("lower bound {lower} is not below upper bound {upper}")]
    EmptyCostWindow { lower: Cost, upper: Cost },

    #[error("method `{method}` pairs an inconsistent generator with no duplicate detection")]
    UnguardedDuplicates { method: String },

    #[error("method `{method}` uses {requirement} but carries no evaluator")]
    MissingEvaluator {
        method: String,
        requirement: &'static str,
    },

    #[error("generator `{generator}` declares no operators")]
    EmptyRegistry { generator: String },
}

/// Budgets and bounds applied to a run.
///
/// Every field is optional; the default policy is unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchPolicy {
    /// Maximum number of node expansions.
    pub node_budget: Option<u64>,
    /// Nodes deeper than this are never generated.
    pub depth_limit: Option<u32>,
    /// Wall-clock limit, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Cost at or below which a solution is accepted as optimal by
    /// branch-and-bound.
    pub lower_bound: Option<Cost>,
    /// Exclusive cost ceiling. Nodes at or above it are neither goal-tested
    /// nor expanded.
    pub upper_bound: Option<Cost>,
    /// Record the expansion audit log.
    pub record_trace: bool,
}

impl SearchPolicy {
    /// The unlimited policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a policy from a file: JSON for a `.json` extension, TOML
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, does not parse,
    /// or fails [`Self::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        }
    }

    /// Parses and validates a policy from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] on malformed input, or a validation
    /// error from [`Self::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let policy: Self = toml::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Parses and validates a policy from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] on malformed input, or a validation
    /// error from [`Self::validate`].
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.validate()?;
        Ok(policy)
    }

    #[must_use]
    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn with_depth_limit(mut self, limit: u32) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    /// Sets the wall-clock limit, truncated to whole milliseconds.
    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    #[must_use]
    pub fn with_lower_bound(mut self, bound: Cost) -> Self {
        self.lower_bound = Some(bound);
        self
    }

    #[must_use]
    pub fn with_upper_bound(mut self, bound: Cost) -> Self {
        self.upper_bound = Some(bound);
        self
    }

    #[must_use]
    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    /// Wall-clock limit as a `Duration`.
    #[must_use]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Whether `cost` lies inside the `[0, upper_bound)` window.
    #[must_use]
    pub fn within_upper_bound(&self, cost: Cost) -> bool {
        !matches!(self.upper_bound, Some(upper) if cost >= upper)
    }

    /// Check internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroNodeBudget`], [`ConfigError::ZeroTimeLimit`]
    /// or [`ConfigError::EmptyCostWindow`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_budget == Some(0) {
            return Err(ConfigError::ZeroNodeBudget);
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::ZeroTimeLimit);
        }
        if let (Some(lower), Some(upper)) = (self.lower_bound, self.upper_bound) {
            if lower >= upper {
                return Err(ConfigError::EmptyCostWindow { lower, upper });
            }
        }
        Ok(())
    }
}
