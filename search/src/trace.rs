//! `SearchTrace`: expansion-event audit log.
//!
//! One [`ExpansionEvent`] per expanded node, in expansion order, each listing
//! what happened to every action the generator produced. Two runs of the
//! same method on the same problem yield byte-identical canonical JSON.

use serde::{Deserialize, Serialize};
use statespace_kernel::operators::operator::Cost;
use statespace_kernel::proof::canon::{to_canonical_bytes, CanonError};
use statespace_kernel::proof::hash::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};

use crate::explored::DuplicatePolicy;
use crate::frontier::Discipline;
use crate::node::NodeId;
use crate::outcome::Termination;

/// What the engine did with one generated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChildOutcome {
    /// New state; pushed as `node`.
    Pushed { node: NodeId },
    /// Known state at no higher cost; discarded.
    Duplicate { existing: NodeId },
    /// Known state reached more cheaply; pushed as `node`, superseding
    /// `previous`.
    Upgraded { node: NodeId, previous: NodeId },
    /// Rejected by the generator's validity filter.
    Invalid,
    /// Refused by a depth bound; never applied.
    DepthLimited,
}

/// One generated action and its fate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildRecord {
    /// Position in the generator's output.
    pub index: u64,
    /// Textual form of the action.
    pub action: String,
    pub outcome: ChildOutcome,
}

/// One node expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionEvent {
    /// 0-based expansion counter.
    pub order: u64,
    pub node: NodeId,
    pub depth: u32,
    pub path_cost: Cost,
    pub state_fingerprint: ContentHash,
    pub children: Vec<ChildRecord>,
}

/// The audit log of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTrace {
    pub method: String,
    pub discipline: Discipline,
    pub duplicates: DuplicatePolicy,
    pub expansions: Vec<ExpansionEvent>,
    /// Goal nodes in the order they were reached.
    pub goals: Vec<NodeId>,
    /// `None` while the run is in progress.
    pub termination: Option<Termination>,
}

impl SearchTrace {
    #[must_use]
    pub fn new(method: impl Into<String>, discipline: Discipline, duplicates: DuplicatePolicy) -> Self {
        Self {
            method: method.into(),
            discipline,
            duplicates,
            expansions: Vec::new(),
            goals: Vec::new(),
            termination: None,
        }
    }

    /// Canonical JSON bytes of the whole log.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if the log does not canonicalize.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        to_canonical_bytes(self)
    }

    /// Content hash of [`Self::to_canonical_json_bytes`].
    ///
    /// # Errors
    ///
    /// Propagates [`CanonError`].
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            DOMAIN_SEARCH_TRACE,
            &self.to_canonical_json_bytes()?,
        ))
    }

    /// Number of child records with the given outcome kind.
    #[must_use]
    pub fn count_outcomes(&self, matches: impl Fn(&ChildOutcome) -> bool) -> usize {
        self.expansions
            .iter()
            .flat_map(|event| event.children.iter())
            .filter(|child| matches(&child.outcome))
            .count()
    }
}
