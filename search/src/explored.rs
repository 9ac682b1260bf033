//! Explored registry: duplicate detection over generated states.
//!
//! Keyed on the state's own `Eq + Hash`. Each entry records the best node
//! known for that state and its path cost.
//!
//! Under [`DuplicatePolicy::DetectAndReplace`] a strictly cheaper path to a
//! known state replaces the entry. The superseded node may still sit in the
//! frontier; it is recognised as stale when popped
//! ([`ExploredRegistry::is_stale`]) and skipped without expansion.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use statespace_kernel::operators::operator::Cost;

use crate::node::NodeId;

/// How a method treats a generated state it has seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// No registry. Only sound for consistent generators.
    None,
    /// A state already registered is discarded; the first path found wins.
    DetectOnly,
    /// A state already registered is replaced when reached more cheaply.
    DetectAndReplace,
}

impl DuplicatePolicy {
    /// Canonical string for reports and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::DetectOnly => "detect_only",
            Self::DetectAndReplace => "detect_and_replace",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registry verdict for a generated state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting. The state is now registered under the new node.
    Fresh,
    /// Already registered at equal or lower cost. Discard the new node.
    Duplicate { existing: NodeId },
    /// Registered at strictly higher cost and replaced by the new node.
    Upgrade { previous: NodeId, previous_cost: Cost },
}

/// Best-known node and cost per generated state.
#[derive(Debug, Clone)]
pub struct ExploredRegistry<S> {
    policy: DuplicatePolicy,
    best: HashMap<S, (NodeId, Cost)>,
}

impl<S: Eq + Hash + Clone> ExploredRegistry<S> {
    /// Registry for `policy`, or `None` when the policy needs no registry.
    #[must_use]
    pub fn for_policy(policy: DuplicatePolicy) -> Option<Self> {
        match policy {
            DuplicatePolicy::None => None,
            DuplicatePolicy::DetectOnly | DuplicatePolicy::DetectAndReplace => Some(Self {
                policy,
                best: HashMap::new(),
            }),
        }
    }

    #[must_use]
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Register the root state at cost 0.
    pub fn seed(&mut self, state: &S, node: NodeId) {
        self.best.insert(state.clone(), (node, 0));
    }

    /// Decide whether `node`, reaching `state` at `cost`, enters the search.
    pub fn admit(&mut self, state: &S, node: NodeId, cost: Cost) -> Admission {
        match self.best.get_mut(state) {
            None => {
                self.best.insert(state.clone(), (node, cost));
                Admission::Fresh
            }
            Some(entry) => {
                let (existing, existing_cost) = *entry;
                if self.policy == DuplicatePolicy::DetectAndReplace && cost < existing_cost {
                    *entry = (node, cost);
                    Admission::Upgrade {
                        previous: existing,
                        previous_cost: existing_cost,
                    }
                } else {
                    Admission::Duplicate { existing }
                }
            }
        }
    }

    /// Whether `node` was superseded by a cheaper node for the same state.
    #[must_use]
    pub fn is_stale(&self, state: &S, node: NodeId) -> bool {
        self.best
            .get(state)
            .is_some_and(|&(best_node, _)| best_node != node)
    }

    #[must_use]
    pub fn best_cost(&self, state: &S) -> Option<Cost> {
        self.best.get(state).map(|&(_, cost)| cost)
    }

    #[must_use]
    pub fn best_node(&self, state: &S) -> Option<NodeId> {
        self.best.get(state).map(|&(node, _)| node)
    }

    #[must_use]
    pub fn contains(&self, state: &S) -> bool {
        self.best.contains_key(state)
    }

    /// Number of distinct states registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.best.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(index: usize) -> NodeId {
        NodeId::new(index)
    }

    #[test]
    fn none_policy_builds_no_registry() {
        assert!(ExploredRegistry::<u8>::for_policy(DuplicatePolicy::None).is_none());
    }

    #[test]
    fn detect_only_keeps_first_sighting() {
        let mut reg = ExploredRegistry::for_policy(DuplicatePolicy::DetectOnly).unwrap();
        reg.seed(&"root", id(0));
        assert_eq!(reg.admit(&"b", id(1), 10), Admission::Fresh);
        assert_eq!(reg.admit(&"b", id(2), 1), Admission::Duplicate { existing: id(1) });
        assert_eq!(reg.admit(&"root", id(3), 0), Admission::Duplicate { existing: id(0) });
        assert_eq!(reg.best_cost(&"b"), Some(10));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn detect_and_replace_upgrades_only_strictly_cheaper() {
        let mut reg = ExploredRegistry::for_policy(DuplicatePolicy::DetectAndReplace).unwrap();
        assert_eq!(reg.admit(&"b", id(1), 10), Admission::Fresh);
        assert_eq!(reg.admit(&"b", id(2), 10), Admission::Duplicate { existing: id(1) });
        assert_eq!(
            reg.admit(&"b", id(3), 2),
            Admission::Upgrade {
                previous: id(1),
                previous_cost: 10
            }
        );
        assert_eq!(reg.best_node(&"b"), Some(id(3)));
        assert_eq!(reg.best_cost(&"b"), Some(2));
        assert_eq!(reg.admit(&"b", id(4), 5), Admission::Duplicate { existing: id(3) });
    }

    #[test]
    fn superseded_nodes_are_stale() {
        let mut reg = ExploredRegistry::for_policy(DuplicatePolicy::DetectAndReplace).unwrap();
        reg.admit(&"b", id(1), 10);
        assert!(!reg.is_stale(&"b", id(1)));
        reg.admit(&"b", id(2), 3);
        assert!(reg.is_stale(&"b", id(1)));
        assert!(!reg.is_stale(&"b", id(2)));
        assert!(!reg.is_stale(&"unseen", id(7)));
    }

    #[test]
    fn root_seed_cannot_be_undercut() {
        let mut reg = ExploredRegistry::for_policy(DuplicatePolicy::DetectAndReplace).unwrap();
        reg.seed(&0u8, id(0));
        assert_eq!(reg.admit(&0u8, id(5), 0), Admission::Duplicate { existing: id(0) });
        assert!(reg.contains(&0u8));
    }
}
