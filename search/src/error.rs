//! Typed search errors.
//!
//! `SearchError` covers configuration failures raised before a run starts
//! and contract violations that abort a run. Frontier exhaustion and cutoffs
//! are ordinary outcomes, reported through [`crate::outcome::Termination`].

use statespace_kernel::operators::operator::ApplyFailure;
use statespace_kernel::operators::operator_registry::RegistryError;
use statespace_kernel::proof::canon::CanonError;
use thiserror::Error;

use crate::node::NodeId;
use crate::policy::ConfigError;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Method or policy rejected at assembly time. No search step was taken.
    #[error("invalid search configuration: {0}")]
    Config(#[from] ConfigError),

    /// Operator registry construction failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The generator emitted an action whose operator it never declared.
    #[error("generator emitted undeclared operator `{name}` while expanding {node}")]
    UnregisteredOperator { name: &'static str, node: NodeId },

    /// Applying a generated action failed. The run is aborted.
    #[error("operator application failed while expanding {node}: {source}")]
    Apply {
        node: NodeId,
        #[source]
        source: ApplyFailure,
    },

    /// The audit log could not be canonicalized.
    #[error("search trace canonicalization failed: {0}")]
    Trace(#[from] CanonError),
}
