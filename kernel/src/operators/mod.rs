//! Operators module: operator descriptors, bound actions and the registry.
//!
//! Depends on `proof` for registry digests. Does not import from `generator`.

pub mod operator;
pub mod operator_registry;
