//! `OperatorRegistry`: the declared operator table of one state type.
//!
//! Every operator a generator may emit is declared here before any search
//! runs. The engine checks each emitted action against the registry, so an
//! undeclared operator is caught at the first expansion that produces it.
//!
//! Content-addressed via canonical JSON for inclusion in run reports.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::operators::operator::Operator;
use crate::proof::canon::canonical_json_bytes;
use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_OPERATOR_REGISTRY};

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Error type for operator registry construction and serialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two operators share the same name.
    #[error("duplicate operator name in registry: {name}")]
    DuplicateName { name: &'static str },
    /// No operators were declared.
    #[error("operator registry `{schema_version}` declares no operators")]
    Empty { schema_version: String },
    /// Canonical JSON serialization failed.
    #[error("operator registry canonicalization failed: {detail}")]
    Canonicalization { detail: String },
}

// ---------------------------------------------------------------------------
// OperatorRegistry
// ---------------------------------------------------------------------------

/// Maps operator name to operator.
///
/// `BTreeMap` for deterministic iteration order.
pub struct OperatorRegistry<S, A> {
    entries: BTreeMap<&'static str, Operator<S, A>>,
    schema_version: String,
}

impl<S, A> OperatorRegistry<S, A> {
    /// Build a registry from a list of operators.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Empty`] if `operators` is empty, or
    /// [`RegistryError::DuplicateName`] if two operators share a name.
    pub fn new(
        schema_version: impl Into<String>,
        operators: impl IntoIterator<Item = Operator<S, A>>,
    ) -> Result<Self, RegistryError> {
        let schema_version = schema_version.into();
        let mut map = BTreeMap::new();
        for operator in operators {
            let name = operator.name();
            if map.insert(name, operator).is_some() {
                return Err(RegistryError::DuplicateName { name });
            }
        }
        if map.is_empty() {
            return Err(RegistryError::Empty { schema_version });
        }
        Ok(Self {
            entries: map,
            schema_version,
        })
    }

    /// Look up an operator by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Operator<S, A>> {
        self.entries.get(name)
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Registered operators in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator<S, A>> {
        self.entries.values()
    }

    /// Number of registered operators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty. Always `false` for a constructed registry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schema version string supplied at construction.
    #[must_use]
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Produce canonical JSON bytes for content-addressing.
    ///
    /// Format: sorted top-level keys, operators array sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Canonicalization`] if canonical JSON
    /// serialization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, RegistryError> {
        let operators: Vec<serde_json::Value> = self
            .entries
            .values()
            .map(|op| {
                serde_json::json!({
                    "name": op.name(),
                    "unit_cost": op.unit_cost(),
                })
            })
            .collect();

        let value = serde_json::json!({
            "operators": operators,
            "schema_version": self.schema_version,
        });

        canonical_json_bytes(&value).map_err(|e| RegistryError::Canonicalization {
            detail: e.to_string(),
        })
    }

    /// Content hash of [`Self::canonical_bytes`].
    ///
    /// # Errors
    ///
    /// Propagates [`RegistryError::Canonicalization`].
    pub fn digest(&self) -> Result<ContentHash, RegistryError> {
        Ok(canonical_hash(
            DOMAIN_OPERATOR_REGISTRY,
            &self.canonical_bytes()?,
        ))
    }
}

impl<S, A> Clone for OperatorRegistry<S, A> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            schema_version: self.schema_version.clone(),
        }
    }
}

impl<S, A> fmt::Debug for OperatorRegistry<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorRegistry")
            .field("schema_version", &self.schema_version)
            .field("operators", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
