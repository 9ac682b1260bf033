//! The State capability contract.
//!
//! A state is one point in the search space. The engine needs four
//! capabilities from it: an independent copy, value equality, a stable hash
//! and a textual form. In Rust these are `Clone`, `Eq`, `Hash` and
//! `Display`; `State` is blanket-implemented for every type providing them,
//! so problem types never implement it by hand.

use std::fmt;
use std::hash::Hash;

use crate::proof::hash::{canonical_hash, ContentHash, DOMAIN_STATE};

/// A point in a search space.
///
/// # Contract
///
/// - `clone()` yields an independent copy: mutating the copy never affects
///   the original.
/// - `Eq` and `Hash` agree, and depend only on the problem-relevant fields.
///   The explored registry keys on them.
/// - `Display` is the human-readable form used in paths, traces and reports.
pub trait State: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// Textual representation of the state.
    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl<T> State for T where T: Clone + Eq + Hash + fmt::Debug + fmt::Display {}

/// Content fingerprint of a state, computed over its textual form.
///
/// Two states with the same text share a fingerprint; problem types whose
/// `Display` omits identity-relevant fields should not rely on it.
#[must_use]
pub fn state_fingerprint<S: State>(state: &S) -> ContentHash {
    canonical_hash(DOMAIN_STATE, state.to_text().as_bytes())
}
