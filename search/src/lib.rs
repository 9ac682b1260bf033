//! statespace search: generic state-space search over kernel generators.
//!
//! This crate depends only on `statespace_kernel`; it does NOT depend on
//! `statespace_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! statespace_kernel  ←  statespace_search  ←  statespace_harness
//! (contracts, hashing)  (frontiers, engine)    (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`method::Method`] -- generator + evaluator + frontier discipline +
//!   duplicate policy, validated at assembly
//! - [`problem::Problem`] -- initial state and goal predicate
//! - [`search::Search`] -- one resumable run
//! - [`outcome::SearchResult`] / [`outcome::SearchRun`] -- what a run produced
//! - [`trace::SearchTrace`] -- expansion-event audit log
//! - [`policy::SearchPolicy`] -- budgets and bounds, loadable from TOML/JSON

#![forbid(unsafe_code)]

pub mod error;
pub mod evaluator;
pub mod explored;
pub mod frontier;
pub mod method;
pub mod node;
pub mod outcome;
pub mod policy;
pub mod problem;
pub mod search;
pub mod trace;

#[cfg(test)]
mod test_support;

pub use error::SearchError;
pub use method::{IterativeDeepening, Method};
pub use outcome::{SearchResult, SearchRun, Termination};
pub use problem::Problem;
