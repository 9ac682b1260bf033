//! statespace harness: puzzle worlds and a report-producing runner.
//!
//! Worlds provide domain data only: a state type, its operators, an
//! initial state, a goal test and optionally an estimate. The runner
//! assembles a `statespace_search::Method` for a world and packages what
//! the search did as a content-addressed [`runner::RunReport`].
//!
//! The harness does NOT implement search logic; it delegates to
//! `statespace_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod worlds;
