//! Proof module: canonical bytes and content hashing.
//!
//! Depends on nothing internal. Registries, traces and reports route every
//! digest through [`canon`] and [`hash`].

pub mod canon;
pub mod hash;
