//! statespace kernel: the contracts every search problem is written against.
//!
//! # API Surface
//!
//! - [`state::State`] -- copy, equality, hash and textual form of a search point
//! - [`operators::operator::Operator`] / [`operators::operator::Action`] --
//!   declared transformations and their bound applications
//! - [`operators::operator_registry::OperatorRegistry`] -- the declared
//!   operator table of one state type
//! - [`generator::Generator`] -- successor generation, standalone or
//!   self-generating via [`generator::Intrinsic`]
//!
//! # Module Dependency Direction
//!
//! `proof` ← `state` ← `operators` ← `generator`
//!
//! One-way only. No cycles. `proof` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod generator;
pub mod operators;
pub mod proof;
pub mod state;
