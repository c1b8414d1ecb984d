//! Type inference.
//!
//! Checking a program happens in two steps: [`UnificationContext::build`]
//! assigns a type to every interesting node and generates a bunch of
//! constraints between those types, and [`unify`] then solves the
//! constraints into a [`Substitution`].

mod constraint;
mod generate;
mod messages;
mod solve;


pub use self::constraint::{Constraint, Provenance};
pub use self::generate::UnificationContext;
pub use self::solve::{unify, Substitution, UnificationError};
