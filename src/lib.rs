//! A metaheuristic toolbox for the weighted set covering problem.
//!
//! Given a universe of elements and a collection of weighted sets that
//! cover subsets of it, find a minimum-cost subfamily whose union is the
//! universe. This crate provides the three tightly-coupled subsystems
//! that make up the solver core:
//!
//! - [`instance`]: the immutable problem graph ([`instance::Instance`]),
//!   built via [`instance::InstanceBuilder`].
//! - [`solution`]: the mutable, incrementally-maintained assignment of
//!   chosen sets ([`solution::Solution`]).
//! - [`reduction`]: a fixed-point rewriter that shrinks an instance before
//!   a metaheuristic runs on it, plus the [`reduction::UnreductionMap`]
//!   that lifts a reduced solution back.
//! - [`algorithms`]: greedy constructors, polynomial-time bounds, the
//!   row-weighting local search, and large-neighbourhood search.
//! - [`io`]: parsers for the academic instance formats, certificate I/O,
//!   and the JSON report shape.

pub mod algorithms;
pub mod containers;
pub mod error;
pub mod instance;
pub mod io;
pub mod reduction;
pub mod rng;
pub mod solution;
pub mod timer;
pub mod types;

pub use error::{Result, SetCoverError};
pub use instance::{Instance, InstanceBuilder};
pub use solution::Solution;
