//! Greedy constructors, polynomial-time bounds, and the two metaheuristic
//! searches (spec §4.4-§4.6).
//!
//! Every search-style entry point (row-weighting local search, LNS) shares
//! the [`formatter::AlgorithmFormatter`]/[`formatter::AlgorithmParameters`]
//! pair: parameters in, a thread-safe best-so-far tracker throughout, an
//! [`formatter::AlgorithmOutput`] out.

pub mod bounds;
pub mod formatter;
pub mod greedy;
pub mod lns;
pub mod milp;
pub mod row_weighting;

pub use bounds::{clique_cover_bound, trivial_bound};
pub use formatter::{AlgorithmFormatter, AlgorithmOutput, AlgorithmParameters, NewSolutionCallback};
pub use greedy::{greedy, greedy_dual, greedy_gwmin, greedy_lin, greedy_or_greedy_reverse, greedy_reverse};
pub use lns::large_neighborhood_search;
pub use milp::{MilpBackend, MilpOutput, MilpStatus};
pub use row_weighting::local_search_row_weighting;
