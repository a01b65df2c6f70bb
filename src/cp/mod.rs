//! Constraint Programming (CP) framework.
//!
//! Provides a domain-agnostic model for boolean decision variables with
//! cardinality constraints, plus a depth-first search engine.
//!
//! # Key Components
//!
//! - **Variables**: [`BoolVar`], [`VarId`], [`Assignment`]
//! - **Constraints**: [`Constraint`] — `Exactly` and `AtMost` cardinality
//! - **Model**: [`CpModel`] — container for variables, constraints, branching
//! - **Branching**: [`Branching`] — variable/value order and seed
//! - **Solver**: [`CpSolver`] trait with the [`DfsSolver`] implementation
//!
//! # Design
//!
//! The model is a plain description; it is never mutated by search.
//! [`DfsSolver`] copies the variable domains at every branch point and
//! narrows the copy by forward checking. Any other engine can be plugged
//! in through [`CpSolver`].
//!
//! # References
//!
//! Rossi, van Beek & Walsh (2006), "Handbook of Constraint Programming"

mod branching;
mod config;
mod model;
mod solver;
mod space;
mod variables;

pub use branching::{Branching, ValSelection, VarSelection};
pub use config::SolverConfig;
pub use model::{Constraint, CpModel};
pub use solver::{CpSolution, CpSolver, DfsSolver, SearchOutcome, SearchStats, SolverStatus};
pub use variables::{Assignment, BoolVar, VarId};
