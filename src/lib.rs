//! N-Queens as a constraint satisfaction problem.
//!
//! The board is encoded with one boolean variable per cell and posted as
//! cardinality constraints:
//!
//! - **CP (Constraint Programming)**: Domain-agnostic modeling layer for
//!   boolean variables with `exactly`/`at most` constraints, seeded
//!   branching policies, and a depth-first search engine with forward
//!   checking.
//! - **Queens**: The N-Queens board model on top of the CP layer, its
//!   diagonal enumeration, solution rendering, and a printing driver.
//!
//! # Architecture
//!
//! The board model only declares variables and posts constraints; all
//! propagation and search goes through the [`cp::CpSolver`] trait, so the
//! bundled [`cp::DfsSolver`] can be swapped for another engine.

pub mod cp;
pub mod error;
pub mod queens;

pub use error::{CpError, Result};
