//! N-Queens as a boolean-cell constraint model.
//!
//! Each of the `n²` cells is a 0/1 variable meaning "a queen stands here".
//! Rows and columns take exactly one queen; every diagonal in both
//! directions takes at most one. Diagonals are enumerated by a single
//! index per direction (`row - col` and `row + col`), so each line is
//! posted exactly once.
//!
//! # Key Components
//!
//! - [`BoardModel`] — builds the model, selects branching, renders solutions
//! - [`diagonals`] — line enumeration, exposed for coverage checks
//! - [`run`] — search driver printing every solution found

mod board;
mod diagonal;
mod runner;

pub use board::{BoardModel, DEFAULT_SEED};
pub use diagonal::{column, diagonals, is_valid_placement, row, Cell, Direction};
pub use runner::run;
