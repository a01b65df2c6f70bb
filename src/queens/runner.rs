//! Search driver: runs a solver over a board and prints every solution.

use std::io::Write;
use std::ops::ControlFlow;

use log::{trace, warn};

use super::board::BoardModel;
use super::diagonal::is_valid_placement;
use crate::cp::{Assignment, CpSolver, SearchOutcome, SolverConfig};
use crate::error::{CpError, Result};

/// Runs `solver` on `board` and writes each solution grid to `out`,
/// followed by a blank line.
///
/// Zero solutions is a normal outcome (`SolverStatus::Infeasible`), not an
/// error. The first render or write failure stops the search and is
/// returned.
pub fn run<S, W>(
    board: &BoardModel,
    solver: &S,
    config: &SolverConfig,
    out: &mut W,
) -> Result<SearchOutcome>
where
    S: CpSolver + ?Sized,
    W: Write,
{
    let mut failure: Option<CpError> = None;
    let mut printed = 0usize;

    let outcome = solver.search(board.model(), config, &mut |assignment: &Assignment| {
        if let Err(err) = print_solution(board, assignment, out) {
            failure = Some(err);
            return ControlFlow::Break(());
        }
        printed += 1;
        trace!("printed solution {printed}");
        ControlFlow::Continue(())
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(outcome),
    }
}

fn print_solution<W: Write>(board: &BoardModel, assignment: &Assignment, out: &mut W) -> Result<()> {
    let queens = board.queens(assignment)?;
    if !is_valid_placement(board.size(), &queens) {
        warn!("solver reported an invalid placement: {queens:?}");
    }
    out.write_all(board.render(assignment)?.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}
