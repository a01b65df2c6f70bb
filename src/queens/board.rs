//! N-Queens board model: one 0/1 variable per cell.

use std::fmt::Write as _;

use log::debug;

use super::diagonal::{self, Cell, Direction};
use crate::cp::{Assignment, Branching, CpModel, ValSelection, VarId, VarSelection};
use crate::error::{CpError, Result};

/// Seed of the default random branching.
pub const DEFAULT_SEED: u64 = 1;

/// The N-Queens puzzle as a CP model over `size²` boolean cell variables.
///
/// Posted constraints:
/// - exactly one queen in every row,
/// - exactly one queen in every column,
/// - at most one queen on every diagonal in both directions (`2n - 1`
///   lines per direction, corner cells included).
///
/// # Examples
///
/// ```
/// use u_nqueens::cp::{CpSolver, DfsSolver, SolverConfig};
/// use u_nqueens::queens::{is_valid_placement, BoardModel};
///
/// let board = BoardModel::new(6).unwrap();
/// assert_eq!(board.model().constraint_count(), 6 * 6 - 2);
///
/// let solution = DfsSolver::new().solve(board.model(), &SolverConfig::default());
/// let queens = board.queens(&solution.assignment.unwrap()).unwrap();
/// assert!(is_valid_placement(6, &queens));
/// ```
#[derive(Debug, Clone)]
pub struct BoardModel {
    size: usize,
    model: CpModel,
    cells: Vec<VarId>,
}

impl BoardModel {
    /// Builds the model for a `size`×`size` board.
    ///
    /// A negative size is rejected before anything is posted. Size 0 gives
    /// an empty model with no variables and no constraints.
    pub fn new(size: i64) -> Result<Self> {
        let n = usize::try_from(size).map_err(|_| CpError::InvalidSize(size))?;
        let cell_count = n.checked_mul(n).ok_or(CpError::InvalidSize(size))?;

        let mut model = CpModel::new(format!("queens-{n}"));
        let mut cells = Vec::with_capacity(cell_count);
        for r in 0..n {
            for c in 0..n {
                cells.push(model.new_bool_var(format!("q{r}_{c}")));
            }
        }

        let mut board = Self { size: n, model, cells };

        for i in 0..n {
            let row = board.vars_of(&diagonal::row(n, i));
            board.model.add_exactly(row, 1);
        }
        for j in 0..n {
            let col = board.vars_of(&diagonal::column(n, j));
            board.model.add_exactly(col, 1);
        }
        for direction in Direction::ALL {
            for line in diagonal::diagonals(n, direction) {
                let vars = board.vars_of(&line);
                board.model.add_at_most(vars, 1);
            }
        }

        board.model.set_centrality(centrality(n));
        board.model.set_branching(Branching::random(DEFAULT_SEED));

        debug!(
            "board {n}x{n}: {} variables, {} constraints",
            board.model.var_count(),
            board.model.constraint_count()
        );
        Ok(board)
    }

    /// Board side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The underlying CP model.
    pub fn model(&self) -> &CpModel {
        &self.model
    }

    /// Variable of the cell at (`row`, `col`).
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the board.
    pub fn cell(&self, row: usize, col: usize) -> VarId {
        assert!(row < self.size && col < self.size, "cell ({row}, {col}) off board");
        self.cells[row * self.size + col]
    }

    /// Cell variables in row-major order.
    pub fn cells(&self) -> &[VarId] {
        &self.cells
    }

    /// Sets variable order, value order and seed for the search engine.
    pub fn select_branching(&mut self, var: VarSelection, val: ValSelection, seed: u64) {
        self.model.set_branching(Branching { var, val, seed });
    }

    /// Renders a complete assignment as a grid.
    ///
    /// Each cell is its value right-aligned to width 2 followed by two
    /// spaces; each row ends with a newline.
    pub fn render(&self, assignment: &Assignment) -> Result<String> {
        self.check_complete(assignment)?;

        let mut out = String::with_capacity(self.size * (self.size * 4 + 1));
        for r in 0..self.size {
            for c in 0..self.size {
                let value = u8::from(assignment.value(self.cell(r, c)) == Some(true));
                // Writing to a String cannot fail.
                let _ = write!(out, "{value:>2}  ");
            }
            out.push('\n');
        }
        Ok(out)
    }

    /// Queen positions of a complete assignment, row-major.
    pub fn queens(&self, assignment: &Assignment) -> Result<Vec<Cell>> {
        self.check_complete(assignment)?;

        Ok(self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, &var)| assignment.value(var) == Some(true))
            .map(|(i, _)| Cell::new(i / self.size, i % self.size))
            .collect())
    }

    /// Complete assignment with a queen on each listed cell and 0 elsewhere.
    pub fn assignment_for(&self, queens: &[Cell]) -> Result<Assignment> {
        let mut values = vec![false; self.model.var_count()];
        for q in queens {
            if q.row >= self.size || q.col >= self.size {
                return Err(CpError::CellOutOfBounds {
                    row: q.row,
                    col: q.col,
                    size: self.size,
                });
            }
            values[self.cell(q.row, q.col).index()] = true;
        }
        Ok(Assignment::complete(values))
    }

    fn check_complete(&self, assignment: &Assignment) -> Result<()> {
        let expected = self.model.var_count();
        if assignment.len() != expected {
            return Err(CpError::AssignmentSize {
                expected,
                actual: assignment.len(),
            });
        }
        match assignment.unbound_count() {
            0 => Ok(()),
            unbound => Err(CpError::IncompleteAssignment { unbound }),
        }
    }

    fn vars_of(&self, cells: &[Cell]) -> Vec<VarId> {
        cells.iter().map(|c| self.cell(c.row, c.col)).collect()
    }
}

/// Rank of each cell by distance from the board centre (0 = centre).
fn centrality(n: usize) -> Vec<u32> {
    let span = n.saturating_sub(1) as i64;
    let mut ranks = Vec::with_capacity(n * n);
    for r in 0..n as i64 {
        for c in 0..n as i64 {
            ranks.push(((2 * r - span).abs() + (2 * c - span).abs()) as u32);
        }
    }
    ranks
}
