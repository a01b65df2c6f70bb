//! Board coordinates and line enumeration.

use std::fmt;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Diagonal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `\`: top-left to bottom-right, constant `row - col`.
    Falling,
    /// `/`: bottom-left to top-right, constant `row + col`.
    Rising,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Falling, Direction::Rising];

    /// Index of the diagonal through `cell`, in `0..2 * size - 1`.
    ///
    /// Falling diagonals are shifted by `size - 1` so the top-right corner
    /// gets index 0 and the bottom-left corner index `2 * size - 2`. A cell
    /// off the board (any cell when `size == 0`) gets an index that names
    /// no diagonal of the board.
    pub fn index(self, size: usize, cell: Cell) -> usize {
        match self {
            Direction::Falling => (cell.row + size).saturating_sub(cell.col + 1),
            Direction::Rising => cell.row + cell.col,
        }
    }
}

/// Cells of row `row`, left to right.
pub fn row(size: usize, row: usize) -> Vec<Cell> {
    (0..size).map(|col| Cell::new(row, col)).collect()
}

/// Cells of column `col`, top to bottom.
pub fn column(size: usize, col: usize) -> Vec<Cell> {
    (0..size).map(|row| Cell::new(row, col)).collect()
}

/// Every diagonal of a `size`×`size` board in one direction.
///
/// Cells are grouped by [`Direction::index`]; the result holds `2 * size - 1`
/// groups (none for an empty board), each ordered top to bottom. Every cell
/// appears in exactly one group.
pub fn diagonals(size: usize, direction: Direction) -> Vec<Vec<Cell>> {
    if size == 0 {
        return Vec::new();
    }
    let mut groups = vec![Vec::new(); 2 * size - 1];
    for r in 0..size {
        for c in 0..size {
            let cell = Cell::new(r, c);
            groups[direction.index(size, cell)].push(cell);
        }
    }
    groups
}

/// Whether `queens` is a valid N-Queens placement on a `size`×`size` board:
/// every queen on the board, exactly one per row and per column, at most one
/// per diagonal in both directions.
pub fn is_valid_placement(size: usize, queens: &[Cell]) -> bool {
    if queens.len() != size || queens.iter().any(|q| q.row >= size || q.col >= size) {
        return false;
    }

    let mut rows = vec![false; size];
    let mut cols = vec![false; size];
    let lines = 2 * size.max(1) - 1;
    let mut falling = vec![false; lines];
    let mut rising = vec![false; lines];

    for &q in queens {
        let slots = [
            &mut rows[q.row],
            &mut cols[q.col],
            &mut falling[Direction::Falling.index(size, q)],
            &mut rising[Direction::Rising.index(size, q)],
        ];
        for slot in slots {
            if *slot {
                return false;
            }
            *slot = true;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn check_partition(size: usize, direction: Direction) {
        let groups = diagonals(size, direction);
        assert_eq!(groups.len(), 2 * size - 1);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(!group.is_empty());
            let key = direction.index(size, group[0]);
            for &cell in group {
                assert_eq!(direction.index(size, cell), key);
                assert!(seen.insert(cell), "{cell} listed twice");
            }
        }
        assert_eq!(seen.len(), size * size);

        let keys: HashSet<usize> = groups.iter().map(|g| direction.index(size, g[0])).collect();
        assert_eq!(keys.len(), 2 * size - 1);
    }

    #[test]
    fn test_falling_diagonals_partition_board() {
        for size in 1..=8 {
            check_partition(size, Direction::Falling);
        }
    }

    #[test]
    fn test_rising_diagonals_partition_board() {
        for size in 1..=8 {
            check_partition(size, Direction::Rising);
        }
    }

    #[test]
    fn test_five_by_five_lines() {
        let falling = diagonals(5, Direction::Falling);
        // main diagonal appears once, in the middle
        let main: Vec<Cell> = (0..5).map(|i| Cell::new(i, i)).collect();
        assert_eq!(falling.iter().filter(|g| **g == main).count(), 1);
        assert_eq!(falling[4], main);
        assert_eq!(falling[0], vec![Cell::new(0, 4)]);
        assert_eq!(falling[8], vec![Cell::new(4, 0)]);

        let rising = diagonals(5, Direction::Rising);
        let anti: Vec<Cell> = (0..5).map(|i| Cell::new(i, 4 - i)).collect();
        assert_eq!(rising.iter().filter(|g| **g == anti).count(), 1);
        assert_eq!(rising[0], vec![Cell::new(0, 0)]);
        assert_eq!(rising[8], vec![Cell::new(4, 4)]);

        let lengths: Vec<usize> = rising.iter().map(Vec::len).collect();
        assert_eq!(lengths, vec![1, 2, 3, 4, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_index_on_empty_board() {
        assert_eq!(Direction::Falling.index(0, Cell::new(0, 0)), 0);
        assert_eq!(Direction::Falling.index(0, Cell::new(0, 3)), 0);
        assert_eq!(Direction::Rising.index(0, Cell::new(0, 0)), 0);
    }

    #[test]
    fn test_empty_board_has_no_lines() {
        assert!(diagonals(0, Direction::Falling).is_empty());
        assert!(diagonals(0, Direction::Rising).is_empty());
        assert!(row(0, 0).is_empty());
    }

    #[test]
    fn test_rows_and_columns() {
        assert_eq!(row(3, 1), vec![Cell::new(1, 0), Cell::new(1, 1), Cell::new(1, 2)]);
        assert_eq!(column(3, 2), vec![Cell::new(0, 2), Cell::new(1, 2), Cell::new(2, 2)]);
    }

    #[test]
    fn test_valid_placement() {
        let queens: Vec<Cell> = [(0, 1), (1, 3), (2, 0), (3, 2)]
            .into_iter()
            .map(Cell::from)
            .collect();
        assert!(is_valid_placement(4, &queens));
        assert!(is_valid_placement(0, &[]));
        assert!(is_valid_placement(1, &[Cell::new(0, 0)]));
    }

    #[test]
    fn test_invalid_placements() {
        // shared diagonal
        assert!(!is_valid_placement(4, &[(0, 0), (1, 1), (2, 3), (3, 2)].map(Cell::from)));
        // shared column
        assert!(!is_valid_placement(4, &[(0, 1), (1, 1), (2, 0), (3, 2)].map(Cell::from)));
        // too few queens
        assert!(!is_valid_placement(4, &[(0, 1), (1, 3)].map(Cell::from)));
        // off the board
        assert!(!is_valid_placement(1, &[Cell::new(0, 1)]));
    }
}
