//! Error types for model construction, search and rendering.

use thiserror::Error;

/// Errors raised by the modeling layer, the board model and the driver.
#[derive(Debug, Error)]
pub enum CpError {
    /// Board size is negative.
    #[error("invalid board size: {0} (must be >= 0)")]
    InvalidSize(i64),

    /// Rendering or decoding was requested before every variable was bound.
    #[error("incomplete assignment: {unbound} variable(s) unbound")]
    IncompleteAssignment { unbound: usize },

    /// Assignment length does not match the number of model variables.
    #[error("assignment size mismatch: expected {expected} values, got {actual}")]
    AssignmentSize { expected: usize, actual: usize },

    /// A queen placement lies outside the board.
    #[error("cell ({row}, {col}) is outside a {size}x{size} board")]
    CellOutOfBounds { row: usize, col: usize, size: usize },

    /// A constraint references a variable the model never declared.
    #[error("undefined variable: {0}")]
    UndefinedVariable(usize),

    /// A constraint lists the same variable more than once.
    #[error("variable {0} appears twice in one constraint")]
    DuplicateVariable(usize),

    /// Solver configuration is out of range.
    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),

    /// Writing solutions to the output sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, CpError>;
