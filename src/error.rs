//! Error types for the tic-tac-toe engine.
//!
//! Every fallible operation in the crate returns [`Result`], so a front-end only has to deal
//! with a single error type.

use thiserror::Error;

/// Why a move could not be placed on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IllegalMoveReason {
    /// The row or column is outside of `0..=2`.
    OutOfRange,
    /// The targeted cell already holds a mark.
    Occupied,
}

impl std::fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "the cell is outside of the board"),
            Self::Occupied => write!(f, "the cell is already occupied"),
        }
    }
}

/// Errors that can occur while playing or searching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeError {
    /// A move targeted an occupied or out-of-range cell.
    ///
    /// Callers are expected to reject the input and ask again.
    #[error("illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        row: usize,
        col: usize,
        reason: IllegalMoveReason,
    },

    /// A search was requested on a position that is already decided.
    ///
    /// Check [`Board::is_terminal`](crate::Board::is_terminal) before asking for a move.
    #[error("no moves available: the game is already over")]
    NoMovesAvailable,

    /// A board could not be built from the given cells or text.
    #[error("invalid board: {0}")]
    InvalidBoard(String),

    /// A player could not be parsed.
    #[error("'{0}' is not a valid tic-tac-toe player")]
    InvalidPlayer(char),

    /// A difficulty could not be parsed.
    #[error("'{0}' is not a valid difficulty (expected easy, medium or hard)")]
    InvalidDifficulty(String),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, TicTacToeError>;
