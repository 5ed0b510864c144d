//! An unbeatable tic-tac-toe opponent.
//!
//! The engine runs a depth-limited negamax search with alpha-beta pruning over the game tree.
//! Decided positions are scored so that faster wins and slower losses are preferred, and
//! positions cut off by the depth limit are scored with a small point-based heuristic. At
//! [`Difficulty::Hard`] the search always reaches the end of the game, so the engine never
//! loses.
//!
//! # Example
//!
//! ```rust
//! use ttt_minimax::{explain_move, request_move, Board, Difficulty, Move, Player};
//!
//! // X threatens the top row; O has to block it.
//! let board: Board = "XX./O../...".parse().unwrap();
//!
//! let mv = request_move(&board, Player::O, Difficulty::Hard).unwrap();
//! assert_eq!(mv, Move::new(0, 2));
//!
//! let rationale = explain_move(&board, mv, Player::O).unwrap();
//! println!("{rationale}");
//! ```
//!
//! For more control over the search, build a [`SearchEngine`] directly:
//!
//! ```rust
//! use ttt_minimax::{Board, Player, SearchEngine};
//!
//! let engine = SearchEngine::builder()
//!     .with_depth_limit(4)
//!     .with_alpha_beta_pruning(true)
//!     .build();
//!
//! let result = engine.search(&Board::new(), Player::X).unwrap();
//! println!("{} scores {} after {} nodes", result.best_move, result.score, result.stats.nodes_evaluated);
//! ```

/// Per-move scores and principal variations stored in a tree.
pub mod analysis;
/// The board, players, moves and game outcomes.
pub mod board;
/// Difficulty levels and their search depths.
pub mod difficulty;
/// The crate's error type.
pub mod error;
/// Static evaluation of positions.
pub mod evaluate;
/// Move classification and rationales.
pub mod explain;
/// Random number sources for simulated opponents.
pub mod random;
/// The search engine.
pub mod search;
/// Complete games between move sources.
pub mod simulation;

pub use crate::board::{Board, GameOutcome, Move, Player};
pub use crate::difficulty::Difficulty;
pub use crate::error::{IllegalMoveReason, Result, TicTacToeError};
pub use crate::explain::{Explanation, MoveCategory};
pub use crate::search::{SearchConfig, SearchEngine, SearchResult, SearchStats};
use tracing::debug;

/// Picks the move `player` should play on `board` at the given difficulty.
///
/// This is the entry point for front-ends on the engine's turn. Fails with
/// [`TicTacToeError::NoMovesAvailable`] if the game is already over.
pub fn request_move(board: &Board, player: Player, difficulty: Difficulty) -> Result<Move> {
    let result = SearchEngine::from(difficulty).search(board, player)?;
    debug!(
        %player,
        %difficulty,
        best_move = %result.best_move,
        score = result.score,
        "move requested"
    );
    Ok(result.best_move)
}

/// Explains why `mv` is a good move for `player` on `board`, the position before the move.
///
/// Fails with [`TicTacToeError::IllegalMove`] if the move cannot be played on `board`.
pub fn explain_move(board: &Board, mv: Move, player: Player) -> Result<String> {
    Ok(explain::explain(board, mv, player)?.text)
}
