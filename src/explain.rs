//! Human-readable rationales for moves.
//!
//! The category of a move is re-derived from the position alone, after the search has already
//! picked it, so nothing in here can change which move gets played.

use crate::board::{Board, Move, Player};
use crate::error::Result;
use std::fmt::Display;

/// The tactical reason behind a move, in order of precedence.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveCategory {
    /// The move completes a line for the mover.
    Winning,
    /// The opponent would have completed a line on this cell.
    Blocking,
    /// The move takes the center.
    CenterControl,
    /// The move takes a corner.
    CornerControl,
    /// Anything else.
    Positional,
}

impl Display for MoveCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Winning => "winning",
            Self::Blocking => "blocking",
            Self::CenterControl => "center control",
            Self::CornerControl => "corner control",
            Self::Positional => "positional",
        };
        f.write_str(name)
    }
}

/// A classified move together with its rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub category: MoveCategory,
    pub text: String,
}

impl Display for Explanation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Classifies `mv` played by `player` on `board`, the position before the move.
///
/// Fails if the move is not legal on `board`.
pub fn classify(board: &Board, mv: Move, player: Player) -> Result<MoveCategory> {
    let after = board.apply(mv, player)?;
    if after.has_won(player) {
        return Ok(MoveCategory::Winning);
    }

    let opponent = player.opponent();
    if board.apply(mv, opponent)?.has_won(opponent) {
        return Ok(MoveCategory::Blocking);
    }

    let category = if mv.is_center() {
        MoveCategory::CenterControl
    } else if mv.is_corner() {
        MoveCategory::CornerControl
    } else {
        MoveCategory::Positional
    };
    Ok(category)
}

/// Classifies `mv` and writes a rationale for it in the first person.
pub fn explain(board: &Board, mv: Move, player: Player) -> Result<Explanation> {
    let category = classify(board, mv, player)?;
    // classify already rejected off-board moves
    let position = mv.position().unwrap_or_default();

    let text = match category {
        MoveCategory::Winning => format!(
            "I placed {player} at position {position} to complete three in a row and win the game."
        ),
        MoveCategory::Blocking => format!(
            "I took position {position} to block you: {} there would have completed three in a row.",
            player.opponent()
        ),
        MoveCategory::CenterControl => format!(
            "I took the center (position {position}). It sits on four lines, more than any other cell."
        ),
        MoveCategory::CornerControl => format!(
            "I took the corner at position {position}. Each corner sits on three lines."
        ),
        MoveCategory::Positional => format!(
            "I placed {player} at position {position} to keep up the pressure and prepare future lines."
        ),
    };

    Ok(Explanation { category, text })
}
