//! Static evaluation of positions.
//!
//! Decided positions score `±(WIN_SCORE - depth)` so the search prefers the fastest win and the
//! slowest loss. Undecided positions, reached only when the depth limit cuts the search short,
//! get a point-based heuristic. All weights are fixed tuning constants.

use crate::board::{Board, CENTER, CORNERS, GameOutcome, LINES, Player};

/// Score of a win found at the root of the search.
pub const WIN_SCORE: i32 = 100;

/// Bonus for holding the center cell.
pub const CENTER_WEIGHT: i32 = 3;

/// Bonus for each held corner.
pub const CORNER_WEIGHT: i32 = 2;

/// Bonus for each line holding two of a player's marks and one empty cell.
pub const THREAT_WEIGHT: i32 = 5;

/// Bonus for each line holding one of a player's marks and two empty cells.
pub const OPEN_LINE_WEIGHT: i32 = 2;

/// Scores `board` from `perspective`'s point of view, as seen from the search root.
///
/// Positive values favor `perspective`. The result is antisymmetric:
/// `evaluate(board, X) == -evaluate(board, O)`.
pub fn evaluate(board: &Board, perspective: Player) -> i32 {
    evaluate_at_depth(board, perspective, 0)
}

/// Scores `board` from `perspective`'s point of view, `depth` plies below the search root.
pub fn evaluate_at_depth(board: &Board, perspective: Player, depth: u8) -> i32 {
    match board.winner() {
        GameOutcome::Won(winner) if winner == perspective => WIN_SCORE - i32::from(depth),
        GameOutcome::Won(_) => -WIN_SCORE + i32::from(depth),
        GameOutcome::Draw => 0,
        GameOutcome::InProgress => heuristic(board, perspective),
    }
}

/// Point-based estimate of an undecided position.
pub fn heuristic(board: &Board, perspective: Player) -> i32 {
    let cells = board.cells();
    let weight = |cell: Option<Player>, points: i32| match cell {
        Some(player) if player == perspective => points,
        Some(_) => -points,
        None => 0,
    };

    let mut score = weight(cells[CENTER], CENTER_WEIGHT);

    for corner in CORNERS {
        score += weight(cells[corner], CORNER_WEIGHT);
    }

    for (line, _) in LINES {
        score += score_line(line.map(|index| cells[index]), perspective);
    }

    score
}

fn score_line(line: [Option<Player>; 3], perspective: Player) -> i32 {
    let mine = line.iter().filter(|cell| **cell == Some(perspective)).count();
    let theirs = line
        .iter()
        .filter(|cell| **cell == Some(perspective.opponent()))
        .count();

    match (mine, theirs) {
        (2, 0) => THREAT_WEIGHT,
        (1, 0) => OPEN_LINE_WEIGHT,
        (0, 2) => -THREAT_WEIGHT,
        (0, 1) => -OPEN_LINE_WEIGHT,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    #[test]
    fn empty_board_is_even() {
        assert_eq!(evaluate(&Board::new(), Player::X), 0);
        assert_eq!(evaluate(&Board::new(), Player::O), 0);
    }

    #[test]
    fn center_is_worth_more_than_a_corner() {
        // center: 3 + four open lines
        assert_eq!(evaluate(&board(".../.X./..."), Player::X), 11);
        // corner: 2 + three open lines
        assert_eq!(evaluate(&board("X../.../..."), Player::X), 8);
        assert_eq!(evaluate(&board("X../.../..."), Player::O), -8);
    }

    #[test]
    fn threats_and_open_lines_are_counted_for_both_sides() {
        // X: corner 2, row threat 5, two open lines 4. O: one open line 2.
        assert_eq!(evaluate(&board("XX./O../..."), Player::X), 9);
        assert_eq!(evaluate(&board("XX./O../..."), Player::O), -9);
    }

    #[test]
    fn blocked_lines_score_nothing() {
        assert_eq!(score_line([Some(Player::X), Some(Player::O), None], Player::X), 0);
        assert_eq!(score_line([None, None, None], Player::X), 0);
    }

    #[test]
    fn terminal_scores_shrink_with_depth() {
        let won = board("XXX/OO./...");
        assert_eq!(evaluate_at_depth(&won, Player::X, 0), 100);
        assert_eq!(evaluate_at_depth(&won, Player::X, 3), 97);
        assert_eq!(evaluate_at_depth(&won, Player::O, 3), -97);
    }

    #[test]
    fn draw_scores_zero() {
        let draw = board("XOX/OXX/OXO");
        assert_eq!(evaluate_at_depth(&draw, Player::X, 9), 0);
        assert_eq!(evaluate_at_depth(&draw, Player::O, 9), 0);
    }
}
