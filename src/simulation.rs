//! Plays complete games between move sources.
//!
//! Used to check that the engine never loses and to gather timing and node statistics.

use crate::board::{Board, GameOutcome, Move, Player};
use crate::error::{Result, TicTacToeError};
use crate::random::RandomGenerator;
use crate::search::SearchEngine;
use tracing::{debug, trace};

/// Anything that can pick a move for a position.
pub trait Opponent {
    /// Picks a legal move for `player` on `board`.
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move>;
}

impl Opponent for SearchEngine {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Move> {
        Ok(self.search(board, player)?.best_move)
    }
}

/// Plays uniformly random legal moves.
#[derive(Debug, Default, Clone)]
pub struct RandomOpponent<K: RandomGenerator> {
    random: K,
}

impl<K: RandomGenerator> RandomOpponent<K> {
    pub fn new(random: K) -> Self {
        Self { random }
    }
}

impl<K: RandomGenerator> Opponent for RandomOpponent<K> {
    fn choose_move(&mut self, board: &Board, _player: Player) -> Result<Move> {
        let moves = board.legal_moves();
        self.random
            .choose(&moves)
            .copied()
            .ok_or(TicTacToeError::NoMovesAvailable)
    }
}

/// Always plays the first empty cell in row-major order.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstAvailableOpponent;

impl Opponent for FirstAvailableOpponent {
    fn choose_move(&mut self, board: &Board, _player: Player) -> Result<Move> {
        board
            .legal_moves()
            .first()
            .copied()
            .ok_or(TicTacToeError::NoMovesAvailable)
    }
}

/// The record of a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    /// Every move, in order, with the player who made it.
    pub moves: Vec<(Player, Move)>,
    /// The final position.
    pub board: Board,
    /// How the game ended.
    pub outcome: GameOutcome,
}

/// Plays a game from the empty board, X moving first.
pub fn play_game(x: &mut impl Opponent, o: &mut impl Opponent) -> Result<GameRecord> {
    play_from(Board::new(), x, o)
}

/// Plays a game to the end from `board`, starting with the conventional side to move.
pub fn play_from(
    mut board: Board,
    x: &mut impl Opponent,
    o: &mut impl Opponent,
) -> Result<GameRecord> {
    let mut moves = Vec::new();
    let mut player = board.next_player();

    while !board.is_terminal() {
        let mv = match player {
            Player::X => x.choose_move(&board, player)?,
            Player::O => o.choose_move(&board, player)?,
        };
        board = board.apply(mv, player)?;
        trace!(%player, %mv, "played");
        moves.push((player, mv));
        player = player.opponent();
    }

    let outcome = board.winner();
    debug!(?outcome, plies = moves.len(), "game finished");

    Ok(GameRecord {
        moves,
        board,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::random::SeededGenerator;

    #[test]
    fn self_play_is_a_draw() {
        let mut x = SearchEngine::default();
        let mut o = SearchEngine::default();

        let record = play_game(&mut x, &mut o).unwrap();

        assert_eq!(record.outcome, GameOutcome::Draw);
        assert_eq!(record.moves.len(), 9);
        assert_eq!(record.moves[0], (Player::X, Move::new(0, 0)));
    }

    #[test]
    fn beats_the_first_available_opponent() {
        // X always fills the next cell: (0,0), (0,1), ...
        let mut human = FirstAvailableOpponent;
        let mut ai = SearchEngine::from(Difficulty::Hard);

        let record = play_game(&mut human, &mut ai).unwrap();

        assert_eq!(record.outcome, GameOutcome::Won(Player::O));
    }

    #[test]
    fn hard_engine_never_loses_to_random_play() {
        let mut random = RandomOpponent::new(SeededGenerator::new(7));
        let mut ai = SearchEngine::default();

        for _ in 0..50 {
            let as_o = play_game(&mut random, &mut ai).unwrap();
            assert_ne!(as_o.outcome, GameOutcome::Won(Player::X), "{:?}", as_o.moves);

            let as_x = play_game(&mut ai, &mut random).unwrap();
            assert_ne!(as_x.outcome, GameOutcome::Won(Player::O), "{:?}", as_x.moves);
        }
    }

    #[test]
    fn seeded_games_replay_exactly() {
        let mut first = RandomOpponent::new(SeededGenerator::new(99));
        let mut second = RandomOpponent::new(SeededGenerator::new(99));
        let mut ai = SearchEngine::from(Difficulty::Easy);

        let a = play_game(&mut first, &mut ai).unwrap();
        let b = play_game(&mut second, &mut ai).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn play_from_a_midgame_position() {
        let board: Board = "XX./O../...".parse().unwrap();
        let mut x = SearchEngine::default();
        let mut o = SearchEngine::default();

        let record = play_from(board, &mut x, &mut o).unwrap();

        assert_eq!(record.moves[0], (Player::O, Move::new(0, 2)));
        assert!(record.outcome.is_decided());
    }

    #[test]
    fn a_finished_game_records_no_moves() {
        let board: Board = "XOX/OXX/OXO".parse().unwrap();
        let record = play_from(board, &mut FirstAvailableOpponent, &mut FirstAvailableOpponent)
            .unwrap();
        assert!(record.moves.is_empty());
        assert_eq!(record.outcome, GameOutcome::Draw);
    }
}
