use crate::board::{Board, Move, Player};
use crate::difficulty::{Difficulty, MAX_DEPTH};
use crate::error::{Result, TicTacToeError};
use crate::evaluate::evaluate_at_depth;
use crate::explain::{MoveCategory, classify};
use tracing::debug;

/// A bound larger than any reachable score. Kept symmetric so it can be negated safely.
pub const SCORE_INFINITY: i32 = i32::MAX;

/// The settings of a [`SearchEngine`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// The maximum number of plies searched below the root, in `1..=9`.
    pub depth_limit: u8,
    /// Whether alpha-beta pruning is used. Disabling it gives plain minimax.
    pub alpha_beta_pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Difficulty::default().into()
    }
}

impl From<Difficulty> for SearchConfig {
    fn from(difficulty: Difficulty) -> Self {
        Self {
            depth_limit: difficulty.depth_limit(),
            alpha_beta_pruning: true,
        }
    }
}

/// Counters collected during a single search.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct SearchStats {
    /// The number of positions visited, the root included.
    pub nodes_evaluated: u64,
    /// The number of times the remaining siblings of a node were skipped.
    pub cutoffs: u64,
}

/// The answer of a search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move.
    pub best_move: Move,
    /// The score of the chosen move, from the searching player's point of view.
    pub score: i32,
    /// The tactical category of the chosen move.
    pub category: Option<MoveCategory>,
    /// Counters collected while searching.
    pub stats: SearchStats,
}

/// A builder for creating instances of [`SearchEngine`].
#[derive(Debug, Clone, Default)]
pub struct SearchEngineBuilder {
    config: SearchConfig,
}

impl SearchEngineBuilder {
    /// Creates a builder for a full-depth search with pruning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the depth limit from a difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.config.depth_limit = difficulty.depth_limit();
        self
    }

    /// Sets the depth limit. Values are clamped to `1..=9`.
    pub fn with_depth_limit(mut self, depth_limit: u8) -> Self {
        self.config.depth_limit = depth_limit;
        self
    }

    /// Enables or disables alpha-beta pruning.
    pub fn with_alpha_beta_pruning(mut self, use_abp: bool) -> Self {
        self.config.alpha_beta_pruning = use_abp;
        self
    }

    /// Builds the [`SearchEngine`].
    pub fn build(self) -> SearchEngine {
        SearchEngine::new(self.config)
    }
}

/// Depth-limited negamax search with optional alpha-beta pruning.
///
/// The engine holds only its configuration, so a single instance can serve any number of
/// positions. Children are expanded in row-major order and the first of several equally
/// good moves wins, which makes every answer reproducible.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    config: SearchConfig,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngineBuilder::new().build()
    }
}

impl From<Difficulty> for SearchEngine {
    fn from(difficulty: Difficulty) -> Self {
        Self::new(difficulty.into())
    }
}

impl SearchEngine {
    /// Returns a new builder for [`SearchEngine`].
    pub fn builder() -> SearchEngineBuilder {
        SearchEngineBuilder::new()
    }

    /// Creates a new engine. The depth limit is clamped to `1..=9`.
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config: SearchConfig {
                depth_limit: config.depth_limit.clamp(1, MAX_DEPTH),
                ..config
            },
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn depth_limit(&self) -> u8 {
        self.config.depth_limit
    }

    /// Finds the best move for `player` on `board`.
    ///
    /// Fails with [`TicTacToeError::NoMovesAvailable`] if the game is already decided.
    pub fn search(&self, board: &Board, player: Player) -> Result<SearchResult> {
        if board.is_terminal() {
            return Err(TicTacToeError::NoMovesAvailable);
        }

        let mut stats = SearchStats::default();
        let (score, best_move) = self.negamax(
            board,
            player,
            0,
            -SCORE_INFINITY,
            SCORE_INFINITY,
            &mut stats,
        );
        let best_move = best_move.ok_or(TicTacToeError::NoMovesAvailable)?;
        let category = classify(board, best_move, player).ok();

        debug!(
            %player,
            %best_move,
            score,
            depth_limit = self.config.depth_limit,
            nodes = stats.nodes_evaluated,
            cutoffs = stats.cutoffs,
            "search finished"
        );

        Ok(SearchResult {
            best_move,
            score,
            category,
            stats,
        })
    }

    /// Scores `board` for `player`, who is about to move `depth` plies below the root.
    ///
    /// Returns the score and, unless the node is a leaf, the move achieving it.
    pub(crate) fn negamax(
        &self,
        board: &Board,
        player: Player,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        stats: &mut SearchStats,
    ) -> (i32, Option<Move>) {
        stats.nodes_evaluated += 1;

        if depth >= self.config.depth_limit || board.is_terminal() {
            return (evaluate_at_depth(board, player, depth), None);
        }

        let mut best_score = -SCORE_INFINITY;
        let mut best_move = None;
        for (index, cell) in board.cells().iter().enumerate() {
            if cell.is_some() {
                continue;
            }

            let child = board.with_cell(index, player);
            let (child_score, _) =
                self.negamax(&child, player.opponent(), depth + 1, -beta, -alpha, stats);
            let score = -child_score;

            if score > best_score {
                best_score = score;
                best_move = Move::from_index(index);
            }

            if self.config.alpha_beta_pruning {
                alpha = alpha.max(score);
                if alpha >= beta {
                    stats.cutoffs += 1;
                    break;
                }
            }
        }

        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().expect("valid board")
    }

    fn engine(difficulty: Difficulty) -> SearchEngine {
        SearchEngine::builder().with_difficulty(difficulty).build()
    }

    #[test]
    fn empty_board_is_a_draw_and_picks_the_first_corner() {
        // arrange
        let engine = SearchEngine::default();

        // act
        let result = engine.search(&Board::new(), Player::O).unwrap();

        // assert
        assert_eq!(result.best_move, Move::new(0, 0));
        assert_eq!(result.score, 0);
        assert!(result.stats.nodes_evaluated > 1);
    }

    #[test]
    fn takes_an_immediate_win_at_every_difficulty() {
        let board = board("X../..X/OO.");
        for difficulty in Difficulty::ALL {
            let result = engine(difficulty).search(&board, Player::O).unwrap();
            assert_eq!(result.best_move, Move::new(2, 2), "{difficulty}");
            assert_eq!(result.score, 99, "{difficulty}");
            assert_eq!(result.category, Some(MoveCategory::Winning));
        }
    }

    #[test]
    fn blocks_an_immediate_loss_at_every_difficulty() {
        let board = board("XX./O../...");
        for difficulty in Difficulty::ALL {
            let result = engine(difficulty).search(&board, Player::O).unwrap();
            assert_eq!(result.best_move, Move::new(0, 2), "{difficulty}");
            assert_eq!(result.category, Some(MoveCategory::Blocking));
        }
    }

    #[test]
    fn prefers_own_win_over_blocking() {
        let board = board("XX./OO./...");
        let result = SearchEngine::default().search(&board, Player::O).unwrap();
        assert_eq!(result.best_move, Move::new(1, 2));
        assert_eq!(result.score, 99);
    }

    #[test]
    fn prefers_the_fastest_win() {
        // X can win now at (0,2) or set up a later win elsewhere.
        let board = board("XX./OO./X.O");
        let result = SearchEngine::default().search(&board, Player::X).unwrap();
        assert_eq!(result.best_move, Move::new(0, 2));
        assert_eq!(result.score, 99);
    }

    #[test]
    fn lost_positions_delay_the_loss() {
        // O cannot stop both X threats; it should still block one of them.
        let board = board("X.X/.O./X.O");
        let result = SearchEngine::default().search(&board, Player::O).unwrap();
        assert_eq!(result.score, -98);
        assert!(result.best_move == Move::new(0, 1) || result.best_move == Move::new(1, 0));
    }

    #[test]
    fn terminal_boards_have_no_moves() {
        let engine = SearchEngine::default();
        assert_eq!(
            engine.search(&board("XOX/OXX/OXO"), Player::X),
            Err(TicTacToeError::NoMovesAvailable)
        );
        assert_eq!(
            engine.search(&board("XXX/OO./..."), Player::O),
            Err(TicTacToeError::NoMovesAvailable)
        );
    }

    #[test]
    fn pruning_visits_fewer_nodes_with_the_same_answer() {
        // arrange
        let pruned = SearchEngine::default();
        let plain = SearchEngine::builder().with_alpha_beta_pruning(false).build();

        // act
        let pruned_result = pruned.search(&Board::new(), Player::X).unwrap();
        let plain_result = plain.search(&Board::new(), Player::X).unwrap();

        // assert
        assert_eq!(pruned_result.best_move, plain_result.best_move);
        assert_eq!(pruned_result.score, plain_result.score);
        assert_eq!(plain_result.stats.cutoffs, 0);
        assert!(pruned_result.stats.cutoffs > 0);
        assert!(pruned_result.stats.nodes_evaluated < plain_result.stats.nodes_evaluated);
    }

    #[test]
    fn unpruned_full_search_visits_every_game_prefix() {
        let plain = SearchEngine::builder().with_alpha_beta_pruning(false).build();
        let result = plain.search(&Board::new(), Player::X).unwrap();
        // Every legal move sequence of a game, the empty one included.
        assert_eq!(result.stats.nodes_evaluated, 549_946);
    }

    #[test]
    fn depth_limit_is_clamped() {
        assert_eq!(SearchEngine::builder().with_depth_limit(0).build().depth_limit(), 1);
        assert_eq!(SearchEngine::builder().with_depth_limit(42).build().depth_limit(), 9);
        assert_eq!(engine(Difficulty::Medium).depth_limit(), 4);
    }

    #[test]
    fn depth_one_search_scores_children_heuristically() {
        let engine = SearchEngine::builder().with_depth_limit(1).build();
        let result = engine.search(&Board::new(), Player::X).unwrap();
        // The center is worth 3 plus four open lines.
        assert_eq!(result.best_move, Move::new(1, 1));
        assert_eq!(result.score, 11);
        assert_eq!(result.stats.nodes_evaluated, 10);
    }
}
