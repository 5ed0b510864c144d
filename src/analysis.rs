use crate::board::{Board, GameOutcome, Move, Player};
use crate::error::{Result, TicTacToeError};
use crate::search::{SCORE_INFINITY, SearchEngine, SearchStats};
use ego_tree::{NodeMut, NodeRef, Tree};

/// A single position in an [`Analysis`] tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisNode {
    /// The number of plies between the analysed position and this one.
    pub height: u8,
    /// The position this node represents.
    pub board: Board,
    /// The move that led to this position from its parent. `None` for the root node.
    pub prev_move: Option<Move>,
    /// The player whose turn it is in this position.
    pub current_player: Player,
    /// The outcome of the game at this position.
    pub outcome: GameOutcome,
    /// The value of `prev_move` for the player who made it. `None` for the root node.
    pub score: Option<i32>,
}

impl AnalysisNode {
    fn new(height: u8, board: Board, prev_move: Option<Move>, current_player: Player) -> Self {
        Self {
            height,
            board,
            prev_move,
            current_player,
            outcome: board.winner(),
            score: None,
        }
    }

    /// The player who made `prev_move`.
    pub fn mover(&self) -> Option<Player> {
        self.prev_move.map(|_| self.current_player.opponent())
    }
}

/// Exact scores for every move of a position, each followed by its principal variation.
///
/// The root holds the analysed position. Its children are the legal moves in row-major order,
/// and below every child hangs the line of best replies down to the depth limit or the end of
/// the game.
#[derive(Debug, Clone)]
pub struct Analysis {
    tree: Tree<AnalysisNode>,
    stats: SearchStats,
}

impl Analysis {
    /// Returns an immutable reference to the underlying tree.
    pub fn tree(&self) -> &Tree<AnalysisNode> {
        &self.tree
    }

    /// Returns the root node of the tree.
    pub fn root(&self) -> NodeRef<'_, AnalysisNode> {
        self.tree.root()
    }

    /// Counters accumulated over every search run while building the tree.
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Returns every legal move of the root position with its score.
    pub fn move_scores(&self) -> Vec<(Move, i32)> {
        self.root()
            .children()
            .filter_map(|child| {
                let value = child.value();
                Some((value.prev_move?, value.score?))
            })
            .collect()
    }

    /// Returns the first move with the highest score, the same move a search would pick.
    pub fn best_move(&self) -> Option<(Move, i32)> {
        self.move_scores()
            .into_iter()
            .fold(None, |best, (mv, score)| match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((mv, score)),
            })
    }

    /// Returns `mv` followed by the best replies of both sides.
    ///
    /// Returns an empty line if `mv` is not a legal move of the root position.
    pub fn principal_variation(&self, mv: Move) -> Vec<Move> {
        let mut line = Vec::new();
        let mut current = self
            .root()
            .children()
            .find(|child| child.value().prev_move == Some(mv));

        while let Some(node) = current {
            if let Some(prev_move) = node.value().prev_move {
                line.push(prev_move);
            }
            current = node.first_child();
        }

        line
    }
}

/// Analyses every legal move `player` has on `board` with the given engine.
///
/// Fails with [`TicTacToeError::NoMovesAvailable`] if the game is already decided.
pub fn analyze(engine: &SearchEngine, board: &Board, player: Player) -> Result<Analysis> {
    if board.is_terminal() {
        return Err(TicTacToeError::NoMovesAvailable);
    }

    let mut stats = SearchStats::default();
    let mut tree = Tree::new(AnalysisNode::new(0, *board, None, player));
    let mut root = tree.root_mut();

    for mv in board.legal_moves() {
        let child_board = board.apply(mv, player)?;
        let mut child = root.append(AnalysisNode::new(
            1,
            child_board,
            Some(mv),
            player.opponent(),
        ));
        let reply_score =
            append_variation(engine, &mut child, &child_board, player.opponent(), 1, &mut stats);
        child.value().score = Some(-reply_score);
    }

    Ok(Analysis { tree, stats })
}

/// Searches `board` and appends the best move below `parent`, recursively.
///
/// Returns the score of `board` for `player`.
fn append_variation(
    engine: &SearchEngine,
    parent: &mut NodeMut<'_, AnalysisNode>,
    board: &Board,
    player: Player,
    depth: u8,
    stats: &mut SearchStats,
) -> i32 {
    let (score, best_move) =
        engine.negamax(board, player, depth, -SCORE_INFINITY, SCORE_INFINITY, stats);
    let Some(next) = best_move.and_then(|mv| Some((mv, board.apply(mv, player).ok()?))) else {
        return score;
    };

    let (mv, next_board) = next;
    let mut node = AnalysisNode::new(depth + 1, next_board, Some(mv), player.opponent());
    node.score = Some(score);
    let mut child = parent.append(node);
    append_variation(engine, &mut child, &next_board, player.opponent(), depth + 1, stats);

    score
}
