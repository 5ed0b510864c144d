use crate::error::{IllegalMoveReason, Result, TicTacToeError};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// The number of cells on the board.
pub const NUM_CELLS: usize = 9;

/// The side length of the board.
pub const BOARD_SIZE: usize = 3;

/// Cell indexes of the four corners, in row-major order.
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Cell index of the center.
pub const CENTER: usize = 4;

/// Every line that wins the game, with the kind of line it is.
///
/// Cell indexes are row-major:
///
/// ```text
/// 0 | 1 | 2
/// 3 | 4 | 5
/// 6 | 7 | 8
/// ```
pub(crate) const LINES: [([usize; 3], LineKind); 8] = [
    ([0, 1, 2], LineKind::Row),
    ([3, 4, 5], LineKind::Row),
    ([6, 7, 8], LineKind::Row),
    ([0, 3, 6], LineKind::Column),
    ([1, 4, 7], LineKind::Column),
    ([2, 5, 8], LineKind::Column),
    ([0, 4, 8], LineKind::Diagonal),
    ([2, 4, 6], LineKind::AntiDiagonal),
];

/// One of the two sides of the game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Returns the other player.
    #[must_use]
    pub fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    /// The character used to draw this player's mark.
    pub fn mark(self) -> char {
        match self {
            Self::X => 'X',
            Self::O => 'O',
        }
    }

    /// Try to parse a [`Player`] from a [`char`].
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            'x' | 'X' => Ok(Self::X),
            'o' | 'O' => Ok(Self::O),
            c => Err(TicTacToeError::InvalidPlayer(c)),
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.mark())
    }
}

impl FromStr for Player {
    type Err = TicTacToeError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            (Some(c), Some(_)) => Err(TicTacToeError::InvalidPlayer(c)),
            _ => Err(TicTacToeError::InvalidPlayer(' ')),
        }
    }
}

/// A cell coordinate, 0-indexed from the top left corner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// Creates a move. The coordinates are only checked when the move is applied.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Creates a move from a row-major cell index.
    ///
    /// Returns `None` if `index >= 9`.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < NUM_CELLS).then(|| Self::new(index / BOARD_SIZE, index % BOARD_SIZE))
    }

    /// Returns the row-major cell index, or `None` if the move is off the board.
    pub fn index(self) -> Option<usize> {
        (self.row < BOARD_SIZE && self.col < BOARD_SIZE).then(|| self.row * BOARD_SIZE + self.col)
    }

    /// Returns the 1-based position (1..=9) shown to humans, or `None` if the move is off the board.
    pub fn position(self) -> Option<usize> {
        self.index().map(|index| index + 1)
    }

    pub fn is_center(self) -> bool {
        self.index() == Some(CENTER)
    }

    pub fn is_corner(self) -> bool {
        self.index().is_some_and(|index| CORNERS.contains(&index))
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The state of a game.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOutcome {
    /// The game is still ongoing.
    InProgress,
    /// The given player completed a line.
    Won(Player),
    /// The board is full and nobody completed a line.
    Draw,
}

impl GameOutcome {
    /// Returns true if the game is over.
    pub fn is_decided(self) -> bool {
        self != Self::InProgress
    }

    /// Returns the winning player, if there is one.
    pub fn winner(self) -> Option<Player> {
        match self {
            Self::Won(player) => Some(player),
            Self::InProgress | Self::Draw => None,
        }
    }
}

/// The kind of a winning line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LineKind {
    Row,
    Column,
    Diagonal,
    AntiDiagonal,
}

/// A completed line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WinningLine {
    /// The player owning the line.
    pub player: Player,
    /// The cells of the line, sorted from least to greatest index.
    pub cells: [Move; 3],
    /// The kind of line.
    pub kind: LineKind,
}

/// A 3×3 tic-tac-toe board.
///
/// The board is a small `Copy` value: every operation that changes it returns a new board,
/// so speculative exploration never shares state between branches.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    cells: [Option<Player>; NUM_CELLS],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a board from rows of cells.
    ///
    /// Fails if the mark counts could not come from a game where X moves first.
    pub fn from_rows(rows: [[Option<Player>; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut cells = [None; NUM_CELLS];
        for (row, values) in rows.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                cells[row * BOARD_SIZE + col] = *value;
            }
        }
        Self::from_cells(cells)
    }

    /// Creates a board from row-major cells.
    ///
    /// Fails if the mark counts could not come from a game where X moves first.
    pub fn from_cells(cells: [Option<Player>; NUM_CELLS]) -> Result<Self> {
        let board = Self { cells };
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);
        if x_count != o_count && x_count != o_count + 1 {
            return Err(TicTacToeError::InvalidBoard(format!(
                "{x_count} X marks and {o_count} O marks cannot come from a game where X moves first"
            )));
        }
        Ok(board)
    }

    /// Returns the row-major cells.
    pub fn cells(&self) -> &[Option<Player>; NUM_CELLS] {
        &self.cells
    }

    /// Returns the mark at the given cell, or `None` if it is empty or off the board.
    pub fn get(&self, mv: Move) -> Option<Player> {
        mv.index().and_then(|index| self.cells[index])
    }

    /// Returns the number of marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|cell| **cell == Some(player)).count()
    }

    /// Returns the number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Returns true if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns the player who moves next, assuming X moved first.
    pub fn next_player(&self) -> Player {
        if self.count(Player::X) > self.count(Player::O) {
            Player::O
        } else {
            Player::X
        }
    }

    /// Returns every empty cell in row-major order.
    ///
    /// The order is fixed so that searches, pruning and tie-breaks are reproducible.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .filter_map(|(index, _)| Move::from_index(index))
            .collect()
    }

    /// Places `player`'s mark on the cell and returns the resulting board.
    ///
    /// Turn order is not checked: the engine may speculatively play either side.
    pub fn apply(&self, mv: Move, player: Player) -> Result<Self> {
        let index = mv.index().ok_or(TicTacToeError::IllegalMove {
            row: mv.row,
            col: mv.col,
            reason: IllegalMoveReason::OutOfRange,
        })?;
        if self.cells[index].is_some() {
            return Err(TicTacToeError::IllegalMove {
                row: mv.row,
                col: mv.col,
                reason: IllegalMoveReason::Occupied,
            });
        }

        Ok(self.with_cell(index, player))
    }

    /// Sets a cell that is known to be empty.
    pub(crate) fn with_cell(&self, index: usize, player: Player) -> Self {
        let mut cells = self.cells;
        cells[index] = Some(player);
        Self { cells }
    }

    /// Returns the current outcome of the game.
    pub fn winner(&self) -> GameOutcome {
        if let Some(line) = self.winning_line() {
            return GameOutcome::Won(line.player);
        }

        if self.is_full() {
            GameOutcome::Draw
        } else {
            GameOutcome::InProgress
        }
    }

    /// Returns true if the game is decided, either by a win or a draw.
    pub fn is_terminal(&self) -> bool {
        self.winner().is_decided()
    }

    /// Returns true if `player` owns a complete line.
    pub fn has_won(&self, player: Player) -> bool {
        LINES
            .iter()
            .any(|(line, _)| line.iter().all(|&index| self.cells[index] == Some(player)))
    }

    /// Returns the first completed line in scan order, if any.
    pub fn winning_line(&self) -> Option<WinningLine> {
        LINES.iter().find_map(|&(line, kind)| {
            let player = self.cells[line[0]]?;
            if self.cells[line[1]] != Some(player) || self.cells[line[2]] != Some(player) {
                return None;
            }

            let mut cells = [Move::new(0, 0); 3];
            for (cell, index) in cells.iter_mut().zip(line) {
                *cell = Move::from_index(index)?;
            }
            Some(WinningLine { player, cells, kind })
        })
    }

    /// Encodes the board as a base-3 number, one digit per cell (0 empty, 1 X, 2 O).
    ///
    /// Distinct boards always have distinct encodings.
    pub fn encode(&self) -> u16 {
        self.cells.iter().rev().fold(0, |acc, cell| {
            let digit = match cell {
                None => 0,
                Some(Player::X) => 1,
                Some(Player::O) => 2,
            };
            acc * 3 + digit
        })
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rows: Vec<String> = self
            .cells
            .chunks(BOARD_SIZE)
            .map(|row| row.iter().map(|cell| cell_char(*cell)).collect())
            .collect();
        write!(f, "Board({})", rows.join("/"))
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells {
                write!(f, "{}", cell_char(*cell))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = TicTacToeError;

    /// Parses nine cells written as `X`, `O` and `.` (`-` and `_` also mean empty).
    ///
    /// Whitespace, `/` and `|` are ignored, so `"XX./OO./..."` and a three line grid both work.
    fn from_str(s: &str) -> Result<Self> {
        let mut cells = [None; NUM_CELLS];
        let mut count = 0;
        for c in s.chars() {
            let cell = match c {
                c if c.is_whitespace() || c == '/' || c == '|' => continue,
                '.' | '-' | '_' => None,
                c => Some(Player::from_char(c).map_err(|_| {
                    TicTacToeError::InvalidBoard(format!("unexpected character '{c}'"))
                })?),
            };
            if count >= NUM_CELLS {
                return Err(TicTacToeError::InvalidBoard(format!(
                    "more than {NUM_CELLS} cells"
                )));
            }
            cells[count] = cell;
            count += 1;
        }

        if count != NUM_CELLS {
            return Err(TicTacToeError::InvalidBoard(format!(
                "expected {NUM_CELLS} cells, found {count}"
            )));
        }

        Self::from_cells(cells)
    }
}

fn cell_char(cell: Option<Player>) -> char {
    cell.map_or('.', Player::mark)
}
