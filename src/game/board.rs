use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Player;
use crate::error::{BoardError, MoveError};

pub const STANDARD_ROWS: usize = 6;
pub const STANDARD_COLS: usize = 7;

/// A board cell: a player's piece, or `None` when empty.
pub type Cell = Option<Player>;

/// A (row, column) pair. Row 0 is the top, the last row is the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovePosition {
    pub row: usize,
    pub col: usize,
}

impl MovePosition {
    pub const fn new(row: usize, col: usize) -> Self {
        MovePosition { row, col }
    }
}

impl fmt::Display for MovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(row {}, col {})", self.row, self.col)
    }
}

/// Rectangular gravity board, fixed size for its lifetime.
///
/// Every constructor enforces the gravity invariant: no piece has an empty
/// cell beneath it. `apply_move` relies on callers passing positions from
/// `available_moves` and does not re-check it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(width: usize, height: usize) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyBoard { width, height });
        }
        Ok(Board {
            width,
            height,
            cells: vec![None; width * height],
        })
    }

    /// Create an empty 7x6 board
    pub fn standard() -> Self {
        Board {
            width: STANDARD_COLS,
            height: STANDARD_ROWS,
            cells: vec![None; STANDARD_COLS * STANDARD_ROWS],
        }
    }

    /// Build a board from rows listed top to bottom.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, BoardError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(BoardError::EmptyBoard { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row, cols) in rows.into_iter().enumerate() {
            if cols.len() != width {
                return Err(BoardError::RaggedRow {
                    row,
                    expected: width,
                    found: cols.len(),
                });
            }
            cells.extend(cols);
        }

        let board = Board {
            width,
            height,
            cells,
        };
        board.check_gravity()?;
        Ok(board)
    }

    fn check_gravity(&self) -> Result<(), BoardError> {
        for col in 0..self.width {
            let mut seen_empty = false;
            for row in (0..self.height).rev() {
                match self.get(row, col) {
                    None => seen_empty = true,
                    Some(_) if seen_empty => return Err(BoardError::FloatingPiece { row, col }),
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    pub fn at(&self, pos: MovePosition) -> Cell {
        self.get(pos.row, pos.col)
    }

    /// Step `k` times along `(dr, dc)` from `pos`, or `None` if that leaves the board
    pub fn offset(&self, pos: MovePosition, (dr, dc): (isize, isize), k: isize) -> Option<MovePosition> {
        let row = pos.row as isize + dr * k;
        let col = pos.col as isize + dc * k;
        if row < 0 || col < 0 || row >= self.height as isize || col >= self.width as isize {
            return None;
        }
        Some(MovePosition::new(row as usize, col as usize))
    }

    /// True if a piece dropped now could land on `pos`: the cell is empty and
    /// sits on the bottom row or on top of an occupied cell.
    pub fn is_playable(&self, pos: MovePosition) -> bool {
        self.at(pos).is_none() && (pos.row + 1 == self.height || self.get(pos.row + 1, pos.col).is_some())
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.width {
            return true;
        }
        self.get(0, col).is_some()
    }

    /// Row a piece dropped into `col` would land in
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height).rev().find(|&row| self.get(row, col).is_none())
    }

    /// One landing cell per open column, left to right.
    pub fn available_moves(&self) -> Vec<MovePosition> {
        (0..self.width)
            .filter_map(|col| self.landing_row(col).map(|row| MovePosition::new(row, col)))
            .collect()
    }

    /// Return a copy of the board with `player` placed at `pos`.
    pub fn apply_move(&self, pos: MovePosition, player: Player) -> Board {
        let mut next = self.clone();
        next.cells[pos.row * self.width + pos.col] = Some(player);
        next
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.width {
            return Err(MoveError::InvalidColumn {
                col,
                width: self.width,
            });
        }
        let row = self.landing_row(col).ok_or(MoveError::ColumnFull(col))?;
        self.cells[row * self.width + col] = Some(player);
        Ok(row)
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..self.width).all(|col| self.is_column_full(col))
    }

    /// All positions, row-major from the top-left
    pub fn positions(&self) -> impl Iterator<Item = MovePosition> + '_ {
        (0..self.height).flat_map(move |row| (0..self.width).map(move |col| MovePosition::new(row, col)))
    }

    /// Positions holding `player`'s pieces
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = MovePosition> + '_ {
        self.positions().filter(move |&pos| self.at(pos) == Some(player))
    }

    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// The two most-central columns. On odd widths both are the middle column.
    pub fn central_columns(&self) -> (usize, usize) {
        ((self.width - 1) / 2, self.width / 2)
    }

    pub fn is_center_column(&self, col: usize) -> bool {
        let (lo, hi) = self.central_columns();
        col == lo || col == hi
    }

    /// Columns immediately beside the central ones
    pub fn is_beside_center(&self, col: usize) -> bool {
        let (lo, hi) = self.central_columns();
        (lo > 0 && col == lo - 1) || col == hi + 1
    }

    pub fn is_edge_column(&self, col: usize) -> bool {
        col == 0 || col + 1 == self.width
    }

    /// Number of the 8 surrounding cells holding `player`'s pieces
    pub fn neighbors_of(&self, pos: MovePosition, player: Player) -> usize {
        const AROUND: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        AROUND
            .iter()
            .filter_map(|&step| self.offset(pos, step, 1))
            .filter(|&p| self.at(p) == Some(player))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let ch = self.get(row, col).map_or('.', Player::symbol);
                write!(f, "{ch}")?;
            }
            if row + 1 < self.height {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Parses rows top to bottom, separated by whitespace or newlines.
/// `.`, `-` and `_` are empty; `X`/`R` and `O`/`Y` are pieces.
impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split_whitespace()
            .enumerate()
            .map(|(row, line)| {
                line.chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        '.' | '-' | '_' => Ok(None),
                        _ => Player::from_symbol(ch)
                            .map(Some)
                            .ok_or(BoardError::UnknownCell { ch, row, col }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::from_rows(rows)
    }
}
