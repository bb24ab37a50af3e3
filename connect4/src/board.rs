//! Column-major Connect 4 rack with gravity: discs stack from row 0 upward.
use serde::{Deserialize, Serialize};

use crate::GameError;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = GameError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(GameError::InvalidPlayer(other)),
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.id()
    }
}

/// `None` is an empty slot.
pub type Cell = Option<Player>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(columns: usize, rows: usize) -> Self {
        debug_assert!(columns >= 1 && rows >= 1, "board needs at least one cell");
        Self {
            columns,
            rows,
            cells: vec![None; columns * rows],
        }
    }

    /// Builds a board from a column-major grid of ids (0 empty, 1 or 2 owned).
    pub fn from_rack(rack: &[Vec<u8>]) -> Result<Self, GameError> {
        let rows = rack.first().map(Vec::len).unwrap_or(0);
        if rows == 0 {
            return Err(GameError::EmptyBoard);
        }
        let mut board = Self::new(rack.len(), rows);
        for (column, slots) in rack.iter().enumerate() {
            if slots.len() != rows {
                return Err(GameError::RaggedBoard {
                    column,
                    expected: rows,
                    found: slots.len(),
                });
            }
            let mut seen_empty = false;
            for (row, &value) in slots.iter().enumerate() {
                let cell = match value {
                    0 => None,
                    1 | 2 => Some(Player::try_from(value)?),
                    _ => return Err(GameError::InvalidCell { column, row, value }),
                };
                match cell {
                    None => seen_empty = true,
                    Some(_) if seen_empty => {
                        return Err(GameError::FloatingDisc { column, row });
                    }
                    Some(_) => {}
                }
                board.set(column, row, cell);
            }
        }
        Ok(board)
    }

    pub fn to_rack(&self) -> Vec<Vec<u8>> {
        (0..self.columns)
            .map(|col| {
                (0..self.rows)
                    .map(|row| self.get(col, row).map_or(0, Player::id))
                    .collect()
            })
            .collect()
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.cells[self.index(col, row)]
    }

    #[inline]
    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        let idx = self.index(col, row);
        self.cells[idx] = cell;
    }

    /// A column has room while its top slot is empty.
    pub fn has_room(&self, col: usize) -> bool {
        self.get(col, self.rows - 1).is_none()
    }

    pub fn is_full(&self) -> bool {
        (0..self.columns).all(|col| !self.has_room(col))
    }

    /// Drops `player`'s disc into `col`. Returns false, leaving the board
    /// untouched, when the column is full.
    pub fn simulate_move(&mut self, col: usize, player: Player) -> bool {
        if !self.has_room(col) {
            return false;
        }
        match (0..self.rows).find(|&row| self.get(col, row).is_none()) {
            Some(row) => {
                self.set(col, row, Some(player));
                true
            }
            None => false,
        }
    }

    /// Lifts the topmost disc out of `col`. Returns false if the column is empty.
    pub fn revert_move(&mut self, col: usize) -> bool {
        match (0..self.rows).rev().find(|&row| self.get(col, row).is_some()) {
            Some(row) => {
                self.set(col, row, None);
                true
            }
            None => false,
        }
    }

    #[inline]
    fn index(&self, col: usize, row: usize) -> usize {
        debug_assert!(col < self.columns, "column {col} is out of bounds");
        debug_assert!(row < self.rows, "row {row} is out of bounds");
        col * self.rows + row
    }
}
