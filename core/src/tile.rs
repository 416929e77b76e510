use serde::{Deserialize, Serialize};

/// One grid position. `value` is `-1` for mines, otherwise the number of adjacent mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) value: i8,
    pub(crate) is_mine: bool,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) exploded: bool,
}

impl Cell {
    pub const MINE_VALUE: i8 = -1;

    pub const fn value(&self) -> i8 {
        self.value
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_exploded(&self) -> bool {
        self.exploded
    }

    pub(crate) fn arm(&mut self) {
        self.is_mine = true;
        self.value = Self::MINE_VALUE;
    }
}

/// What the player gets to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    /// A flag on a safe cell, only shown once the game is over.
    WrongFlag,
    Number(u8),
    Mine,
    Exploded,
}
