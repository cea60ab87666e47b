use serde::{Deserialize, Serialize};

/// State of one board position.
///
/// `mine` stays `None` until the lazy generation pass decides the cell, and
/// stays `None` forever for cells inside the safe opening around the first
/// click, which are never eligible to hold a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) mine: Option<bool>,
    pub(crate) adjacent_mines: u8,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        matches!(self.mine, Some(true))
    }

    pub const fn mine(&self) -> Option<bool> {
        self.mine
    }

    /// Number of mine-bearing neighbors; meaningless for mine cells.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Meaningless once the cell is revealed.
    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }
}
