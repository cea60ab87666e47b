#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

/// Probability that an eligible cell receives a mine when no density is given.
pub const DEFAULT_MINE_DENSITY: f64 = 0.2;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mine_density: f64,
}

impl GameConfig {
    pub fn new(size: Coord2, mine_density: f64) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        // NaN fails the range check and falls back too
        let mine_density = if (0.0..=1.0).contains(&mine_density) {
            mine_density
        } else {
            log::warn!(
                "mine density {} outside [0, 1], falling back to {}",
                mine_density,
                DEFAULT_MINE_DENSITY
            );
            DEFAULT_MINE_DENSITY
        };
        Ok(Self { size, mine_density })
    }

    pub fn with_default_density(size: Coord2) -> Result<Self> {
        Self::new(size, DEFAULT_MINE_DENSITY)
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn mine_density(&self) -> f64 {
        self.mine_density
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of a reveal action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
