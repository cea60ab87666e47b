use ndarray::Array2;

use crate::*;

pub use density::*;
pub use preset::*;

mod density;
mod preset;

/// Decides where the mines go, invoked once per game on the first reveal.
///
/// Returns one entry per board cell: `Some(true)` for a mine, `Some(false)`
/// for a cell the strategy decided is safe, and `None` for cells it never
/// considered (the safe opening around the first click).
pub trait MineGenerator {
    fn generate(&mut self, config: &GameConfig, origin: Coord2) -> Array2<Option<bool>>;
}
