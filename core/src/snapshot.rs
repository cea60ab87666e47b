use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a renderer is allowed to see for one cell. `mine` is disclosed only
/// once the cell is revealed or the game has ended; `adjacent_mines` only
/// exists for revealed non-mine cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub x: Coord,
    pub y: Coord,
    pub revealed: bool,
    pub flagged: bool,
    pub mine: Option<bool>,
    pub adjacent_mines: Option<u8>,
}

/// Read-only copy of the board for a rendering consumer. The engine mutates
/// in place; observers work from these snapshots and never touch the board
/// directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub phase: Phase,
    pub size: Coord2,
    pub mines_left: Option<isize>,
    pub cells: Array2<CellView>,
}

impl BoardSnapshot {
    pub fn from_engine<G: MineGenerator>(engine: &GameEngine<G>) -> Self {
        let size = engine.size();
        let phase = engine.phase();
        let disclose_mines = phase.is_finished();

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            let cell = engine.cell_at(coords);
            CellView {
                x: coords.0,
                y: coords.1,
                revealed: cell.is_revealed(),
                flagged: cell.is_flagged(),
                mine: (cell.is_revealed() || disclose_mines).then_some(cell.is_mine()),
                adjacent_mines: (cell.is_revealed() && !cell.is_mine())
                    .then_some(cell.adjacent_mines()),
            }
        });

        Self {
            phase,
            size,
            mines_left: engine.mines_left(),
            cells,
        }
    }

    pub fn cell(&self, coords: Coord2) -> &CellView {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_with_mine_at_corner() -> GameEngine<PresetGenerator> {
        let config = GameConfig::with_default_density((3, 3)).unwrap();
        let generator = PresetGenerator::from_mine_coords((3, 3), &[(2, 2)]).unwrap();
        GameEngine::with_generator(config, generator)
    }

    #[test]
    fn hidden_cells_do_not_leak_mine_info_while_playing() {
        let mut engine = engine_with_mine_at_corner();
        engine.reveal((1, 0)).unwrap();

        let snap = engine.snapshot();

        assert_eq!(snap.phase, Phase::Playing);
        assert_eq!(snap.cell((2, 2)).mine, None);
        assert_eq!(snap.cell((2, 2)).adjacent_mines, None);
    }

    #[test]
    fn revealed_cells_expose_their_counts() {
        let mut engine = engine_with_mine_at_corner();
        engine.reveal((0, 0)).unwrap();

        let snap = engine.snapshot();
        let view = snap.cell((1, 1));

        assert!(view.revealed);
        assert_eq!(view.mine, Some(false));
        assert_eq!(view.adjacent_mines, Some(1));
    }

    #[test]
    fn terminal_phase_discloses_every_mine() {
        let config = GameConfig::with_default_density((2, 2)).unwrap();
        let generator = PresetGenerator::from_mine_coords((2, 2), &[(0, 0), (1, 1)]).unwrap();
        let mut engine = GameEngine::with_generator(config, generator);

        engine.reveal((0, 0)).unwrap();
        let snap = engine.snapshot();

        assert_eq!(snap.phase, Phase::Lost);
        assert_eq!(snap.cell((0, 0)).mine, Some(true));
        assert_eq!(snap.cell((1, 1)).mine, Some(true));
        // mines never expose an adjacency count
        assert_eq!(snap.cell((0, 0)).adjacent_mines, None);
    }

    #[test]
    fn serialized_view_keeps_hidden_mines_null() {
        let mut engine = engine_with_mine_at_corner();
        engine.reveal((1, 0)).unwrap();

        let snap = engine.snapshot();
        let value = serde_json::to_value(snap.cell((2, 2))).unwrap();

        assert!(value["mine"].is_null());
        assert!(value["adjacent_mines"].is_null());
        assert_eq!(value["revealed"], serde_json::json!(false));
    }
}
