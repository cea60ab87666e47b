use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Fixed layout that ignores the clicked cell. Bypasses the safe-opening
/// guarantee, which is exactly what scripted boards need.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetGenerator {
    mines: Array2<bool>,
}

impl PresetGenerator {
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mines[coords.to_nd_index()] = true;
        }

        Ok(Self { mines })
    }
}

impl MineGenerator for PresetGenerator {
    fn generate(&mut self, config: &GameConfig, _origin: Coord2) -> Array2<Option<bool>> {
        debug_assert_eq!(
            self.mines.dim(),
            (config.width() as usize, config.height() as usize),
        );
        self.mines.mapv(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_requested_coords() {
        let config = GameConfig::with_default_density((3, 2)).unwrap();
        let mut generator = PresetGenerator::from_mine_coords((3, 2), &[(0, 0), (2, 1)]).unwrap();

        let mask = generator.generate(&config, (1, 0));

        assert_eq!(mask[(0, 0)], Some(true));
        assert_eq!(mask[(2, 1)], Some(true));
        assert_eq!(mask[(1, 0)], Some(false));
    }

    #[test]
    fn rejects_out_of_bounds_mines() {
        assert_eq!(
            PresetGenerator::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
    }
}
