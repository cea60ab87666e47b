use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// Bernoulli-per-cell strategy: every cell outside the safe opening becomes a
/// mine independently with the configured density. The opening is the clicked
/// cell plus everything within Chebyshev distance 1 of it, so the first reveal
/// can never hit a mine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DensityGenerator {
    seed: Option<u64>,
}

impl DensityGenerator {
    pub const fn new() -> Self {
        Self { seed: None }
    }

    /// Deterministic layouts for replays and tests.
    pub const fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl MineGenerator for DensityGenerator {
    fn generate(&mut self, config: &GameConfig, origin: Coord2) -> Array2<Option<bool>> {
        use rand::prelude::*;

        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut mask = Array2::from_elem(config.size().to_nd_index(), None);
        let mut mines_placed: CellCount = 0;
        for ((x, y), slot) in mask.indexed_iter_mut() {
            let coords = (x as Coord, y as Coord);
            if chebyshev(coords, origin) <= 1 {
                continue;
            }
            let mine = rng.random_bool(config.mine_density());
            *slot = Some(mine);
            if mine {
                mines_placed += 1;
            }
        }

        if mines_placed == 0 {
            log::warn!(
                "no mines placed on {:?} board, opening at {:?} covers it or density is zero",
                config.size(),
                origin
            );
        } else {
            log::debug!(
                "placed {} mines, opening at {:?} left clear",
                mines_placed,
                origin
            );
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_same_layout() {
        let config = GameConfig::new((8, 8), 0.4).unwrap();
        let first = DensityGenerator::seeded(7).generate(&config, (3, 3));
        let second = DensityGenerator::seeded(7).generate(&config, (3, 3));
        assert_eq!(first, second);
    }

    #[test]
    fn safe_opening_is_left_undecided() {
        let config = GameConfig::new((8, 8), 1.0).unwrap();
        let mask = DensityGenerator::seeded(1).generate(&config, (4, 4));

        for ((x, y), &slot) in mask.indexed_iter() {
            let coords = (x as Coord, y as Coord);
            if chebyshev(coords, (4, 4)) <= 1 {
                assert_eq!(slot, None, "opening cell {:?} was decided", coords);
            } else {
                // density 1.0 makes every eligible cell a mine
                assert_eq!(slot, Some(true), "cell {:?} should be a mine", coords);
            }
        }
    }

    #[test]
    fn tiny_board_is_entirely_safe() {
        let config = GameConfig::new((3, 3), 1.0).unwrap();
        let mask = DensityGenerator::seeded(1).generate(&config, (1, 1));
        assert!(mask.iter().all(Option::is_none));
    }
}
