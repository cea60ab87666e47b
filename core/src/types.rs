/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    (a as CellCount) * (b as CellCount)
}

/// Chessboard distance between two positions, the metric of the safe opening.
pub const fn chebyshev(a: Coord2, b: Coord2) -> Coord {
    let dx = a.0.abs_diff(b.0);
    let dy = a.1.abs_diff(b.1);
    if dx > dy { dx } else { dy }
}

const NEIGHBOR_OFFSETS: [(i16, i16); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The up-to-8 in-bounds neighbors of `center`, in a fixed scan order.
pub fn neighbors(center: Coord2, bounds: Coord2) -> impl Iterator<Item = Coord2> {
    NEIGHBOR_OFFSETS.into_iter().filter_map(move |(dx, dy)| {
        let x = center.0.checked_add_signed(dx)?;
        let y = center.1.checked_add_signed(dy)?;
        (x < bounds.0 && y < bounds.1).then_some((x, y))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn interior_cell_has_eight_neighbors_in_scan_order() {
        let found: Vec<_> = neighbors((1, 1), (3, 3)).collect();
        assert_eq!(
            found,
            [
                (0, 0),
                (1, 0),
                (2, 0),
                (0, 1),
                (2, 1),
                (0, 2),
                (1, 2),
                (2, 2),
            ]
        );
    }

    #[test]
    fn corner_and_edge_cells_have_fewer_neighbors() {
        let corner: Vec<_> = neighbors((0, 0), (3, 3)).collect();
        assert_eq!(corner, [(1, 0), (0, 1), (1, 1)]);

        let edge: Vec<_> = neighbors((1, 0), (3, 3)).collect();
        assert_eq!(edge, [(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(neighbors((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn chebyshev_takes_the_larger_axis_difference() {
        assert_eq!(chebyshev((4, 4), (4, 4)), 0);
        assert_eq!(chebyshev((4, 4), (5, 3)), 1);
        assert_eq!(chebyshev((4, 4), (1, 6)), 3);
    }
}
