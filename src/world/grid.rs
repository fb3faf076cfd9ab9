use std::hash::{Hash, Hasher};

use metrohash::MetroHash64;

use crate::{pos, Cell, Error, Pos, Result, Size};

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Fixed-size, bounded universe. Cells past the edge count as dead.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: Size,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            cells: vec![Cell::dead(); size.area()],
        }
    }

    #[cfg(test)]
    /// builds a grid from rows of 0/1 values, all rows must share the first row's length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let width = rows.first().map_or(0, |row| row.len());
        let size = Size::new(rows.len(), width);
        let cells = rows
            .iter()
            .flat_map(|row| {
                assert_eq!(row.len(), width, "ragged grid rows");
                row.iter().copied().map(Cell::from_bit)
            })
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    fn index(&self, pos: Pos) -> Result<usize> {
        if self.size.contains(pos) {
            Ok(pos.row * self.size.width + pos.col)
        } else {
            Err(Error::OutOfBounds {
                pos,
                size: self.size,
            })
        }
    }

    pub fn get(&self, pos: Pos) -> Result<Cell> {
        let index = self.index(pos)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<()> {
        let index = self.index(pos)?;
        self.cells[index] = cell;
        Ok(())
    }

    fn is_alive_at(&self, pos: Pos) -> bool {
        self.get(pos).map_or(false, |cell| cell.is_alive())
    }

    /// live cells among the eight surrounding positions, the cell itself excluded.
    pub fn neighbor_count(&self, pos: Pos) -> Result<u8> {
        self.index(pos)?;
        Ok(self.live_neighbors(pos))
    }

    /// `pos` must lie inside the grid.
    fn live_neighbors(&self, pos: Pos) -> u8 {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(d_row, d_col)| pos.offset(d_row, d_col))
            .filter(|&neighbor| self.is_alive_at(neighbor))
            .count() as u8
    }

    /// next generation, computed from this snapshot only.
    pub fn step(&self) -> Self {
        let cells = self
            .positions()
            .zip(&self.cells)
            .map(|(pos, cell)| cell.next(self.live_neighbors(pos)))
            .collect();
        Self {
            size: self.size,
            cells,
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let Size { height, width } = self.size;
        (0..height).flat_map(move |row| (0..width).map(move |col| pos!(row, col)))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        let width = self.size.width;
        (0..self.size.height).map(move |row| &self.cells[row * width..(row + 1) * width])
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.population() == 0
    }

    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_grid() -> Grid {
        Grid::from_rows(&[
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
            &[0, 1, 1, 0],
            &[0, 0, 0, 0],
        ])
    }

    #[test]
    fn get_out_of_bounds() {
        let grid = Grid::new(Size::new(3, 5));
        assert!(grid.get(pos!(2, 4)).is_ok());
        assert!(matches!(
            grid.get(pos!(3, 0)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(matches!(
            grid.get(pos!(0, 5)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(Grid::new(Size::new(3, 5)).set(pos!(9, 9), Cell::alive()).is_err());
        assert!(grid.neighbor_count(pos!(3, 3)).is_err());
    }

    #[test]
    fn neighbor_count_excludes_center() {
        let full = Grid::from_rows(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(full.neighbor_count(pos!(1, 1)).unwrap(), 8);

        let lone = Grid::from_rows(&[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);
        assert_eq!(lone.neighbor_count(pos!(1, 1)).unwrap(), 0);
        assert_eq!(lone.neighbor_count(pos!(0, 0)).unwrap(), 1);
    }

    #[test]
    fn edges_are_dead_not_wrapped() {
        let full = Grid::from_rows(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(full.neighbor_count(pos!(0, 0)).unwrap(), 3);
        assert_eq!(full.neighbor_count(pos!(0, 1)).unwrap(), 5);
        assert_eq!(full.neighbor_count(pos!(2, 2)).unwrap(), 3);

        // a torus would give the corner neighbors from the opposite edges
        let corners = Grid::from_rows(&[&[1, 0, 0, 1], &[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 0, 0, 1]]);
        assert_eq!(corners.neighbor_count(pos!(0, 0)).unwrap(), 0);
    }

    #[test]
    fn step_follows_rule_for_every_cell() {
        let grid = Grid::from_rows(&[
            &[1, 0, 1, 1, 0],
            &[0, 1, 1, 0, 1],
            &[1, 1, 0, 0, 0],
            &[0, 0, 1, 1, 1],
        ]);
        let next = grid.step();
        assert_eq!(next.size(), grid.size());
        for pos in grid.positions() {
            let count = grid.neighbor_count(pos).unwrap();
            let was_alive = grid.get(pos).unwrap().is_alive();
            let expected = match (was_alive, count) {
                (true, 2 | 3) => true,
                (false, 3) => true,
                _ => false,
            };
            assert_eq!(next.get(pos).unwrap().is_alive(), expected, "{pos}");
        }
    }

    #[test]
    fn step_is_synchronous() {
        // blinker: an in-place update would not produce the vertical phase
        let horizontal = Grid::from_rows(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
            &[0, 1, 1, 1, 0],
            &[0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        let vertical = Grid::from_rows(&[
            &[0, 0, 0, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert_eq!(horizontal.step(), vertical);
        assert_eq!(vertical.step(), horizontal);
    }

    #[test]
    fn step_counts_every_cell_in_row_order() {
        // saturated border: corners see 3, edges 5, so only corners survive
        let full = Grid::from_rows(&[&[1, 1, 1, 1], &[1, 1, 1, 1], &[1, 1, 1, 1]]);
        let next = full.step();
        let alive: Vec<_> = next.positions().filter(|&pos| next.get(pos).unwrap().is_alive()).collect();
        assert_eq!(alive, vec![pos!(0, 0), pos!(0, 3), pos!(2, 0), pos!(2, 3)]);
        for pos in full.positions() {
            assert_eq!(full.live_neighbors(pos), full.neighbor_count(pos).unwrap(), "{pos}");
        }
    }

    #[test]
    fn empty_grid_is_fixed_point() {
        let empty = Grid::new(Size::new(6, 9));
        assert_eq!(empty.step(), empty);
        assert!(empty.step().is_empty());
    }

    #[test]
    fn block_is_still_life() {
        let block = block_grid();
        assert_eq!(block.step(), block);
        assert_eq!(block.population(), 4);
    }

    #[test]
    fn overpopulated_center_dies() {
        let plus = Grid::from_rows(&[&[0, 1, 0], &[1, 1, 1], &[0, 1, 0]]);
        let next = plus.step();
        assert!(!next.get(pos!(1, 1)).unwrap().is_alive());
        assert!(next.get(pos!(0, 0)).unwrap().is_alive());
    }

    #[test]
    fn degenerate_sizes() {
        let flat = Grid::new(Size::new(0, 7));
        assert_eq!(flat.step().size(), Size::new(0, 7));
        assert_eq!(flat.rows().count(), 0);

        let thin = Grid::new(Size::new(3, 0));
        assert_eq!(thin.rows().count(), 3);
        assert!(thin.step().is_empty());
    }

    #[test]
    fn fingerprint_tracks_content() {
        let block = block_grid();
        assert_eq!(block.fingerprint(), block.clone().fingerprint());
        assert_eq!(block.fingerprint(), block.step().fingerprint());
        assert_ne!(block.fingerprint(), Grid::new(block.size()).fingerprint());
    }
}
