#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub fn alive() -> Self {
        Self { alive: true }
    }

    pub fn dead() -> Self {
        Self { alive: false }
    }

    pub fn from_bit(bit: u8) -> Self {
        Self { alive: bit != 0 }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// B3/S23: state of this cell in the next generation given its live neighbor count.
    pub fn next(self, neighbor_count: u8) -> Self {
        match (self.alive, neighbor_count) {
            (true, 2 | 3) => Cell::alive(), // stays
            (true, _) => Cell::dead(),      // under or overpopulation
            (false, 3) => Cell::alive(),    // birth
            (false, _) => Cell::dead(),     // stays dead
        }
    }
}

pub use grid::Grid;
mod grid;

#[test]
fn test_rule() {
    for count in 0..=8 {
        let survives = count == 2 || count == 3;
        assert_eq!(Cell::alive().next(count).is_alive(), survives, "live, {count}");
        assert_eq!(Cell::dead().next(count).is_alive(), count == 3, "dead, {count}");
    }
}
