use crate::{pos, Cell, Error, Grid, Pos, Result, Size};

/// A fixed mask placed at the center of an empty grid to start a run.
#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    rows: &'static [&'static [u8]],
}

impl Pattern {
    pub const fn new(name: &'static str, rows: &'static [&'static [u8]]) -> Self {
        Self { name, rows }
    }

    pub fn size(&self) -> Size {
        let width = self.rows.first().map_or(0, |row| row.len());
        Size::new(self.rows.len(), width)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, &bit)| (pos!(row, col), Cell::from_bit(bit)))
        })
    }
}

pub const BEACON: Pattern = Pattern::new(
    "Beacon",
    &[&[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 0, 1, 1], &[0, 0, 1, 1]],
);

pub const R_PENTOMINO: Pattern = Pattern::new("R-Pentomino", &[&[0, 1, 1], &[1, 1, 0], &[0, 1, 0]]);

pub const DIEHARD: Pattern = Pattern::new(
    "Diehard",
    &[
        &[0, 0, 0, 0, 0, 0, 1, 0],
        &[1, 1, 0, 0, 0, 0, 0, 0],
        &[0, 1, 0, 0, 0, 1, 1, 1],
    ],
);

pub const ACORN: Pattern = Pattern::new(
    "Acorn",
    &[
        &[0, 1, 0, 0, 0, 0, 0],
        &[0, 0, 0, 1, 0, 0, 0],
        &[1, 1, 0, 0, 1, 1, 1],
    ],
);

pub const BLOCK_SWITCH_ENGINE: Pattern = Pattern::new(
    "Block-Switch-Engine",
    &[
        &[0, 0, 0, 0, 0, 0, 1, 0],
        &[0, 0, 0, 0, 1, 0, 1, 1],
        &[0, 0, 0, 0, 1, 0, 1, 0],
        &[0, 0, 0, 0, 1, 0, 0, 0],
        &[0, 0, 1, 0, 0, 0, 0, 0],
        &[1, 0, 1, 0, 0, 0, 0, 0],
    ],
);

/// menu order, the first entry is chosen with key `1`.
pub static CATALOG: [&Pattern; 5] = [&BEACON, &R_PENTOMINO, &DIEHARD, &ACORN, &BLOCK_SWITCH_ENGINE];

/// catalog entry bound to a digit key.
pub fn by_key(key: char) -> Option<&'static Pattern> {
    let index = key.to_digit(10)?.checked_sub(1)?;
    CATALOG.get(index as usize).copied()
}

/// top left corner at which `pattern` sits centered in `grid`.
pub fn centering_offset(grid: Size, pattern: Size) -> Pos {
    pos!(
        grid.height / 2 - pattern.height / 2,
        grid.width / 2 - pattern.width / 2
    )
}

/// Overwrites the centered footprint of `pattern` in `grid`, leaving the other cells as they are.
/// Returns the top left corner of the footprint.
pub fn place_seed(grid: &mut Grid, pattern: &Pattern) -> Result<Pos> {
    let grid_size = grid.size();
    let pattern_size = pattern.size();
    if !grid_size.fits(pattern_size) {
        return Err(Error::PatternTooLarge {
            name: pattern.name,
            pattern: pattern_size,
            grid: grid_size,
        });
    }

    let origin = centering_offset(grid_size, pattern_size);
    for (pos, cell) in pattern.cells() {
        grid.set(pos!(origin.row + pos.row, origin.col + pos.col), cell)?;
    }
    Ok(origin)
}
