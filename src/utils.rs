use std::fmt;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[macro_export]
macro_rules! pos {
    ($row:expr, $col:expr) => {
        $crate::Pos {
            row: $row,
            col: $col,
        }
    };
}

impl Pos {
    /// shifts the position, `None` when it would leave the positive quadrant.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(pos!(row, col))
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Size {
    pub height: usize,
    pub width: usize,
}

impl Size {
    pub fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    /// true when `other` fits inside `self` on both axes.
    pub fn fits(&self, other: Size) -> bool {
        other.height <= self.height && other.width <= self.width
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

#[test]
fn test_offset() {
    assert_eq!(pos!(1, 1).offset(-1, -1), Some(pos!(0, 0)));
    assert_eq!(pos!(0, 3).offset(-1, 0), None);
    assert_eq!(pos!(3, 0).offset(0, -1), None);
    assert_eq!(pos!(2, 5).offset(1, 1), Some(pos!(3, 6)));
}

#[test]
fn test_size() {
    let size = Size::new(3, 4);
    assert!(size.contains(pos!(2, 3)));
    assert!(!size.contains(pos!(3, 0)));
    assert!(!size.contains(pos!(0, 4)));
    assert_eq!(size.area(), 12);
    assert!(size.fits(Size::new(3, 4)));
    assert!(!size.fits(Size::new(4, 1)));
    assert_eq!(size.to_string(), "3x4");
}
