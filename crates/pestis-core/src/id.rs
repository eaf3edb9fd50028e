//! Strongly-typed identifiers: [`TickId`] and [`CellCoord`].

use std::fmt;

/// Monotonically increasing tick counter.
///
/// One tick is one simulated second. `TickId(0)` is the state before the
/// first `update()`; each update advances the counter by exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// The tick that follows this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A cell position on the simulation grid.
///
/// `x` is the column (`0..width`), `y` is the row (`0..height`). Grids
/// are stored row-major, so the flat index is `y * width + x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl CellCoord {
    /// Create a coordinate from column and row.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Recover a coordinate from a row-major flat index.
    pub fn from_index(index: usize, width: u32) -> Self {
        let width = width as usize;
        Self {
            x: (index % width) as u32,
            y: (index / width) as u32,
        }
    }

    /// Row-major flat index for a grid of the given width.
    pub fn index(self, width: u32) -> usize {
        self.y as usize * width as usize + self.x as usize
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_next_increments() {
        assert_eq!(TickId(0).next(), TickId(1));
        assert_eq!(TickId(41).next().0, 42);
    }

    #[test]
    fn coord_index_round_trips() {
        let width = 7;
        for idx in 0..49 {
            let c = CellCoord::from_index(idx, width);
            assert!(c.x < width);
            assert_eq!(c.index(width), idx);
        }
    }

    #[test]
    fn coord_display() {
        assert_eq!(CellCoord::new(3, 9).to_string(), "(3, 9)");
    }
}
