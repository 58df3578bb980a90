use crate::RasterSize;

/// A pixel location in grid space.
/// Rows are counted from the southern edge of the raster: row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn from_row_col(row: i32, col: i32) -> Self {
        Cell { row, col }
    }

    pub const fn is_valid(&self) -> bool {
        self.row >= 0 && self.col >= 0
    }

    pub fn increment(&mut self, cols_in_grid: i32) {
        self.col += 1;
        if self.col >= cols_in_grid {
            self.col = 0;
            self.row += 1;
        }
    }

    pub fn is_inside(&self, size: RasterSize) -> bool {
        self.is_valid() && (self.row as usize) < size.rows && (self.col as usize) < size.cols
    }

    /// Index of the cell in the row-major, north-to-south sample storage of a raster with the given size
    pub fn storage_index(&self, size: RasterSize) -> Option<usize> {
        if !self.is_inside(size) {
            return None;
        }

        let storage_row = size.rows - 1 - self.row as usize;
        Some(storage_row * size.cols + self.col as usize)
    }
}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

/// Iterator over the cells in a raster
/// Iteration starts at cell (0, 0), the bottom left cell, and proceeds column by column, then row by row.
pub struct CellIterator {
    rows: i32,
    cols: i32,
    current: Cell,
}

impl CellIterator {
    pub fn for_raster_with_size(size: RasterSize) -> Self {
        CellIterator {
            rows: size.rows as i32,
            cols: size.cols as i32,
            current: Cell::from_row_col(0, 0),
        }
    }

    fn remaining(&self) -> usize {
        if self.cols == 0 || self.current.row >= self.rows {
            return 0;
        }

        ((self.rows - self.current.row) * self.cols - self.current.col) as usize
    }
}

impl Iterator for CellIterator {
    type Item = Cell;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cols == 0 || self.current.row >= self.rows {
            return None;
        }

        let current = self.current;
        self.current.increment(self.cols);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellIterator {}
