//! Mapping between pixel space and model space.
//!
//! Pixel space is Y-up: cell (0, 0) is the south west pixel of the grid.
//! Sample storage is row-major from north to south; [`GridGeometry::storage_position`]
//! and [`GridGeometry::storage_cell_center`] work in that layout.

use approx::{AbsDiffEq, RelativeEq};

use crate::{Bounds, Cell, Error, GeoTransform, Point, RasterSize, Result};

/// Size of a single pixel in model units, both components are positive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellSize {
    x: f64,
    y: f64,
}

impl CellSize {
    pub const fn new(x: f64, y: f64) -> Self {
        CellSize { x, y }
    }

    pub const fn square(size: f64) -> Self {
        CellSize { x: size, y: size }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

impl From<CellSize> for (f64, f64) {
    fn from(cs: CellSize) -> Self {
        (cs.x, cs.y)
    }
}

impl AbsDiffEq for CellSize {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> <f64 as AbsDiffEq>::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: <f64 as AbsDiffEq>::Epsilon) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon) && f64::abs_diff_eq(&self.y, &other.y, epsilon)
    }
}

impl RelativeEq for CellSize {
    fn default_max_relative() -> <f64 as AbsDiffEq>::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: <f64 as AbsDiffEq>::Epsilon,
        max_relative: <f64 as AbsDiffEq>::Epsilon,
    ) -> bool {
        f64::relative_eq(&self.x, &other.x, epsilon, max_relative) && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
    }
}

/// Rectangle in pixel space, `x` and `y` locate its south west pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: usize,
    pub height: usize,
}

impl PixelRect {
    pub const fn new(x: i32, y: i32, width: usize, height: usize) -> Self {
        PixelRect { x, y, width, height }
    }

    pub const fn from_size(size: RasterSize) -> Self {
        PixelRect::new(0, 0, size.cols, size.rows)
    }

    pub fn size(&self) -> RasterSize {
        RasterSize::with_width_height(self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(i32, i32, usize, usize)> for PixelRect {
    /// Interprets the tuple as (x, y, width, height)
    fn from((x, y, width, height): (i32, i32, usize, usize)) -> Self {
        PixelRect::new(x, y, width, height)
    }
}

/// A pixel space rectangle paired with the model space bounds it covers.
/// The affine mapping is implicit: uniform scale, no rotation or skew.
#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    rect: PixelRect,
    bounds: Bounds,
}

impl GridGeometry {
    /// Fails with [`Error::InvalidGeometry`] for an empty pixel rectangle or empty bounds
    pub fn new(rect: PixelRect, bounds: Bounds) -> Result<Self> {
        if rect.is_empty() {
            return Err(Error::InvalidGeometry(format!(
                "Grid geometry requires a non empty pixel rectangle, got {}x{}",
                rect.width, rect.height
            )));
        }

        if bounds.is_empty() {
            return Err(Error::InvalidGeometry(format!("Grid geometry requires non empty bounds, got {bounds}")));
        }

        Ok(GridGeometry { rect, bounds })
    }

    /// Grid with its origin at pixel (0, 0)
    pub fn with_size(size: RasterSize, bounds: Bounds) -> Result<Self> {
        GridGeometry::new(PixelRect::from_size(size), bounds)
    }

    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn size(&self) -> RasterSize {
        self.rect.size()
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize::new(
            self.bounds.width() / self.rect.width as f64,
            self.bounds.height() / self.rect.height as f64,
        )
    }

    /// North up transform for the storage layout
    pub fn geo_transform(&self) -> GeoTransform {
        GeoTransform::north_up(self.bounds.top_left(), self.cell_size())
    }

    /// Model space coordinate of the center of a cell (cells are relative to the grid origin)
    pub fn pixel_center(&self, cell: Cell) -> Point {
        let cs = self.cell_size();
        Point::new(
            self.bounds.west() + (cell.col as f64 + 0.5) * cs.x(),
            self.bounds.south() + (cell.row as f64 + 0.5) * cs.y(),
        )
    }

    /// The cell containing the point, `None` when the point lies outside the grid
    pub fn cell_at(&self, point: Point) -> Option<Cell> {
        if !self.bounds.contains_point(point) {
            return None;
        }

        let cs = self.cell_size();
        let size = self.size();
        let col = (((point.x() - self.bounds.west()) / cs.x()).floor() as i32).min(size.cols as i32 - 1);
        let row = (((point.y() - self.bounds.south()) / cs.y()).floor() as i32).min(size.rows as i32 - 1);
        Some(Cell::from_row_col(row, col))
    }

    /// Model space center of a cell addressed in storage order (row 0 is the northern row)
    pub fn storage_cell_center(&self, storage_row: usize, col: usize) -> Point {
        self.geo_transform().apply(col as f64 + 0.5, storage_row as f64 + 0.5)
    }

    /// Continuous storage position (column, row) of a model space point.
    /// Integer values address pixel centers, so the center of the north west pixel maps to (0, 0).
    pub fn storage_position(&self, point: Point) -> (f64, f64) {
        let cs = self.cell_size();
        (
            (point.x() - self.bounds.west()) / cs.x() - 0.5,
            (self.bounds.north() - point.y()) / cs.y() - 0.5,
        )
    }
}
