//! Axis aligned rectangles in model space.

use approx::{AbsDiffEq, RelativeEq};

use crate::{Crs, Error, Point, Result, srs::DEFAULT_EDGE_SAMPLE_COUNT};

/// Axis aligned rectangle in model space with an optional coordinate reference system.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    crs: Option<Crs>,
}

impl Bounds {
    /// Fails with [`Error::InvalidGeometry`] when a coordinate is not finite or min exceeds max.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self> {
        if ![min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite()) {
            return Err(Error::InvalidGeometry(format!(
                "Bounds contain non finite coordinates ({min_x}, {min_y}, {max_x}, {max_y})"
            )));
        }

        if min_x > max_x || min_y > max_y {
            return Err(Error::InvalidGeometry(format!(
                "Bounds minimum exceeds maximum ({min_x}, {min_y}, {max_x}, {max_y})"
            )));
        }

        Ok(Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
            crs: None,
        })
    }

    /// The bounding box of two corner points, in any order
    pub fn from_points(p1: Point, p2: Point) -> Result<Self> {
        Bounds::new(p1.x().min(p2.x()), p1.y().min(p2.y()), p1.x().max(p2.x()), p1.y().max(p2.y()))
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    pub fn without_crs(mut self) -> Self {
        self.crs = None;
        self
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    pub fn west(&self) -> f64 {
        self.min_x
    }

    pub fn south(&self) -> f64 {
        self.min_y
    }

    pub fn east(&self) -> f64 {
        self.max_x
    }

    pub fn north(&self) -> f64 {
        self.max_y
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Height divided by width
    pub fn aspect(&self) -> f64 {
        self.height() / self.width()
    }

    pub fn center(&self) -> Point {
        Point::new((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.min_x, self.max_y)
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.max_x, self.min_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Inclusive of the edges
    pub fn contains_point(&self, point: Point) -> bool {
        point.x() >= self.min_x && point.x() <= self.max_x && point.y() >= self.min_y && point.y() <= self.max_y
    }

    pub fn intersects(&self, other: &Bounds) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min_x < other.max_x
            && self.max_x > other.min_x
            && self.min_y < other.max_y
            && self.max_y > other.min_y
    }

    /// The overlapping area of both bounds, `None` when they do not overlap.
    /// The result carries the CRS of `self`.
    pub fn intersection(&self, other: &Bounds) -> Option<Bounds> {
        if !self.intersects(other) {
            return None;
        }

        Some(Bounds {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
            crs: self.crs.clone(),
        })
    }

    /// Reproject the bounds to the target CRS by sampling points along the edges.
    /// Bounds without a CRS cannot be reprojected.
    pub fn reproject(&self, target: &Crs, edge_sample_count: usize) -> Result<Bounds> {
        let source = self
            .crs
            .as_ref()
            .ok_or_else(|| Error::InvalidCrs("Bounds without a coordinate reference system cannot be reprojected".into()))?;

        if source == target {
            return Ok(self.clone());
        }

        source.transformer_to(target)?.transform_bounds(self, edge_sample_count)
    }

    /// [`Bounds::reproject`] with the default number of edge samples
    pub fn reproject_default(&self, target: &Crs) -> Result<Bounds> {
        self.reproject(target, DEFAULT_EDGE_SAMPLE_COUNT)
    }

    pub fn to_polygon(&self) -> geo_types::Polygon<f64> {
        geo_types::Polygon::from(geo_types::Rect::new(
            geo_types::coord! { x: self.min_x, y: self.min_y },
            geo_types::coord! { x: self.max_x, y: self.max_y },
        ))
    }
}

impl From<&Bounds> for geo_types::Rect<f64> {
    fn from(bounds: &Bounds) -> Self {
        geo_types::Rect::new(
            geo_types::coord! { x: bounds.min_x, y: bounds.min_y },
            geo_types::coord! { x: bounds.max_x, y: bounds.max_y },
        )
    }
}

impl From<&Bounds> for geo_types::Geometry<f64> {
    fn from(bounds: &Bounds) -> Self {
        geo_types::Geometry::Polygon(bounds.to_polygon())
    }
}

impl std::fmt::Display for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.min_x, self.min_y, self.max_x, self.max_y)?;
        if let Some(crs) = &self.crs {
            write!(f, " {crs}")?;
        }
        Ok(())
    }
}

impl AbsDiffEq for Bounds {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y].abs_diff_eq(&[other.min_x, other.min_y, other.max_x, other.max_y], epsilon)
    }
}

impl RelativeEq for Bounds {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        [self.min_x, self.min_y, self.max_x, self.max_y].relative_eq(
            &[other.min_x, other.min_y, other.max_x, other.max_y],
            epsilon,
            max_relative,
        )
    }
}
