//! Coordinate transformations between reference systems, backed by `proj4rs`.

use proj4rs::Proj;
use proj4rs::transform::transform;

use crate::{Bounds, Crs, Point, Result};

pub const DEFAULT_EDGE_SAMPLE_COUNT: usize = 25;
const MIN_EDGE_POINTS: usize = 2;

/// Transforms points from a source to a target CRS.
/// Geographic coordinates are expected and returned in degrees (x = longitude, y = latitude).
pub struct CoordinateTransformer {
    source: Proj,
    target: Proj,
    target_crs: Crs,
    identity: bool,
}

impl CoordinateTransformer {
    pub fn new(source: &Crs, target: &Crs) -> Result<Self> {
        Ok(CoordinateTransformer {
            source: Proj::from_proj_string(source.proj_string())?,
            target: Proj::from_proj_string(target.proj_string())?,
            target_crs: target.clone(),
            identity: source == target,
        })
    }

    pub fn target_crs(&self) -> &Crs {
        &self.target_crs
    }

    pub fn transform_point(&self, point: Point) -> Result<Point> {
        if self.identity {
            return Ok(point);
        }

        let mut p = if self.source.is_latlong() { point.to_radians() } else { point };
        transform(&self.source, &self.target, &mut p)?;
        if self.target.is_latlong() {
            // Convert back to degrees if the target is a geographic coordinate system
            p = p.to_degrees();
        }

        Ok(p)
    }

    pub fn transform_points_in_place(&self, points: &mut [Point]) -> Result<()> {
        for point in points.iter_mut() {
            *point = self.transform_point(*point)?;
        }
        Ok(())
    }

    /// Transform a bounding box by sampling points along its edges and taking the bounding box of the result.
    /// This is more accurate than transforming the four corners when the transformation bends the edges.
    pub fn transform_bounds(&self, bounds: &Bounds, edge_points: usize) -> Result<Bounds> {
        let points_per_edge = edge_points.max(MIN_EDGE_POINTS);

        let add_edge_points = |points: &mut Vec<Point>, start: Point, end: Point| {
            for i in 0..points_per_edge {
                let t = i as f64 / (points_per_edge - 1) as f64;
                points.push(Point::new(
                    start.x() + t * (end.x() - start.x()),
                    start.y() + t * (end.y() - start.y()),
                ));
            }
        };

        let top_left = Point::new(bounds.west(), bounds.north());
        let top_right = Point::new(bounds.east(), bounds.north());
        let bottom_right = Point::new(bounds.east(), bounds.south());
        let bottom_left = Point::new(bounds.west(), bounds.south());

        let mut all_points = Vec::with_capacity(points_per_edge * 4);
        add_edge_points(&mut all_points, top_left, top_right);
        add_edge_points(&mut all_points, top_right, bottom_right);
        add_edge_points(&mut all_points, bottom_right, bottom_left);
        add_edge_points(&mut all_points, bottom_left, top_left);

        self.transform_points_in_place(&mut all_points)?;

        let (min_x, max_x, min_y, max_y) = all_points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(min_x, max_x, min_y, max_y), point| (min_x.min(point.x()), max_x.max(point.x()), min_y.min(point.y()), max_y.max(point.y())),
        );

        Ok(Bounds::new(min_x, min_y, max_x, max_y)?.with_crs(self.target_crs.clone()))
    }
}

impl std::fmt::Debug for CoordinateTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CoordinateTransformer(target: {})", self.target_crs)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::crs::epsg;

    #[test]
    fn transform_wgs84_to_lambert72() {
        let source = Crs::wgs84();
        let target = Crs::from_epsg(epsg::BELGIAN_LAMBERT72).unwrap();
        let trans = source.transformer_to(&target).unwrap();

        let p = trans.transform_point(Point::new(3.5713882022278653, 51.04223683846715)).unwrap();
        assert_relative_eq!(p, Point::new(94079.44534873398, 192751.6060780408), epsilon = 1.0);
    }

    #[test]
    fn transform_round_trip() {
        let wgs84 = Crs::wgs84();
        let mercator = Crs::from_epsg(epsg::WGS84_WEB_MERCATOR).unwrap();

        let forward = wgs84.transformer_to(&mercator).unwrap();
        let backward = mercator.transformer_to(&wgs84).unwrap();

        let point = Point::new(4.35, 50.85);
        let projected = forward.transform_point(point).unwrap();
        assert!(projected.x() > 400_000.0);
        assert_relative_eq!(backward.transform_point(projected).unwrap(), point, epsilon = 1e-6);
    }

    #[test]
    fn identity_transform() {
        let trans = Crs::wgs84().transformer_to(&Crs::wgs84()).unwrap();
        let p = Point::new(1.0, 2.0);
        assert_eq!(trans.transform_point(p).unwrap(), p);
    }
}
