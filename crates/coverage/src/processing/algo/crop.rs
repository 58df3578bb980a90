use geo::{BoundingRect, Intersects};
use geo_types::{Geometry, MultiPolygon};

use crate::{Bounds, Cell, Error, GridCoverage, GridGeometry, Nodata, PixelRect, Point, Result};

/// Clip the coverage to a polygonal geometry expressed in the coverage CRS.
///
/// The output grid is the bounding box of the geometry snapped outwards to the source grid and
/// clipped to the source extent. Cells whose center lies outside the geometry become no-data.
pub fn crop(source: &GridCoverage, geometry: &Geometry<f64>) -> Result<GridCoverage> {
    let polygons = to_multi_polygon(geometry)?;
    let bbox = polygons
        .bounding_rect()
        .ok_or_else(|| Error::InvalidGeometry("Crop geometry is empty".into()))?;

    let size = source.size();
    let extent = source.bounds();
    let cell_size = source.geometry().cell_size();

    let snap = |value: f64, origin: f64, cell: f64, count: usize, round: fn(f64) -> f64| -> usize {
        round((value - origin) / cell).clamp(0.0, count as f64) as usize
    };

    let col_start = snap(bbox.min().x, extent.west(), cell_size.x(), size.cols, f64::floor);
    let col_end = snap(bbox.max().x, extent.west(), cell_size.x(), size.cols, f64::ceil);
    let row_start = snap(bbox.min().y, extent.south(), cell_size.y(), size.rows, f64::floor);
    let row_end = snap(bbox.max().y, extent.south(), cell_size.y(), size.rows, f64::ceil);

    if col_end <= col_start || row_end <= row_start {
        return Err(Error::InvalidGeometry(format!(
            "Crop geometry does not intersect the coverage extent {extent}"
        )));
    }

    let mut bounds = Bounds::new(
        extent.west() + col_start as f64 * cell_size.x(),
        extent.south() + row_start as f64 * cell_size.y(),
        extent.west() + col_end as f64 * cell_size.x(),
        extent.south() + row_end as f64 * cell_size.y(),
    )?;
    if let Some(crs) = extent.crs() {
        bounds = bounds.with_crs(crs.clone());
    }

    let (cols, rows) = (col_end - col_start, row_end - row_start);
    let geometry = GridGeometry::new(PixelRect::new(0, 0, cols, rows), bounds)?;

    // Source cells for the output storage order, `None` when the cell center falls outside the geometry
    let mut cells: Vec<Option<usize>> = Vec::with_capacity(cols * rows);
    for out_row in (0..rows).rev() {
        for out_col in 0..cols {
            let cell = Cell::from_row_col((row_start + out_row) as i32, (col_start + out_col) as i32);
            let center: Point = source.geometry().pixel_center(cell);
            cells.push(if polygons.intersects(&center) { cell.storage_index(size) } else { None });
        }
    }

    let bands = source
        .all_band_samples()
        .iter()
        .map(|samples| {
            cells
                .iter()
                .map(|index| index.map_or(f64::NODATA, |i| samples[i]))
                .collect()
        })
        .collect();

    source.derive(geometry, bands)
}

fn to_multi_polygon(geometry: &Geometry<f64>) -> Result<MultiPolygon<f64>> {
    Ok(match geometry {
        Geometry::Polygon(polygon) => MultiPolygon::new(vec![polygon.clone()]),
        Geometry::MultiPolygon(polygons) => polygons.clone(),
        Geometry::Rect(rect) => MultiPolygon::new(vec![rect.to_polygon()]),
        Geometry::Triangle(triangle) => MultiPolygon::new(vec![triangle.to_polygon()]),
        _ => {
            return Err(Error::InvalidGeometry(
                "Crop requires a polygonal geometry (polygon, multi polygon, rect or triangle)".into(),
            ));
        }
    })
}
