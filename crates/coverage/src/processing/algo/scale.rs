use crate::{Bounds, Error, GridCoverage, GridGeometry, PixelRect, Result, processing::Interpolation};

use super::resample::resample_bands;

/// Scale the pixel counts of a coverage while keeping its envelope.
/// The translation, expressed in output pixels, shifts the resulting envelope (positive y moves north).
pub fn scale(
    source: &GridCoverage,
    x_scale: f64,
    y_scale: f64,
    x_translate: f64,
    y_translate: f64,
    interpolation: Interpolation,
) -> Result<GridCoverage> {
    for (name, factor) in [("xScale", x_scale), ("yScale", y_scale)] {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(Error::invalid_parameter(
                crate::processing::operations::SCALE,
                name,
                format!("scale factor must be a positive number, got {factor}"),
            ));
        }
    }

    let size = source.size();
    let cols = (size.cols as f64 * x_scale).round() as usize;
    let rows = (size.rows as f64 * y_scale).round() as usize;
    if cols == 0 || rows == 0 {
        return Err(Error::InvalidGeometry(format!(
            "Scaling a {size} grid by ({x_scale}, {y_scale}) results in an empty grid"
        )));
    }

    let scaled = GridGeometry::new(PixelRect::new(0, 0, cols, rows), source.bounds().clone())?;
    let bands = resample_bands(source, &scaled, interpolation, None);

    let geometry = if x_translate != 0.0 || y_translate != 0.0 {
        let cell_size = scaled.cell_size();
        let bounds = source.bounds();
        let dx = x_translate * cell_size.x();
        let dy = y_translate * cell_size.y();
        let mut shifted = Bounds::new(bounds.west() + dx, bounds.south() + dy, bounds.east() + dx, bounds.north() + dy)?;
        if let Some(crs) = bounds.crs() {
            shifted = shifted.with_crs(crs.clone());
        }
        GridGeometry::new(scaled.rect(), shifted)?
    } else {
        scaled
    };

    source.derive(geometry, bands)
}
