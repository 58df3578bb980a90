use crate::{Bounds, Error, GridGeometry, PixelRect, Raster, RasterSize, Result};

/// Largest width or height of a resample target, cells are addressed with `i32` rows and columns
const MAX_DIMENSION: usize = i32::MAX as usize;

/// Resolve the target grid of a resample from partial arguments.
///
/// Target bounds: `bbox` when given (reprojected to the raster CRS when it carries another CRS),
/// else the pixel rectangle converted to model space with the current pixel size, else the full extent.
///
/// Target size: `size` when given, else the rectangle size (one output pixel per source pixel),
/// else `width = round(cols * bbox.width / extent.width)` and `height = round(width * extent.aspect)`.
/// The height follows the aspect of the current extent, not the one of the new bounds.
///
/// A `bbox` in another CRS is reprojected with the edge sample count of the raster's processor.
/// Sizes that are empty or too large to address fail with `InvalidGeometry`.
pub fn resolve_resample_geometry(
    raster: &Raster,
    bbox: Option<&Bounds>,
    rect: Option<PixelRect>,
    size: Option<RasterSize>,
) -> Result<GridGeometry> {
    let extent = raster.extent();

    let bounds = match (bbox, rect) {
        (Some(bbox), _) => bounds_in_raster_crs(raster, bbox)?,
        (None, Some(rect)) => {
            let pixel_size = raster.pixel_size()?;
            let west = extent.west() + rect.x as f64 * pixel_size.x();
            let south = extent.south() + rect.y as f64 * pixel_size.y();
            let bounds = Bounds::new(
                west,
                south,
                west + rect.width as f64 * pixel_size.x(),
                south + rect.height as f64 * pixel_size.y(),
            )?;

            match extent.crs() {
                Some(crs) => bounds.with_crs(crs.clone()),
                None => bounds,
            }
        }
        (None, None) => extent.clone(),
    };

    let size = match (size, rect) {
        (Some(size), _) => size,
        (None, Some(rect)) => rect.size(),
        (None, None) => {
            let current = raster.size();
            let width = (current.width() as f64 * bounds.width() / extent.width()).round();
            let height = (width * extent.aspect()).round();
            if !width.is_finite() || !height.is_finite() || width > MAX_DIMENSION as f64 || height > MAX_DIMENSION as f64 {
                return Err(Error::InvalidGeometry(format!(
                    "Cannot derive an output size for {bounds} ({width} x {height})"
                )));
            }

            RasterSize::with_width_height(width as usize, height as usize)
        }
    };

    if size.is_empty() {
        return Err(Error::InvalidGeometry(format!(
            "Resampling to {bounds} results in an empty output size {size}"
        )));
    }

    let band_bytes = size
        .rows
        .checked_mul(size.cols)
        .and_then(|cells| cells.checked_mul(std::mem::size_of::<f64>()));
    if size.width() > MAX_DIMENSION || size.height() > MAX_DIMENSION || band_bytes.is_none_or(|bytes| bytes > isize::MAX as usize) {
        return Err(Error::InvalidGeometry(format!("Resample output size {size} is too large")));
    }

    GridGeometry::new(PixelRect::from_size(size), bounds)
}

fn bounds_in_raster_crs(raster: &Raster, bbox: &Bounds) -> Result<Bounds> {
    match (bbox.crs(), raster.crs()) {
        (None, Some(crs)) => Ok(bbox.clone().with_crs(crs.clone())),
        (Some(bbox_crs), Some(crs)) if bbox_crs != crs => {
            log::debug!("Reprojecting resample bounds from {bbox_crs} to {crs}");
            bbox.reproject(crs, raster.processor().edge_sample_count())
        }
        (Some(bbox_crs), None) => {
            // nothing to reproject to, the bounds are taken as raster coordinates
            log::warn!("Raster has no CRS, ignoring the {bbox_crs} CRS of the resample bounds");
            Ok(bbox.clone().without_crs())
        }
        _ => Ok(bbox.clone()),
    }
}
