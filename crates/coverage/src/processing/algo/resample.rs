use crate::{
    Crs, GridCoverage, GridGeometry, Nodata, Result,
    processing::Interpolation,
    srs::CoordinateTransformer,
};

/// Resample the source onto the target grid.
///
/// The target grid bounds are interpreted in `target_crs`, falling back to the CRS of the target bounds
/// and then to the source CRS. Target bounds in a different CRS than `target_crs` are reprojected first.
/// When the source and target CRS differ every target pixel center is transformed to the source CRS before sampling.
pub fn resample(
    source: &GridCoverage,
    target_crs: Option<&Crs>,
    target: &GridGeometry,
    interpolation: Interpolation,
    edge_sample_count: usize,
) -> Result<GridCoverage> {
    let target_crs = target_crs.or(target.bounds().crs()).or(source.crs()).cloned();

    let mut target_bounds = target.bounds().clone();
    if let (Some(bounds_crs), Some(crs)) = (target_bounds.crs(), &target_crs) {
        if bounds_crs != crs {
            target_bounds = target_bounds.reproject(crs, edge_sample_count)?;
        }
    }

    target_bounds = match &target_crs {
        Some(crs) => target_bounds.with_crs(crs.clone()),
        None => target_bounds,
    };

    let target = GridGeometry::new(target.rect(), target_bounds)?;

    let transformer = match (&target_crs, source.crs()) {
        (Some(target_crs), Some(source_crs)) if target_crs != source_crs => {
            log::debug!("Resampling from {source_crs} to {target_crs}");
            Some(CoordinateTransformer::new(target_crs, source_crs)?)
        }
        _ => None,
    };

    let bands = resample_bands(source, &target, interpolation, transformer.as_ref());
    source.derive(target, bands)
}

/// Sample every band of the source at the pixel centers of the target grid (storage order)
pub(super) fn resample_bands(
    source: &GridCoverage,
    target: &GridGeometry,
    interpolation: Interpolation,
    transformer: Option<&CoordinateTransformer>,
) -> Vec<Vec<f64>> {
    let target_size = target.size();
    let source_size = source.size();
    let source_geometry = source.geometry();

    let mut positions = Vec::with_capacity(target_size.cell_count());
    for row in 0..target_size.rows {
        for col in 0..target_size.cols {
            let mut center = target.storage_cell_center(row, col);
            if let Some(trans) = transformer {
                match trans.transform_point(center) {
                    Ok(p) => center = p,
                    Err(_) => {
                        // outside of the projection domain
                        positions.push(None);
                        continue;
                    }
                }
            }

            positions.push(Some(source_geometry.storage_position(center)));
        }
    }

    source
        .all_band_samples()
        .iter()
        .map(|samples| {
            positions
                .iter()
                .map(|pos| match pos {
                    Some((col, row)) => interpolation.sample(samples, source_size, *col, *row),
                    None => f64::NODATA,
                })
                .collect()
        })
        .collect()
}
