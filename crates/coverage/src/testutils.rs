use approx::relative_eq;

use crate::{ArrayNum, Bounds, Raster, RasterSize};

pub const NOD: f64 = 255.0;

pub fn create_vec<T: ArrayNum>(data: &[f64]) -> Vec<T> {
    data.iter()
        .map(|&v| {
            if relative_eq!(v, NOD) {
                T::NODATA
            } else {
                num::NumCast::from(v).expect("f64 could not be converted to the specified type")
            }
        })
        .collect()
}

/// Same as `create_vec` but produces internal samples (nodata as NaN)
pub fn create_samples(data: &[f64]) -> Vec<f64> {
    create_vec::<f64>(data)
}

pub fn compare_fp_vectors(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a.iter().zip(b.iter()).all(|(a, b)| {
            if a.is_nan() || b.is_nan() {
                return a.is_nan() && b.is_nan();
            }

            relative_eq!(a, b, epsilon = 1e-9)
        })
}

/// A 3x3 single band raster covering (0, 0) - (3, 3) in EPSG:4326
pub fn test_raster_3x3(data: &[f64]) -> Raster {
    test_raster(RasterSize::square(3), vec![data.to_vec()], Bounds::new(0.0, 0.0, 3.0, 3.0).expect("bounds"))
}

pub fn test_raster(size: RasterSize, bands: Vec<Vec<f64>>, bounds: Bounds) -> Raster {
    let bounds = bounds.with_crs(crate::crs::Crs::wgs84());
    Raster::create(size, bands.iter().map(|b| create_samples(b)).collect(), bounds).expect("Failed to create test raster")
}

/// Raster whose value at each pixel is `row * cols + col` with rows counted from the south
pub fn gradient_raster(size: RasterSize, bounds: Bounds, band_count: usize) -> Raster {
    let bands = (0..band_count)
        .map(|band| {
            let mut data = Vec::with_capacity(size.cell_count());
            for storage_row in 0..size.rows {
                let row = size.rows - 1 - storage_row;
                for col in 0..size.cols {
                    data.push((row * size.cols + col) as f64 + band as f64 * 1000.0);
                }
            }
            data
        })
        .collect();

    Raster::create(size, bands, bounds).expect("Failed to create gradient raster")
}
