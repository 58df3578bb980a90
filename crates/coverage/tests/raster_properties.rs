use approx::assert_relative_eq;
use coverage::{Bounds, Cell, Crs, Error, PixelRect, Raster, RasterSize};

fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
    Bounds::new(min_x, min_y, max_x, max_y).expect("valid bounds").with_crs(Crs::wgs84())
}

fn pseudo_random_band(size: RasterSize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..size.cell_count())
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            1.0 + ((state >> 33) % 1000) as f64 / 10.0
        })
        .collect()
}

fn test_raster(size: RasterSize, band_count: usize, seed: u64) -> Raster {
    let bands = (0..band_count)
        .map(|band| pseudo_random_band(size, seed + band as u64))
        .collect();
    Raster::create::<f64>(size, bands, bounds(0.0, 0.0, 100.0, 50.0)).expect("valid raster")
}

fn samples(raster: &Raster, band: usize) -> Vec<f64> {
    raster.band(band).expect("band exists").samples().to_vec()
}

fn assert_same_samples(lhs: &Raster, rhs: &Raster) {
    assert_eq!(lhs.band_count(), rhs.band_count());
    for band in 0..lhs.band_count() {
        for (l, r) in samples(lhs, band).iter().zip(samples(rhs, band)) {
            assert_relative_eq!(*l, r, epsilon = 1e-9);
        }
    }
}

#[test]
fn resample_to_self_is_identity() {
    let raster = test_raster(RasterSize::with_width_height(20, 10), 3, 7);
    let resampled = raster.resample(None, None, None).unwrap();

    assert_eq!(resampled.extent(), raster.extent());
    assert_eq!(resampled.size(), raster.size());
    for (lhs, rhs) in resampled.bands().iter().zip(raster.bands()) {
        assert_eq!(lhs.statistics(), rhs.statistics());
    }
}

#[test]
fn resample_height_follows_current_aspect() {
    let raster = test_raster(RasterSize::with_width_height(20, 10), 1, 3);
    let bbox = bounds(10.0, 10.0, 60.0, 40.0);
    let resampled = raster.resample(Some(&bbox), None, None).unwrap();

    let width = resampled.size().width() as f64;
    assert_eq!(width, 10.0);
    assert_eq!(resampled.size().height() as f64, (width * raster.extent().aspect()).round());
}

#[test]
fn resample_pixel_rect() {
    let raster = test_raster(RasterSize::with_width_height(100, 50), 1, 11);
    let resampled = raster.resample(None, Some(PixelRect::new(10, 10, 20, 10)), None).unwrap();

    assert_relative_eq!(resampled.extent(), bounds(10.0, 10.0, 30.0, 20.0));
    assert_eq!(resampled.size(), RasterSize::with_width_height(20, 10));
}

#[test]
fn pixel_center_is_offset_by_half_a_pixel() {
    let raster = Raster::create::<f64>(RasterSize::square(10), vec![vec![0.0; 100]], bounds(0.0, 0.0, 10.0, 10.0)).unwrap();
    let center = raster.grid_geometry().pixel_center(Cell::from_row_col(0, 0));
    assert_relative_eq!(center.x(), 0.5);
    assert_relative_eq!(center.y(), 0.5);
}

#[test]
fn algebra_identities() {
    let raster = test_raster(RasterSize::with_width_height(8, 6), 2, 42);

    assert_same_samples(&raster.add(0.0).unwrap(), &raster);
    assert_same_samples(&raster.multiply(1.0).unwrap(), &raster);

    let zeros = raster.subtract(&raster).unwrap();
    let ones = raster.divide(&raster).unwrap();
    for band in 0..raster.band_count() {
        assert!(samples(&zeros, band).iter().all(|&v| v == 0.0));
        assert!(samples(&ones, band).iter().all(|&v| (v - 1.0).abs() < 1e-12));
    }
}

#[test]
fn vector_operand_broadcasts_like_a_scalar() {
    let raster = test_raster(RasterSize::with_width_height(5, 4), 3, 5);
    for constant in [-2.5, 0.0, 4.0] {
        let vector = vec![constant; raster.band_count()];
        assert_same_samples(&raster.add(vector.clone()).unwrap(), &raster.add(constant).unwrap());
        assert_same_samples(&raster.multiply(vector.clone()).unwrap(), &raster.multiply(constant).unwrap());
        assert_same_samples(&raster.subtract(vector).unwrap(), &raster.subtract(constant).unwrap());
    }
}

#[test]
fn add_and_multiply_are_commutative_and_associative() {
    let size = RasterSize::with_width_height(6, 6);
    let a = test_raster(size, 2, 1);
    let b = test_raster(size, 2, 100);
    let c = test_raster(size, 2, 1000);

    assert_same_samples(&(&a + &b).unwrap(), &(&b + &a).unwrap());
    assert_same_samples(&(&a * &b).unwrap(), &(&b * &a).unwrap());

    assert_same_samples(&((&a + &b).unwrap() + c.clone()).unwrap(), &(&a + &(&b + &c).unwrap()).unwrap());
    assert_same_samples(&((&a * &b).unwrap() * c.clone()).unwrap(), &(&a * &(&b * &c).unwrap()).unwrap());
}

#[test]
fn band_count_mismatch_leaves_operands_unchanged() {
    let size = RasterSize::with_width_height(4, 4);
    let three = test_raster(size, 3, 9);
    let four = test_raster(size, 4, 9);
    let three_before = three.coverage().clone();
    let four_before = four.coverage().clone();

    for result in [three.add(&four), three.subtract(&four), three.multiply(&four), three.divide(&four)] {
        assert!(matches!(result, Err(Error::BandCountMismatch { expected: 3, actual: 4 })));
    }

    assert!(matches!(
        three.add(vec![1.0, 2.0]),
        Err(Error::BandCountMismatch { expected: 3, actual: 2 })
    ));

    assert_eq!(three.coverage(), &three_before);
    assert_eq!(four.coverage(), &four_before);
}

#[test]
fn one_feature_per_pixel() {
    let raster = test_raster(RasterSize::with_width_height(7, 3), 2, 21);
    let features: Vec<_> = raster.features().unwrap().collect();
    assert_eq!(features.len(), 21);
    assert!(features.iter().all(|feature| feature.attributes().len() == 2));

    // first feature is the south west pixel
    assert_relative_eq!(features[0].geometry().x(), 100.0 / 14.0);
    assert_relative_eq!(features[0].geometry().y(), 50.0 / 6.0);
}

#[test]
fn scale_keeps_the_envelope() {
    let raster = test_raster(RasterSize::with_width_height(10, 4), 1, 77);
    let scaled = raster.scale(0.5, 2.0, "nearest").unwrap();

    assert_eq!(scaled.size(), RasterSize::with_width_height(5, 8));
    assert_relative_eq!(scaled.extent(), raster.extent());
}
