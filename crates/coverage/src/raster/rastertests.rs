#[generic_tests::define]
mod tests {
    use approx::assert_relative_eq;

    use crate::{
        ArrayNum, Bounds, CellSize, Crs, DataType, Error, Point, RasterSize,
        raster::Raster,
        testutils::{NOD, compare_fp_vectors, create_vec},
    };

    fn bounds_3x3() -> Bounds {
        Bounds::new(0.0, 0.0, 3.0, 3.0).unwrap().with_crs(Crs::wgs84())
    }

    fn raster<T: ArrayNum>(data: &[f64]) -> Raster {
        Raster::create(RasterSize::square(3), vec![create_vec::<T>(data)], bounds_3x3()).unwrap()
    }

    fn samples(raster: &Raster) -> &[f64] {
        raster.band(0).unwrap().samples()
    }

    #[test]
    fn accessors<T: ArrayNum>() {
        let ras = raster::<T>(&[1.0, 2.0, 3.0, 4.0, NOD, 6.0, 7.0, 8.0, 9.0]);

        assert_eq!(ras.name(), "raster");
        assert_eq!(ras.format(), None);
        assert_eq!(ras.crs(), Some(&Crs::wgs84()));
        assert_eq!(ras.size(), RasterSize::square(3));
        assert_eq!(ras.extent(), bounds_3x3());
        assert_relative_eq!(ras.pixel_size().unwrap(), CellSize::square(1.0));
        assert_eq!(ras.block_size(), RasterSize::square(3));
        assert_eq!(ras.band_count(), 1);
        assert_eq!(ras.bands()[0].data_type(), T::TYPE);
        assert!(samples(&ras)[4].is_nan());
    }

    #[test]
    fn add_nodata<T: ArrayNum>() {
        let raster1 = raster::<T>(&[NOD, 2.0, 2.0, 3.0, NOD, 3.0, 1.0, 1.0, 0.0]);
        let raster2 = raster::<T>(&[1.0, 3.0, 3.0, 3.0, NOD, 3.0, 3.0, 3.0, NOD]);
        let expected = create_vec::<f64>(&[NOD, 5.0, 5.0, 6.0, NOD, 6.0, 4.0, 4.0, NOD]);

        {
            let result = (&raster1 + &raster2).unwrap();
            assert!(compare_fp_vectors(samples(&result), &expected));
        }

        {
            let result = (raster1 + raster2).unwrap();
            assert!(compare_fp_vectors(samples(&result), &expected));
        }
    }

    #[test]
    fn multiply_nodata<T: ArrayNum>() {
        let raster1 = raster::<T>(&[NOD, 2.0, 2.0, 3.0, NOD, 3.0, 1.0, 1.0, 0.0]);
        let raster2 = raster::<T>(&[1.0, 3.0, 3.0, 3.0, NOD, 3.0, 3.0, 3.0, NOD]);

        let result = (&raster1 * &raster2).unwrap();
        assert!(compare_fp_vectors(
            samples(&result),
            &create_vec::<f64>(&[NOD, 6.0, 6.0, 9.0, NOD, 9.0, 3.0, 3.0, NOD])
        ));
    }

    #[test]
    fn scalar_operations<T: ArrayNum>() {
        let ras = raster::<T>(&[1.0, 2.0, NOD, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0]);

        let result = (&ras * 2.0).unwrap();
        assert!(compare_fp_vectors(
            samples(&result),
            &create_vec::<f64>(&[2.0, 4.0, NOD, 8.0, 10.0, 12.0, 14.0, 16.0, 20.0])
        ));

        let result = (&ras - 1.0).unwrap();
        assert!(compare_fp_vectors(
            samples(&result),
            &create_vec::<f64>(&[0.0, 1.0, NOD, 3.0, 4.0, 5.0, 6.0, 7.0, 9.0])
        ));

        let result = (&ras / 2.0).unwrap();
        assert!(compare_fp_vectors(
            samples(&result),
            &create_vec::<f64>(&[0.5, 1.0, NOD, 2.0, 2.5, 3.0, 3.5, 4.0, 5.0])
        ));

        let result = ras.add(vec![1.0]).unwrap();
        assert!(compare_fp_vectors(
            samples(&result),
            &create_vec::<f64>(&[2.0, 3.0, NOD, 5.0, 6.0, 7.0, 8.0, 9.0, 11.0])
        ));
    }

    #[test]
    fn subtract_and_divide_rasters<T: ArrayNum>() {
        let ras = raster::<T>(&[1.0, 2.0, NOD, 4.0, 0.0, 6.0, 7.0, 8.0, 10.0]);

        let zeros = (&ras - &ras).unwrap();
        assert!(compare_fp_vectors(
            samples(&zeros),
            &create_vec::<f64>(&[0.0, 0.0, NOD, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        ));

        // zero divisors become nodata
        let ones = (&ras / &ras).unwrap();
        assert!(compare_fp_vectors(
            samples(&ones),
            &create_vec::<f64>(&[1.0, 1.0, NOD, 1.0, NOD, 1.0, 1.0, 1.0, 1.0])
        ));
    }

    #[test]
    fn division_results_are_float64<T: ArrayNum>() {
        let ras = raster::<T>(&[3.0, 5.0, NOD, 4.0, 0.0, 6.0, 7.0, 8.0, 10.0]);
        let twos = raster::<T>(&[2.0; 9]);

        let by_raster = (&ras / &twos).unwrap();
        let by_scalar = (&ras / 2.0).unwrap();
        assert_eq!(by_raster.bands()[0].data_type(), DataType::Float64);
        assert_eq!(by_scalar.bands()[0].data_type(), DataType::Float64);
        assert!(compare_fp_vectors(samples(&by_raster), samples(&by_scalar)));
        assert_eq!(samples(&by_raster)[0], 1.5);
    }

    #[test]
    fn arithmetic_does_not_create_nodata<T: ArrayNum>() {
        let ras = raster::<T>(&[120.0, 2.0, NOD, 4.0, 0.0, 6.0, 7.0, 8.0, 10.0]);

        // 120 + 7 + 128 reaches the u8 sentinel
        let result = ras.add(7.0).unwrap().add(128.0).unwrap();
        assert_eq!(samples(&result)[0], 255.0);
        assert!(samples(&result)[2].is_nan());
        assert!(result.bands()[0].data_type().is_floating_point());

        let negated = (-&ras).unwrap();
        assert!(negated.bands()[0].data_type().is_floating_point());
        assert_eq!(negated.bands()[0].range(), Some((-120.0, 0.0)));
    }

    #[test]
    fn negate<T: ArrayNum>() {
        let ras = raster::<T>(&[1.0, 2.0, NOD, 4.0, 0.0, 6.0, 7.0, 8.0, 10.0]);
        let result = (-&ras).unwrap();
        assert!(compare_fp_vectors(
            samples(&result),
            &[-1.0, -2.0, f64::NAN, -4.0, 0.0, -6.0, -7.0, -8.0, -10.0]
        ));
    }

    #[test]
    fn operands_are_not_modified<T: ArrayNum>() {
        let data = [1.0, 2.0, NOD, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0];
        let ras = raster::<T>(&data);
        let before = samples(&ras).to_vec();

        let _ = (&ras + &ras).unwrap();
        let _ = (&ras * 3.0).unwrap();
        let _ = (-&ras).unwrap();

        assert!(compare_fp_vectors(samples(&ras), &before));
    }

    #[test]
    fn vector_operand_band_count<T: ArrayNum>() {
        let ras = raster::<T>(&[1.0; 9]);
        assert!(matches!(
            ras.multiply(vec![1.0, 2.0]),
            Err(Error::BandCountMismatch { expected: 1, actual: 2 })
        ));
        assert!(matches!(
            ras.add(Vec::<f64>::new()),
            Err(Error::BandCountMismatch { expected: 1, actual: 0 })
        ));
    }

    #[test]
    fn features<T: ArrayNum>() {
        let ras = raster::<T>(&[1.0, 2.0, 3.0, 4.0, NOD, 6.0, 7.0, 8.0, 9.0]);
        let features: Vec<_> = ras.features().unwrap().collect();

        assert_eq!(features.len(), 9);
        // the first feature is the south west pixel
        assert_eq!(features[0].geometry(), Point::new(0.5, 0.5));
        assert_eq!(features[0].attribute("0"), Some(7.0));
        assert_eq!(features[4].geometry(), Point::new(1.5, 1.5));
        assert_eq!(features[4].attribute("0"), None);
        assert_eq!(features[8].geometry(), Point::new(2.5, 2.5));
        assert_eq!(features[8].attribute("0"), Some(3.0));
    }

    #[instantiate_tests(<i8>)]
    mod sample_i8 {}

    #[instantiate_tests(<u8>)]
    mod sample_u8 {}

    #[instantiate_tests(<i16>)]
    mod sample_i16 {}

    #[instantiate_tests(<u16>)]
    mod sample_u16 {}

    #[instantiate_tests(<i32>)]
    mod sample_i32 {}

    #[instantiate_tests(<u32>)]
    mod sample_u32 {}

    #[instantiate_tests(<i64>)]
    mod sample_i64 {}

    #[instantiate_tests(<u64>)]
    mod sample_u64 {}

    #[instantiate_tests(<f32>)]
    mod sample_f32 {}

    #[instantiate_tests(<f64>)]
    mod sample_f64 {}
}

mod transforms {
    use approx::assert_relative_eq;

    use crate::{
        Bounds, Crs, Error, PixelRect, RasterSize,
        raster::{Provenance, Raster},
        testutils::{NOD, compare_fp_vectors, gradient_raster, test_raster_3x3},
    };

    #[test]
    fn name_and_format_from_provenance() {
        let ras = test_raster_3x3(&[0.0; 9]);
        let coverage = ras.coverage().clone();

        let ras = Raster::from_coverage(
            coverage,
            None,
            Provenance::new().with_format("GeoTIFF").with_source("/data/elevation.tif"),
        );
        assert_eq!(ras.name(), "elevation.tif");
        assert_eq!(ras.format(), Some("GeoTIFF"));

        // derived rasters keep their lineage
        let scaled = ras.scale(2.0, 2.0, "nearest").unwrap();
        assert_eq!(scaled.name(), "elevation.tif");
        assert_eq!(scaled.format(), Some("GeoTIFF"));
        let sum = (&scaled + 1.0).unwrap();
        assert_eq!(sum.format(), Some("GeoTIFF"));
    }

    #[test]
    fn embedded_crs_takes_precedence() {
        let ras = test_raster_3x3(&[0.0; 9]);
        let mercator = Crs::from_definition("EPSG:3857").unwrap();

        let ras = Raster::from_coverage(ras.coverage().clone(), Some(mercator), Provenance::default());
        assert_eq!(ras.crs(), Some(&Crs::wgs84()));
    }

    #[test]
    fn declared_crs_used_without_embedded_crs() {
        let ras = Raster::create(RasterSize::square(2), vec![vec![1.0, 2.0, 3.0, 4.0]], Bounds::new(0.0, 0.0, 2.0, 2.0).unwrap()).unwrap();
        assert!(ras.crs().is_none());
        assert!(ras.extent().crs().is_none());

        let ras = Raster::from_coverage(ras.coverage().clone(), Some(Crs::wgs84()), Provenance::default());
        assert_eq!(ras.crs(), Some(&Crs::wgs84()));
        assert_eq!(ras.extent().crs(), Some(&Crs::wgs84()));
    }

    #[test]
    fn from_rows() {
        let ras = Raster::from_rows(&[vec![1u8, 2, 3], vec![4, 5, 6]], Bounds::new(0.0, 0.0, 3.0, 2.0).unwrap()).unwrap();
        assert_eq!(ras.size(), RasterSize::with_rows_cols(2, 3));
        assert_eq!(ras.band(0).unwrap().samples(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        assert!(matches!(
            Raster::from_rows(&[vec![1u8, 2, 3], vec![4, 5]], Bounds::new(0.0, 0.0, 3.0, 2.0).unwrap()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn create_rejects_degenerate_input() {
        assert!(matches!(
            Raster::create(RasterSize::square(0), vec![Vec::<f32>::new()], Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap()),
            Err(Error::InvalidGeometry(_))
        ));
        assert!(matches!(
            Raster::create(RasterSize::square(2), vec![vec![1.0f32; 4]], Bounds::new(0.0, 0.0, 0.0, 1.0).unwrap()),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test_log::test]
    fn resample_rect() {
        let ras = gradient_raster(RasterSize::with_width_height(4, 4), Bounds::new(0.0, 0.0, 4.0, 4.0).unwrap(), 1);
        let result = ras.resample(None, Some(PixelRect::new(1, 1, 2, 2)), None).unwrap();

        assert_eq!(result.size(), RasterSize::square(2));
        assert_relative_eq!(result.extent(), Bounds::new(1.0, 1.0, 3.0, 3.0).unwrap());
        // gradient value = row * cols + col with rows counted from the south, storage starts north
        assert!(compare_fp_vectors(result.band(0).unwrap().samples(), &[9.0, 10.0, 5.0, 6.0]));
    }

    #[test]
    fn scale_unsupported_interpolation() {
        let ras = test_raster_3x3(&[0.0; 9]);
        assert!(matches!(ras.scale(2.0, 2.0, "lanczos"), Err(Error::UnsupportedInterpolation(_))));
    }

    #[test]
    fn scale_bilinear() {
        let ras = test_raster_3x3(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let result = ras.scale(1.0, 1.0, "bilinear").unwrap();
        assert_eq!(result.size(), RasterSize::square(3));
        assert!(compare_fp_vectors(result.band(0).unwrap().samples(), ras.band(0).unwrap().samples()));

        let result = ras.scale(2.0, 3.0, "bicubic").unwrap();
        assert_eq!(result.size(), RasterSize::with_rows_cols(9, 6));
        assert_eq!(result.extent(), ras.extent());
    }

    #[test]
    fn crop_polygon() {
        let ras = test_raster_3x3(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let result = ras.crop(&Bounds::new(1.0, 1.0, 3.0, 3.0).unwrap()).unwrap();

        assert_eq!(result.size(), RasterSize::square(2));
        assert_eq!(result.crs(), Some(&Crs::wgs84()));
        assert!(compare_fp_vectors(result.band(0).unwrap().samples(), &[2.0, 3.0, 5.0, 6.0]));
    }

    #[test]
    fn crop_point_is_rejected() {
        let ras = test_raster_3x3(&[NOD; 9]);
        assert!(matches!(
            ras.crop(geo_types::Point::new(1.0, 1.0)),
            Err(Error::InvalidGeometry(_))
        ));
    }

    #[test]
    fn features_close_on_drop() {
        let ras = test_raster_3x3(&[0.0; 9]);
        let mut features = ras.features().unwrap();
        assert!(features.next().is_some());
        assert!(!features.is_closed());

        let remaining: Vec<_> = features.by_ref().collect();
        assert_eq!(remaining.len(), 8);
        assert!(features.is_closed());
        assert!(features.next().is_none());
    }
}
