//! The [`Raster`] entity: a materialized grid coverage with its CRS and provenance.
//!
//! Rasters are immutable. Every transform resolves the geometry or parameters it needs,
//! dispatches a named operation to the [`CoverageProcessor`] and wraps the result in a new raster
//! that keeps the provenance and processor of its parent.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    ArrayNum, Band, Bounds, CellSize, Crs, Error, GridCoverage, GridGeometry, PixelRect, RasterSize, Result, SampleDimension,
    processing::{CoverageProcessor, Interpolation, Parameters, SoftwareProcessor, operations, params},
};

mod algebra;
mod features;
mod resample;
#[cfg(test)]
mod rastertests;

pub use algebra::Operand;
pub use features::Features;
pub use resample::resolve_resample_geometry;

const DEFAULT_NAME: &str = "raster";

/// Where a raster came from: the format it was decoded from and the source it was read from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Provenance {
    format: Option<String>,
    source: Option<PathBuf>,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct Raster {
    coverage: Arc<GridCoverage>,
    crs: Option<Crs>,
    provenance: Provenance,
    processor: Arc<dyn CoverageProcessor>,
}

impl Raster {
    /// Creates an in-memory raster from typed band data in row-major, north-to-south order.
    /// Values equal to the type's nodata value are treated as no-data.
    /// The raster CRS is taken from the bounds.
    pub fn create<T: ArrayNum>(size: RasterSize, bands: Vec<Vec<T>>, bounds: Bounds) -> Result<Raster> {
        let crs = bounds.crs().cloned();
        let geometry = GridGeometry::with_size(size, bounds)?;
        let dimensions = vec![SampleDimension::new(T::TYPE); bands.len()];
        let samples = bands
            .into_iter()
            .map(|band| band.into_iter().map(ArrayNum::to_sample).collect())
            .collect();

        let coverage = GridCoverage::new(DEFAULT_NAME, geometry, dimensions, samples)?;
        Ok(Raster::from_coverage(coverage, crs, Provenance::default()))
    }

    /// Creates a single band raster from rows of data, the first row is the northern one
    pub fn from_rows<T: ArrayNum>(rows: &[Vec<T>], bounds: Bounds) -> Result<Raster> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|row| row.len() != cols) {
            return Err(Error::InvalidArgument(format!(
                "All rows must have the same length (expected {cols}, got {})",
                row.len()
            )));
        }

        let data = rows.iter().flatten().copied().collect();
        Raster::create(RasterSize::with_rows_cols(rows.len(), cols), vec![data], bounds)
    }

    /// Wrap a decoded coverage.
    /// The CRS embedded in the coverage takes precedence, the declared CRS is used when the coverage has none.
    pub fn from_coverage(coverage: GridCoverage, declared_crs: Option<Crs>, provenance: Provenance) -> Raster {
        let crs = match (coverage.crs(), declared_crs) {
            (Some(embedded), Some(declared)) => {
                if *embedded != declared {
                    log::warn!("Coverage CRS {embedded} differs from the declared CRS {declared}, using {embedded}");
                }
                Some(embedded.clone())
            }
            (Some(embedded), None) => Some(embedded.clone()),
            (None, declared) => declared,
        };

        Raster {
            coverage: Arc::new(coverage),
            crs,
            provenance,
            processor: Arc::new(SoftwareProcessor::default()),
        }
    }

    /// Use a different processing engine for the transforms of this raster and the rasters derived from it
    pub fn with_processor(mut self, processor: Arc<dyn CoverageProcessor>) -> Raster {
        self.processor = processor;
        self
    }

    /// A raster derived from this one, keeping the provenance and processor
    fn derive(&self, coverage: GridCoverage) -> Raster {
        let crs = coverage.crs().cloned().or_else(|| self.crs.clone());
        Raster {
            coverage: Arc::new(coverage),
            crs,
            provenance: self.provenance.clone(),
            processor: self.processor.clone(),
        }
    }

    fn execute(&self, operation: &str, parameters: &Parameters) -> Result<Raster> {
        Ok(self.derive(self.processor.execute(operation, parameters)?))
    }

    /// The base name of the source file, else the coverage name, else "raster"
    pub fn name(&self) -> String {
        if let Some(file_name) = self.provenance.source().and_then(Path::file_name) {
            return file_name.to_string_lossy().into_owned();
        }

        if self.coverage.name().is_empty() {
            DEFAULT_NAME.to_string()
        } else {
            self.coverage.name().to_string()
        }
    }

    pub fn format(&self) -> Option<&str> {
        self.provenance.format()
    }

    pub fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    pub fn coverage(&self) -> &GridCoverage {
        &self.coverage
    }

    pub fn processor(&self) -> &Arc<dyn CoverageProcessor> {
        &self.processor
    }

    pub fn grid_geometry(&self) -> &GridGeometry {
        self.coverage.geometry()
    }

    /// The model space extent, carrying the raster CRS when the coverage embeds none
    pub fn extent(&self) -> Bounds {
        let bounds = self.coverage.bounds().clone();
        match (bounds.crs(), &self.crs) {
            (None, Some(crs)) => bounds.with_crs(crs.clone()),
            _ => bounds,
        }
    }

    /// Size in pixels
    pub fn size(&self) -> RasterSize {
        self.coverage.size()
    }

    /// Model space size of a single pixel
    pub fn pixel_size(&self) -> Result<CellSize> {
        let size = self.size();
        if size.is_empty() {
            return Err(Error::DivideByZero(format!("pixel size of a raster with size {size}")));
        }

        let extent = self.extent();
        Ok(CellSize::new(
            extent.width() / size.width() as f64,
            extent.height() / size.height() as f64,
        ))
    }

    pub fn block_size(&self) -> RasterSize {
        self.coverage.block_size()
    }

    pub fn band_count(&self) -> usize {
        self.coverage.band_count()
    }

    pub fn band(&self, index: usize) -> Option<Band<'_>> {
        self.coverage.band(index)
    }

    pub fn bands(&self) -> Vec<Band<'_>> {
        self.coverage.bands().collect()
    }

    /// Resample the raster to a model space bounding box or a pixel space rectangle and an optional size.
    /// See [`resolve_resample_geometry`] for how partial arguments are resolved.
    pub fn resample(&self, bbox: Option<&Bounds>, rect: Option<PixelRect>, size: Option<RasterSize>) -> Result<Raster> {
        let geometry = resolve_resample_geometry(self, bbox, rect, size)?;
        log::debug!("Resample {} to {} {}", self.name(), geometry.bounds(), geometry.size());

        let mut parameters = Parameters::new()
            .with(params::SOURCE, self.coverage.clone())
            .with(params::GRID_GEOMETRY, geometry);
        if let Some(crs) = &self.crs {
            parameters.insert(params::CRS, crs.clone());
        }

        self.execute(operations::RESAMPLE, &parameters)
    }

    /// Scale the pixel counts by independent factors, `interpolation` is one of nearest, bilinear or bicubic
    pub fn scale(&self, x: f64, y: f64, interpolation: &str) -> Result<Raster> {
        let interpolation: Interpolation = interpolation.parse()?;
        let parameters = Parameters::new()
            .with(params::SOURCE, self.coverage.clone())
            .with(params::X_SCALE, x)
            .with(params::Y_SCALE, y)
            .with(params::X_TRANSLATE, 0.0)
            .with(params::Y_TRANSLATE, 0.0)
            .with(params::INTERPOLATION, interpolation);

        self.execute(operations::SCALE, &parameters)
    }

    /// Clip the raster to a polygonal geometry in the raster CRS, cells outside of it become no-data
    pub fn crop(&self, geometry: impl Into<geo_types::Geometry<f64>>) -> Result<Raster> {
        let parameters = Parameters::new()
            .with(params::SOURCE, self.coverage.clone())
            .with(params::ROI, geometry.into());

        self.execute(operations::CROP, &parameters)
    }

    /// One point feature per pixel, located at the pixel center.
    /// The sequence starts at the south west pixel and proceeds column by column, then row by row.
    pub fn features(&self) -> Result<Features> {
        Ok(Features::new(self.processor.point_cursor(self.coverage.clone())?))
    }
}
