//! Materialized grid coverages.
//!
//! A [`GridCoverage`] is what the processing engine consumes and produces: a grid geometry, one
//! [`SampleDimension`] per band and the band samples as `f64` in row-major, north-to-south order.
//! No-data samples are stored as NaN regardless of the declared data type.

use crate::{Band, Bounds, Cell, Crs, DataType, Error, GridGeometry, Nodata, RasterSize, Result};

pub const DEFAULT_BLOCK_SIZE: usize = 256;

/// Metadata of a single band
#[derive(Debug, Clone, PartialEq)]
pub struct SampleDimension {
    name: Option<String>,
    data_type: DataType,
    nodata: Option<f64>,
}

impl SampleDimension {
    pub fn new(data_type: DataType) -> Self {
        let nodata = data_type.default_nodata_value();
        SampleDimension {
            name: None,
            data_type,
            nodata: if nodata.is_nan() { None } else { Some(nodata) },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The no-data value reported for the band, samples equal to it are stored as NaN
    pub fn with_nodata(mut self, nodata: Option<f64>) -> Self {
        self.nodata = nodata;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }
}

#[derive(Debug, Clone)]
pub struct GridCoverage {
    name: String,
    geometry: GridGeometry,
    dimensions: Vec<SampleDimension>,
    bands: Vec<Vec<f64>>,
    block_size: RasterSize,
}

impl GridCoverage {
    /// Creates a coverage from band samples in row-major, north-to-south order.
    /// Samples equal to the dimension's no-data value are converted to NaN.
    pub fn new(name: impl Into<String>, geometry: GridGeometry, dimensions: Vec<SampleDimension>, mut bands: Vec<Vec<f64>>) -> Result<Self> {
        check_bands(&geometry, &dimensions, &bands)?;

        for (band, dim) in bands.iter_mut().zip(dimensions.iter()) {
            if let Some(nodata) = dim.nodata.filter(|nod| !nod.is_nan()) {
                band.iter_mut().for_each(|v| v.init_nodata(nodata));
            }
        }

        Ok(GridCoverage::from_samples(name.into(), geometry, dimensions, bands))
    }

    /// Samples already use NaN as no-data, the dimension no-data values are not applied again
    fn from_samples(name: String, geometry: GridGeometry, dimensions: Vec<SampleDimension>, bands: Vec<Vec<f64>>) -> Self {
        let block_size = clipped_block_size(RasterSize::square(DEFAULT_BLOCK_SIZE), geometry.size());
        GridCoverage {
            name,
            geometry,
            dimensions,
            bands,
            block_size,
        }
    }

    /// Override the block size reported for this coverage, clipped to the grid size
    pub fn with_block_size(mut self, block_size: RasterSize) -> Self {
        self.block_size = clipped_block_size(block_size, self.size());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    pub fn bounds(&self) -> &Bounds {
        self.geometry.bounds()
    }

    /// The CRS embedded in the coverage envelope, if any
    pub fn crs(&self) -> Option<&Crs> {
        self.geometry.bounds().crs()
    }

    pub fn size(&self) -> RasterSize {
        self.geometry.size()
    }

    pub fn block_size(&self) -> RasterSize {
        self.block_size
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    pub fn dimensions(&self) -> &[SampleDimension] {
        &self.dimensions
    }

    pub fn band(&self, index: usize) -> Option<Band<'_>> {
        if index < self.bands.len() {
            Some(Band::new(self, index))
        } else {
            None
        }
    }

    pub fn bands(&self) -> impl Iterator<Item = Band<'_>> {
        (0..self.bands.len()).map(move |index| Band::new(self, index))
    }

    /// Samples of a band in storage order, NaN marks no-data
    pub fn band_samples(&self, index: usize) -> Option<&[f64]> {
        self.bands.get(index).map(Vec::as_slice)
    }

    pub(crate) fn all_band_samples(&self) -> &[Vec<f64>] {
        &self.bands
    }

    /// Value of a band at a pixel space cell, `None` for no-data or cells outside the grid
    pub fn value(&self, band: usize, cell: Cell) -> Option<f64> {
        let index = cell.storage_index(self.size())?;
        self.bands.get(band).map(|b| b[index]).filter(|v| !v.is_nodata())
    }

    /// The attribute name of a band: its name when set, its index otherwise
    pub fn band_label(&self, index: usize) -> String {
        self.dimensions
            .get(index)
            .and_then(|dim| dim.name.clone())
            .unwrap_or_else(|| index.to_string())
    }

    /// A coverage with the same band metadata on a new grid.
    /// The samples are internal samples: NaN is the only no-data marker.
    pub(crate) fn derive(&self, geometry: GridGeometry, bands: Vec<Vec<f64>>) -> Result<Self> {
        self.derive_with_dimensions(geometry, self.dimensions.clone(), bands)
    }

    /// A coverage with new band metadata, see [`GridCoverage::derive`]
    pub(crate) fn derive_with_dimensions(
        &self,
        geometry: GridGeometry,
        dimensions: Vec<SampleDimension>,
        bands: Vec<Vec<f64>>,
    ) -> Result<Self> {
        check_bands(&geometry, &dimensions, &bands)?;
        Ok(GridCoverage::from_samples(self.name.clone(), geometry, dimensions, bands))
    }
}

impl PartialEq for GridCoverage {
    fn eq(&self, other: &Self) -> bool {
        self.geometry == other.geometry
            && self.dimensions == other.dimensions
            && self.bands.len() == other.bands.len()
            && self.bands.iter().zip(other.bands.iter()).all(|(lhs, rhs)| {
                lhs.len() == rhs.len() && lhs.iter().zip(rhs.iter()).all(|(a, b)| a == b || (a.is_nan() && b.is_nan()))
            })
    }
}

fn check_bands(geometry: &GridGeometry, dimensions: &[SampleDimension], bands: &[Vec<f64>]) -> Result<()> {
    if bands.is_empty() {
        return Err(Error::InvalidArgument("A coverage requires at least one band".into()));
    }

    if dimensions.len() != bands.len() {
        return Err(Error::BandCountMismatch {
            expected: dimensions.len(),
            actual: bands.len(),
        });
    }

    let size = geometry.size();
    for (index, band) in bands.iter().enumerate() {
        if band.len() != size.cell_count() {
            return Err(Error::InvalidArgument(format!(
                "Band {index} contains {} samples, expected {} for a {size} grid",
                band.len(),
                size.cell_count()
            )));
        }
    }

    Ok(())
}

fn clipped_block_size(block_size: RasterSize, size: RasterSize) -> RasterSize {
    RasterSize::with_rows_cols(block_size.rows.min(size.rows), block_size.cols.min(size.cols))
}
