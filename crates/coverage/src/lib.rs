#![warn(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Raster algebra and resampling on georeferenced grid coverages.
//!
//! A [`Raster`] wraps a materialized [`GridCoverage`] together with its CRS and provenance.
//! Every transform (resample, scale, crop, algebra) resolves its geometry and parameters
//! and hands them to a [`CoverageProcessor`], which returns a new coverage.

pub type Result<T = ()> = std::result::Result<T, Error>;

mod arraynum;
mod band;
mod bounds;
mod cell;
mod coverage;
pub mod crs;
mod datatype;
mod error;
mod feature;
mod geotransform;
mod gridgeometry;
mod nodata;
pub mod processing;
pub mod raster;
mod rastersize;
pub mod srs;

#[cfg(test)]
mod testutils;

#[doc(inline)]
pub use arraynum::ArrayNum;
#[doc(inline)]
pub use band::Band;
#[doc(inline)]
pub use band::BandStatistics;
#[doc(inline)]
pub use bounds::Bounds;
pub use cell::Cell;
pub use cell::CellIterator;
#[doc(inline)]
pub use coverage::GridCoverage;
#[doc(inline)]
pub use coverage::SampleDimension;
#[doc(inline)]
pub use crs::Crs;
#[doc(inline)]
pub use datatype::DataType;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use feature::Feature;
#[doc(inline)]
pub use geotransform::GeoTransform;
#[doc(inline)]
pub use gridgeometry::CellSize;
#[doc(inline)]
pub use gridgeometry::GridGeometry;
#[doc(inline)]
pub use gridgeometry::PixelRect;
pub use nodata::Nodata;
#[doc(inline)]
pub use processing::CoverageProcessor;
#[doc(inline)]
pub use processing::Interpolation;
#[doc(inline)]
pub use processing::ProcessingOptions;
#[doc(inline)]
pub use processing::SoftwareProcessor;
#[doc(inline)]
pub use raster::Operand;
#[doc(inline)]
pub use raster::Provenance;
#[doc(inline)]
pub use raster::Raster;
#[doc(inline)]
pub use rastersize::RasterSize;

pub type Point<T = f64> = geo_types::Point<T>;
