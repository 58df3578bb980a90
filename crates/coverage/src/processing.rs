//! Operation dispatch to a coverage processing engine.
//!
//! A [`CoverageProcessor`] executes named grid operations against a parameter map and returns a new
//! [`GridCoverage`]. It holds no geometry policy: callers resolve grid geometries and constants
//! before dispatching. [`SoftwareProcessor`] is the in-process engine used by default.

use std::sync::Arc;

use crate::{Feature, GridCoverage, RasterSize, Result, srs::DEFAULT_EDGE_SAMPLE_COUNT};

mod algo;
mod parameters;
mod software;

pub use algo::Interpolation;
pub use parameters::ParameterValue;
pub use parameters::Parameters;
pub use software::SoftwareProcessor;

/// Names of the operations understood by the processing engines
pub mod operations {
    pub const RESAMPLE: &str = "Resample";
    pub const SCALE: &str = "Scale";
    pub const CROP: &str = "Crop";
    pub const ADD: &str = "Add";
    pub const MULTIPLY: &str = "Multiply";
    pub const ADD_CONST: &str = "AddConst";
    pub const SUBTRACT_CONST: &str = "SubtractConst";
    pub const MULTIPLY_CONST: &str = "MultiplyConst";
    pub const DIVIDE_BY_CONST: &str = "DivideByConst";
    pub const DIVIDE_INTO_CONST: &str = "DivideIntoConst";
    pub const INVERT: &str = "Invert";
}

/// Names of the operation parameters
pub mod params {
    pub const SOURCE: &str = "Source";
    pub const SOURCE0: &str = "Source0";
    pub const SOURCE1: &str = "Source1";
    pub const CONSTANTS: &str = "constants";
    pub const CRS: &str = "CoordinateReferenceSystem";
    pub const GRID_GEOMETRY: &str = "GridGeometry";
    pub const INTERPOLATION: &str = "Interpolation";
    pub const X_SCALE: &str = "xScale";
    pub const Y_SCALE: &str = "yScale";
    pub const X_TRANSLATE: &str = "xTranslate";
    pub const Y_TRANSLATE: &str = "yTranslate";
    pub const ROI: &str = "ROI";
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingOptions {
    /// Interpolation used by the resample operation when none is passed (default = `Interpolation::Nearest`)
    pub resample_interpolation: Interpolation,
    /// Block size reported for produced coverages, clipped to the coverage size (default = 256x256)
    pub tile_size: RasterSize,
    /// Number of points sampled along each edge when bounds are reprojected (default = 25)
    pub edge_sample_count: usize,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            resample_interpolation: Interpolation::Nearest,
            tile_size: RasterSize::square(crate::coverage::DEFAULT_BLOCK_SIZE),
            edge_sample_count: DEFAULT_EDGE_SAMPLE_COUNT,
        }
    }
}

/// Uniform entry point of a grid processing engine
pub trait CoverageProcessor: Send + Sync + std::fmt::Debug {
    /// Execute the named operation.
    /// Fails with `UnknownOperation` for unsupported names and `InvalidParameter` for missing,
    /// mistyped or unexpected parameters.
    fn execute(&self, operation: &str, parameters: &Parameters) -> Result<GridCoverage>;

    /// Open a cursor producing one point feature per cell of the coverage
    fn point_cursor(&self, coverage: Arc<GridCoverage>) -> Result<Box<dyn FeatureCursor>>;

    /// Points sampled along each edge when bounds are reprojected for this engine
    fn edge_sample_count(&self) -> usize {
        DEFAULT_EDGE_SAMPLE_COUNT
    }
}

/// Engine side cursor over point features.
/// `close` releases the cursor, no features are produced afterwards.
pub trait FeatureCursor {
    fn next_feature(&mut self) -> Option<Feature>;
    fn close(&mut self);
}
