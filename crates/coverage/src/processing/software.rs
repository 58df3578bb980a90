use std::sync::Arc;

use crate::{
    Crs, Error, GridCoverage, GridGeometry, Result,
    processing::{
        CoverageProcessor, FeatureCursor, Interpolation, ParameterValue, Parameters, ProcessingOptions,
        algo::{self, ConstantOp},
        operations, params,
    },
};

/// In-process processing engine implementing every operation on `f64` samples
#[derive(Debug, Clone, Default)]
pub struct SoftwareProcessor {
    options: ProcessingOptions,
}

impl SoftwareProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ProcessingOptions) -> Self {
        SoftwareProcessor { options }
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    fn constant_op(&self, operation: &str, parameters: &Parameters, op: ConstantOp) -> Result<GridCoverage> {
        let args = Args::new(operation, parameters, &[params::SOURCE, params::CONSTANTS])?;
        let constants = args.constants(params::CONSTANTS)?;
        if constants.is_empty() {
            return Err(Error::invalid_parameter(operation, params::CONSTANTS, "at least one constant is required"));
        }

        algo::apply_constants(args.coverage(params::SOURCE)?, constants, op)
    }

    fn binary_op(&self, operation: &str, parameters: &Parameters, op: impl Fn(f64, f64) -> f64) -> Result<GridCoverage> {
        let args = Args::new(operation, parameters, &[params::SOURCE0, params::SOURCE1])?;
        algo::binary(args.coverage(params::SOURCE0)?, args.coverage(params::SOURCE1)?, op)
    }
}

impl CoverageProcessor for SoftwareProcessor {
    fn execute(&self, operation: &str, parameters: &Parameters) -> Result<GridCoverage> {
        log::debug!(
            "Execute {operation} ({})",
            parameters.names().collect::<Vec<_>>().join(", ")
        );

        let result = match operation {
            operations::RESAMPLE => {
                let args = Args::new(
                    operation,
                    parameters,
                    &[params::SOURCE, params::CRS, params::GRID_GEOMETRY, params::INTERPOLATION],
                )?;

                algo::resample(
                    args.coverage(params::SOURCE)?,
                    args.optional_crs(params::CRS)?,
                    args.grid_geometry(params::GRID_GEOMETRY)?,
                    args.optional_interpolation(params::INTERPOLATION)?
                        .unwrap_or(self.options.resample_interpolation),
                    self.options.edge_sample_count,
                )
            }
            operations::SCALE => {
                let args = Args::new(
                    operation,
                    parameters,
                    &[
                        params::SOURCE,
                        params::X_SCALE,
                        params::Y_SCALE,
                        params::X_TRANSLATE,
                        params::Y_TRANSLATE,
                        params::INTERPOLATION,
                    ],
                )?;

                algo::scale(
                    args.coverage(params::SOURCE)?,
                    args.number(params::X_SCALE)?,
                    args.number(params::Y_SCALE)?,
                    args.optional_number(params::X_TRANSLATE)?.unwrap_or(0.0),
                    args.optional_number(params::Y_TRANSLATE)?.unwrap_or(0.0),
                    args.optional_interpolation(params::INTERPOLATION)?.unwrap_or_default(),
                )
            }
            operations::CROP => {
                let args = Args::new(operation, parameters, &[params::SOURCE, params::ROI])?;
                algo::crop(args.coverage(params::SOURCE)?, args.geometry(params::ROI)?)
            }
            operations::ADD => self.binary_op(operation, parameters, |a, b| a + b),
            operations::MULTIPLY => self.binary_op(operation, parameters, |a, b| a * b),
            operations::ADD_CONST => self.constant_op(operation, parameters, ConstantOp::Add),
            operations::SUBTRACT_CONST => self.constant_op(operation, parameters, ConstantOp::Subtract),
            operations::MULTIPLY_CONST => self.constant_op(operation, parameters, ConstantOp::Multiply),
            operations::DIVIDE_BY_CONST => self.constant_op(operation, parameters, ConstantOp::DivideBy),
            operations::DIVIDE_INTO_CONST => self.constant_op(operation, parameters, ConstantOp::DivideInto),
            operations::INVERT => {
                let args = Args::new(operation, parameters, &[params::SOURCE])?;
                algo::invert(args.coverage(params::SOURCE)?)
            }
            _ => return Err(Error::UnknownOperation(operation.to_string())),
        }?;

        Ok(result.with_block_size(self.options.tile_size))
    }

    fn point_cursor(&self, coverage: Arc<GridCoverage>) -> Result<Box<dyn FeatureCursor>> {
        Ok(Box::new(algo::PointCursor::new(coverage)))
    }

    fn edge_sample_count(&self) -> usize {
        self.options.edge_sample_count
    }
}

/// Typed access to the parameters of one operation
struct Args<'a> {
    operation: &'a str,
    parameters: &'a Parameters,
}

impl<'a> Args<'a> {
    /// Rejects parameters the operation does not declare
    fn new(operation: &'a str, parameters: &'a Parameters, declared: &[&str]) -> Result<Self> {
        if let Some(unknown) = parameters.names().find(|name| !declared.contains(name)) {
            return Err(Error::invalid_parameter(operation, unknown, "unknown parameter"));
        }

        Ok(Args { operation, parameters })
    }

    fn required(&self, name: &str) -> Result<&'a ParameterValue> {
        self.parameters
            .get(name)
            .ok_or_else(|| Error::invalid_parameter(self.operation, name, "missing required parameter"))
    }

    fn mismatch(&self, name: &str, expected: &str, actual: &ParameterValue) -> Error {
        Error::invalid_parameter(self.operation, name, format!("expected {expected}, got {}", actual.kind()))
    }

    fn coverage(&self, name: &str) -> Result<&'a GridCoverage> {
        match self.required(name)? {
            ParameterValue::Coverage(cov) => Ok(cov.as_ref()),
            other => Err(self.mismatch(name, "coverage", other)),
        }
    }

    fn constants(&self, name: &str) -> Result<&'a [f64]> {
        match self.required(name)? {
            ParameterValue::Constants(values) => Ok(values.as_slice()),
            other => Err(self.mismatch(name, "constants", other)),
        }
    }

    fn number(&self, name: &str) -> Result<f64> {
        match self.required(name)? {
            ParameterValue::Number(value) => Ok(*value),
            other => Err(self.mismatch(name, "number", other)),
        }
    }

    fn optional_number(&self, name: &str) -> Result<Option<f64>> {
        match self.parameters.get(name) {
            None => Ok(None),
            Some(_) => self.number(name).map(Some),
        }
    }

    fn grid_geometry(&self, name: &str) -> Result<&'a GridGeometry> {
        match self.required(name)? {
            ParameterValue::GridGeometry(geometry) => Ok(geometry),
            other => Err(self.mismatch(name, "grid geometry", other)),
        }
    }

    fn geometry(&self, name: &str) -> Result<&'a geo_types::Geometry<f64>> {
        match self.required(name)? {
            ParameterValue::Geometry(geometry) => Ok(geometry),
            other => Err(self.mismatch(name, "geometry", other)),
        }
    }

    fn optional_crs(&self, name: &str) -> Result<Option<&'a Crs>> {
        match self.parameters.get(name) {
            None => Ok(None),
            Some(ParameterValue::Crs(crs)) => Ok(Some(crs)),
            Some(other) => Err(self.mismatch(name, "coordinate reference system", other)),
        }
    }

    fn optional_interpolation(&self, name: &str) -> Result<Option<Interpolation>> {
        match self.parameters.get(name) {
            None => Ok(None),
            Some(ParameterValue::Interpolation(interp)) => Ok(Some(*interp)),
            Some(other) => Err(self.mismatch(name, "interpolation", other)),
        }
    }
}
