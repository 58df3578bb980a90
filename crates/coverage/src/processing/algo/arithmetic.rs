//! Band-wise arithmetic with no-data propagation.
//! A no-data operand produces a no-data result, so does a division by zero.
//!
//! Results can leave the range of an integer sample type, so integer bands are reported as `Float64`.
//! `Float32` bands stay `Float32` unless combined with `Float64` data. Division results are always `Float64`.

use crate::{DataType, Error, GridCoverage, Nodata, Result, SampleDimension};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantOp {
    Add,
    Subtract,
    Multiply,
    /// sample / constant
    DivideBy,
    /// constant / sample
    DivideInto,
}

impl ConstantOp {
    fn apply(self, sample: f64, constant: f64) -> f64 {
        if sample.is_nodata() {
            return f64::NODATA;
        }

        match self {
            ConstantOp::Add => sample + constant,
            ConstantOp::Subtract => sample - constant,
            ConstantOp::Multiply => sample * constant,
            ConstantOp::DivideBy => div_nodata_aware(sample, constant),
            ConstantOp::DivideInto => div_nodata_aware(constant, sample),
        }
    }

    fn is_division(self) -> bool {
        matches!(self, ConstantOp::DivideBy | ConstantOp::DivideInto)
    }
}

fn div_nodata_aware(lhs: f64, rhs: f64) -> f64 {
    if rhs == 0.0 { f64::NODATA } else { lhs / rhs }
}

/// Combine two coverages cell by cell, band by band
pub fn binary(lhs: &GridCoverage, rhs: &GridCoverage, op: impl Fn(f64, f64) -> f64) -> Result<GridCoverage> {
    if lhs.band_count() != rhs.band_count() {
        return Err(Error::BandCountMismatch {
            expected: lhs.band_count(),
            actual: rhs.band_count(),
        });
    }

    if lhs.size() != rhs.size() {
        return Err(Error::SizeMismatch {
            size1: (lhs.size().cols, lhs.size().rows),
            size2: (rhs.size().cols, rhs.size().rows),
        });
    }

    let bands = lhs
        .all_band_samples()
        .iter()
        .zip(rhs.all_band_samples())
        .map(|(l, r)| {
            l.iter()
                .zip(r.iter())
                .map(|(&a, &b)| if a.is_nodata() || b.is_nodata() { f64::NODATA } else { op(a, b) })
                .collect()
        })
        .collect();

    let dimensions = lhs
        .dimensions()
        .iter()
        .zip(rhs.dimensions())
        .map(|(l, r)| result_dimension(l, combined_type(l.data_type(), r.data_type())))
        .collect();

    lhs.derive_with_dimensions(lhs.geometry().clone(), dimensions, bands)
}

/// Apply one constant per band, a single constant is applied to every band
pub fn apply_constants(source: &GridCoverage, constants: &[f64], op: ConstantOp) -> Result<GridCoverage> {
    let band_count = source.band_count();
    if constants.len() != 1 && constants.len() != band_count {
        return Err(Error::BandCountMismatch {
            expected: band_count,
            actual: constants.len(),
        });
    }

    let bands = source
        .all_band_samples()
        .iter()
        .enumerate()
        .map(|(band, samples)| {
            let constant = if constants.len() == 1 { constants[0] } else { constants[band] };
            samples.iter().map(|&v| op.apply(v, constant)).collect()
        })
        .collect();

    let dimensions = source
        .dimensions()
        .iter()
        .map(|dim| {
            let data_type = if op.is_division() {
                DataType::Float64
            } else {
                floating_point_type(dim.data_type())
            };
            result_dimension(dim, data_type)
        })
        .collect();

    source.derive_with_dimensions(source.geometry().clone(), dimensions, bands)
}

/// Negate every sample
pub fn invert(source: &GridCoverage) -> Result<GridCoverage> {
    let bands = source
        .all_band_samples()
        .iter()
        .map(|samples| samples.iter().map(|&v| if v.is_nodata() { f64::NODATA } else { -v }).collect())
        .collect();

    let dimensions = source
        .dimensions()
        .iter()
        .map(|dim| result_dimension(dim, floating_point_type(dim.data_type())))
        .collect();

    source.derive_with_dimensions(source.geometry().clone(), dimensions, bands)
}

fn floating_point_type(data_type: DataType) -> DataType {
    match data_type {
        DataType::Float32 => DataType::Float32,
        _ => DataType::Float64,
    }
}

fn combined_type(lhs: DataType, rhs: DataType) -> DataType {
    match (lhs, rhs) {
        (DataType::Float32, DataType::Float32) => DataType::Float32,
        _ => DataType::Float64,
    }
}

/// Keeps the band name, the no-data marker of a floating point band is NaN
fn result_dimension(dim: &SampleDimension, data_type: DataType) -> SampleDimension {
    let result = SampleDimension::new(data_type);
    match dim.name() {
        Some(name) => result.with_name(name),
        None => result,
    }
}
