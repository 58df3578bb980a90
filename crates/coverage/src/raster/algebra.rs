//! Band-wise raster algebra.
//!
//! Every operator accepts an [`Operand`]: another raster with the same band count, a scalar applied to
//! every band or a vector holding one value per band. Results are new rasters, operands are never modified.

use crate::{
    Error, Raster, Result,
    processing::{Parameters, operations, params},
};

/// Right hand side of an algebra operation
#[derive(Debug, Clone)]
pub enum Operand<'a> {
    Raster(&'a Raster),
    Scalar(f64),
    Vector(Vec<f64>),
}

impl<'a> From<&'a Raster> for Operand<'a> {
    fn from(raster: &'a Raster) -> Self {
        Operand::Raster(raster)
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl From<Vec<f64>> for Operand<'_> {
    fn from(values: Vec<f64>) -> Self {
        Operand::Vector(values)
    }
}

impl From<&[f64]> for Operand<'_> {
    fn from(values: &[f64]) -> Self {
        Operand::Vector(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Operand<'_> {
    fn from(values: [f64; N]) -> Self {
        Operand::Vector(values.to_vec())
    }
}

impl Raster {
    /// Per band constants for a scalar or vector operand
    fn constants_for(&self, operand: Operand<'_>) -> Result<Vec<f64>> {
        match operand {
            Operand::Scalar(value) => Ok(vec![value]),
            Operand::Vector(values) => {
                if values.len() != self.band_count() {
                    return Err(Error::BandCountMismatch {
                        expected: self.band_count(),
                        actual: values.len(),
                    });
                }
                Ok(values)
            }
            Operand::Raster(_) => Err(Error::InvalidArgument("Expected a scalar or vector operand".into())),
        }
    }

    fn check_band_count(&self, other: &Raster) -> Result<()> {
        if self.band_count() != other.band_count() {
            return Err(Error::BandCountMismatch {
                expected: self.band_count(),
                actual: other.band_count(),
            });
        }
        Ok(())
    }

    fn raster_op(&self, operation: &str, other: &Raster) -> Result<Raster> {
        self.check_band_count(other)?;
        let parameters = Parameters::new()
            .with(params::SOURCE0, self.coverage.clone())
            .with(params::SOURCE1, other.coverage.clone());
        self.execute(operation, &parameters)
    }

    fn constant_op(&self, operation: &str, constants: Vec<f64>) -> Result<Raster> {
        let parameters = Parameters::new()
            .with(params::SOURCE, self.coverage.clone())
            .with(params::CONSTANTS, constants);
        self.execute(operation, &parameters)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Raster> {
        match other.into() {
            Operand::Raster(other) => self.raster_op(operations::ADD, other),
            operand => self.constant_op(operations::ADD_CONST, self.constants_for(operand)?),
        }
    }

    /// Raster operands are subtracted as `self + (-other)`
    pub fn subtract<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Raster> {
        match other.into() {
            Operand::Raster(other) => {
                self.check_band_count(other)?;
                self.add(&other.negate()?)
            }
            operand => self.constant_op(operations::SUBTRACT_CONST, self.constants_for(operand)?),
        }
    }

    pub fn multiply<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Raster> {
        match other.into() {
            Operand::Raster(other) => self.raster_op(operations::MULTIPLY, other),
            operand => self.constant_op(operations::MULTIPLY_CONST, self.constants_for(operand)?),
        }
    }

    /// Raster operands are divided as `self * (1 / other)`.
    /// Cells with a zero divisor become no-data.
    pub fn divide<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Raster> {
        match other.into() {
            Operand::Raster(other) => {
                self.check_band_count(other)?;
                let reciprocal = other.constant_op(operations::DIVIDE_INTO_CONST, vec![1.0])?;
                self.multiply(&reciprocal)
            }
            operand => self.constant_op(operations::DIVIDE_BY_CONST, self.constants_for(operand)?),
        }
    }

    pub fn negate(&self) -> Result<Raster> {
        let parameters = Parameters::new().with(params::SOURCE, self.coverage.clone());
        self.execute(operations::INVERT, &parameters)
    }
}

macro_rules! raster_op {
    ($op_trait:ident, $op_fn:ident, $method:ident) => {
        impl std::ops::$op_trait<&Raster> for &Raster {
            type Output = Result<Raster>;

            fn $op_fn(self, other: &Raster) -> Result<Raster> {
                Raster::$method(self, other)
            }
        }

        impl std::ops::$op_trait<Raster> for Raster {
            type Output = Result<Raster>;

            fn $op_fn(self, other: Raster) -> Result<Raster> {
                Raster::$method(&self, &other)
            }
        }

        impl std::ops::$op_trait<f64> for &Raster {
            type Output = Result<Raster>;

            fn $op_fn(self, scalar: f64) -> Result<Raster> {
                Raster::$method(self, scalar)
            }
        }

        impl std::ops::$op_trait<f64> for Raster {
            type Output = Result<Raster>;

            fn $op_fn(self, scalar: f64) -> Result<Raster> {
                Raster::$method(&self, scalar)
            }
        }

        impl std::ops::$op_trait<Vec<f64>> for &Raster {
            type Output = Result<Raster>;

            fn $op_fn(self, values: Vec<f64>) -> Result<Raster> {
                Raster::$method(self, values)
            }
        }
    };
}

raster_op!(Add, add, add);
raster_op!(Sub, sub, subtract);
raster_op!(Mul, mul, multiply);
raster_op!(Div, div, divide);

impl std::ops::Neg for &Raster {
    type Output = Result<Raster>;

    fn neg(self) -> Result<Raster> {
        Raster::negate(self)
    }
}

impl std::ops::Neg for Raster {
    type Output = Result<Raster>;

    fn neg(self) -> Result<Raster> {
        Raster::negate(&self)
    }
}
