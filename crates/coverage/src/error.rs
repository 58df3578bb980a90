use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Band count mismatch (expected {expected}, got {actual})")]
    BandCountMismatch { expected: usize, actual: usize },
    #[error("Unsupported interpolation: {0}")]
    UnsupportedInterpolation(String),
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    #[error("Invalid parameter '{parameter}' for operation '{operation}': {reason}")]
    InvalidParameter {
        operation: String,
        parameter: String,
        reason: String,
    },
    #[error("Division by zero: {0}")]
    DivideByZero(String),
    #[error("Raster dimensions do not match ({}x{}) <-> ({}x{})", .size1.0, .size1.1, .size2.0, .size2.1)]
    SizeMismatch {
        size1: (usize, usize),
        size2: (usize, usize),
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid coordinate reference system: {0}")]
    InvalidCrs(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Projection error: {0}")]
    Projection(#[from] proj4rs::errors::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(operation: &str, parameter: &str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            operation: operation.to_string(),
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }
}
