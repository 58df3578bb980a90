//! Grid algorithms of the software processing engine.

mod arithmetic;
mod crop;
mod interpolation;
mod points;
mod resample;
mod scale;

pub use interpolation::Interpolation;

pub(crate) use arithmetic::{ConstantOp, apply_constants, binary, invert};
pub(crate) use crop::crop;
pub(crate) use points::PointCursor;
pub(crate) use resample::resample;
pub(crate) use scale::scale;
