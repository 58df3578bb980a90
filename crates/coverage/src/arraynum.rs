use crate::{DataType, Nodata};

// Type requirements for sample values accepted when building a raster from typed data
pub trait ArrayNum: Copy + Nodata + num::NumCast + std::fmt::Debug {
    const TYPE: DataType;

    /// Converts the value to the internal sample representation, nodata becomes NaN
    #[inline]
    fn to_sample(self) -> f64 {
        if self.is_nodata() {
            f64::NODATA
        } else {
            self.to_f64().unwrap_or(f64::NODATA)
        }
    }

    /// Converts an internal sample back to the typed representation, NaN becomes the type's nodata value
    #[inline]
    fn from_sample(sample: f64) -> Self {
        if sample.is_nodata() {
            Self::NODATA
        } else {
            num::NumCast::from(sample).unwrap_or(Self::NODATA)
        }
    }
}

macro_rules! arraynum_impl {
    ($t:ty, $data_type:ident) => {
        impl ArrayNum for $t {
            const TYPE: DataType = DataType::$data_type;
        }
    };
}

arraynum_impl!(i8, Int8);
arraynum_impl!(i16, Int16);
arraynum_impl!(i32, Int32);
arraynum_impl!(i64, Int64);
arraynum_impl!(u8, Uint8);
arraynum_impl!(u16, Uint16);
arraynum_impl!(u32, Uint32);
arraynum_impl!(u64, Uint64);
arraynum_impl!(f32, Float32);
arraynum_impl!(f64, Float64);
