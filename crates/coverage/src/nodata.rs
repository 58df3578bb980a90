use num::ToPrimitive;

/// Per type sentinel marking a missing sample.
/// Unsigned integers use their maximum, signed integers their minimum and floats NaN.
///
/// Inside a [`crate::GridCoverage`] every no-data cell is stored as `f64::NODATA` (NaN), whatever the declared type.
pub trait Nodata: ToPrimitive + PartialEq + Sized + Copy {
    const NODATA: Self;

    #[inline]
    fn is_nodata(self) -> bool {
        self == Self::NODATA
    }

    /// Replace a foreign no-data value (e.g. -9999 in a decoded buffer) by `Self::NODATA`
    fn init_nodata(&mut self, nodata: Self) {
        if *self == nodata {
            *self = Self::NODATA;
        }
    }
}

macro_rules! nodata_sentinel {
    ( $($t:ident => $nodata:ident),+ ) => {
        $(impl Nodata for $t {
            const NODATA: $t = $t::$nodata;
        })+
    };
}

macro_rules! nodata_nan {
    ( $($t:ident),+ ) => {
        $(impl Nodata for $t {
            const NODATA: $t = $t::NAN;

            fn is_nodata(self) -> bool {
                self.is_nan()
            }
        })+
    };
}

nodata_sentinel!(u8 => MAX, u16 => MAX, u32 => MAX, u64 => MAX, i8 => MIN, i16 => MIN, i32 => MIN, i64 => MIN);
nodata_nan!(f32, f64);
