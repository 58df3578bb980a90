use crate::{Error, Result};

/// The declared sample type of a band.
/// Samples are processed as `f64`, the data type is kept as band metadata and determines the default nodata value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum DataType {
    Int8 = 0,
    Uint8 = 1,
    Int16 = 2,
    Uint16 = 3,
    Int32 = 4,
    Uint32 = 5,
    Int64 = 6,
    Uint64 = 7,
    Float32 = 8,
    Float64 = 9,
}

impl DataType {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
        }
    }

    pub fn is_floating_point(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    pub fn default_nodata_value(&self) -> f64 {
        match self {
            Self::Int8 => i8::MIN as f64,
            Self::Uint8 => u8::MAX as f64,
            Self::Int16 => i16::MIN as f64,
            Self::Uint16 => u16::MAX as f64,
            Self::Int32 => i32::MIN as f64,
            Self::Uint32 => u32::MAX as f64,
            Self::Int64 => i64::MIN as f64,
            Self::Uint64 => u64::MAX as f64,
            Self::Float32 | Self::Float64 => f64::NAN,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl std::str::FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "int8" => Self::Int8,
            "uint8" | "byte" => Self::Uint8,
            "int16" => Self::Int16,
            "uint16" => Self::Uint16,
            "int32" => Self::Int32,
            "uint32" => Self::Uint32,
            "int64" => Self::Int64,
            "uint64" => Self::Uint64,
            "float32" => Self::Float32,
            "float64" | "double" => Self::Float64,
            _ => return Err(Error::InvalidArgument(format!("Unknown data type: {s}"))),
        })
    }
}
