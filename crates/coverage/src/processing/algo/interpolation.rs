use crate::{Error, Nodata, RasterSize, Result};

/// Kernel used to sample a band at a fractional storage position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Interpolation {
    #[default]
    Nearest,
    Bilinear,
    Bicubic,
}

impl Interpolation {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Bilinear => "bilinear",
            Self::Bicubic => "bicubic",
        }
    }

    /// Sample the band at storage position (col, row), integer positions address pixel centers.
    /// Positions outside the grid yield no-data. When the kernel support touches a no-data
    /// sample the nearest neighbour value is used instead.
    pub fn sample(&self, samples: &[f64], size: RasterSize, col: f64, row: f64) -> f64 {
        let Some(nearest) = nearest(samples, size, col, row) else {
            return f64::NODATA;
        };

        let interpolated = match self {
            Self::Nearest => return nearest,
            Self::Bilinear => bilinear(samples, size, col, row),
            Self::Bicubic => bicubic(samples, size, col, row),
        };

        if interpolated.is_nodata() { nearest } else { interpolated }
    }
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl std::str::FromStr for Interpolation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "nearestneighbor" | "nearest-neighbor" | "nn" => Self::Nearest,
            "bilinear" | "linear" => Self::Bilinear,
            "bicubic" | "cubic" => Self::Bicubic,
            _ => return Err(Error::UnsupportedInterpolation(s.to_string())),
        })
    }
}

fn nearest(samples: &[f64], size: RasterSize, col: f64, row: f64) -> Option<f64> {
    let c = (col + 0.5).floor();
    let r = (row + 0.5).floor();
    if c < 0.0 || r < 0.0 || c >= size.cols as f64 || r >= size.rows as f64 {
        return None;
    }

    Some(samples[r as usize * size.cols + c as usize])
}

/// Sample with the index clamped to the grid edges
fn clamped(samples: &[f64], size: RasterSize, col: i64, row: i64) -> f64 {
    let c = col.clamp(0, size.cols as i64 - 1) as usize;
    let r = row.clamp(0, size.rows as i64 - 1) as usize;
    samples[r * size.cols + c]
}

fn bilinear(samples: &[f64], size: RasterSize, col: f64, row: f64) -> f64 {
    let x0 = col.floor();
    let y0 = row.floor();
    let fx = col - x0;
    let fy = row - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let v00 = clamped(samples, size, x0, y0);
    let v10 = clamped(samples, size, x0 + 1, y0);
    let v01 = clamped(samples, size, x0, y0 + 1);
    let v11 = clamped(samples, size, x0 + 1, y0 + 1);

    if [v00, v10, v01, v11].iter().any(|v| v.is_nodata()) {
        return f64::NODATA;
    }

    let top = v00 + (v10 - v00) * fx;
    let bottom = v01 + (v11 - v01) * fx;
    top + (bottom - top) * fy
}

/// Catmull-Rom weights for the four samples around a fractional offset
fn cubic_weights(t: f64) -> [f64; 4] {
    let t2 = t * t;
    let t3 = t2 * t;
    [
        0.5 * (-t3 + 2.0 * t2 - t),
        0.5 * (3.0 * t3 - 5.0 * t2 + 2.0),
        0.5 * (-3.0 * t3 + 4.0 * t2 + t),
        0.5 * (t3 - t2),
    ]
}

fn bicubic(samples: &[f64], size: RasterSize, col: f64, row: f64) -> f64 {
    let x0 = col.floor();
    let y0 = row.floor();
    let wx = cubic_weights(col - x0);
    let wy = cubic_weights(row - y0);
    let (x0, y0) = (x0 as i64, y0 as i64);

    let mut result = 0.0;
    for (j, wy) in wy.iter().enumerate() {
        let mut row_value = 0.0;
        for (i, wx) in wx.iter().enumerate() {
            let v = clamped(samples, size, x0 + i as i64 - 1, y0 + j as i64 - 1);
            if v.is_nodata() {
                return f64::NODATA;
            }
            row_value += wx * v;
        }
        result += wy * row_value;
    }

    result
}
