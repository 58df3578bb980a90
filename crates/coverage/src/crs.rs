//! Coordinate reference system handles.
//!
//! A [`Crs`] is an opaque, cheaply clonable handle resolved from an EPSG code, a named identifier
//! (`EPSG:4326`, `CRS:84`, `WGS84`) or a proj string. Transformations go through [`crate::srs`].

use crate::{Error, Result, srs::CoordinateTransformer};

pub mod epsg {
    use super::Epsg;

    pub const WGS84: Epsg = Epsg::new(4326);
    pub const WGS84_WEB_MERCATOR: Epsg = Epsg::new(3857);
    pub const BELGIAN_LAMBERT72: Epsg = Epsg::new(31370);
    pub const ETRS89: Epsg = Epsg::new(4258);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Epsg(u16);

impl Epsg {
    pub const fn new(code: u16) -> Self {
        Epsg(code)
    }

    pub const fn code(&self) -> u16 {
        self.0
    }
}

impl From<u16> for Epsg {
    fn from(code: u16) -> Self {
        Epsg(code)
    }
}

impl From<Epsg> for u16 {
    fn from(epsg: Epsg) -> u16 {
        epsg.0
    }
}

impl std::fmt::Display for Epsg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

const WGS84_PROJ: &str = "+proj=longlat +datum=WGS84 +no_defs";

/// Opaque coordinate reference system handle
#[derive(Debug, Clone)]
pub struct Crs {
    epsg: Option<Epsg>,
    proj: String,
    geographic: bool,
}

impl Crs {
    /// Resolve a CRS from its EPSG code
    pub fn from_epsg(epsg: Epsg) -> Result<Self> {
        if epsg == epsg::WGS84 {
            return Ok(Crs::wgs84());
        }

        let proj = crs_definitions::from_code(epsg.code())
            .map(|def| def.proj4.to_string())
            .ok_or_else(|| Error::InvalidCrs(format!("No definition available for {epsg}")))?;

        let geographic = proj4rs::Proj::from_proj_string(&proj)?.is_latlong();
        Ok(Crs {
            epsg: Some(epsg),
            proj,
            geographic,
        })
    }

    /// Resolve a CRS from a named identifier (`EPSG:31370`, `CRS:84`, `WGS84`) or a proj string
    pub fn from_definition(definition: &str) -> Result<Self> {
        let def = definition.trim();
        if def.is_empty() {
            return Err(Error::InvalidCrs("Empty CRS definition".into()));
        }

        if def.eq_ignore_ascii_case("WGS84") || def.eq_ignore_ascii_case("CRS:84") {
            return Ok(Crs::wgs84());
        }

        if let Some((authority, code)) = def.split_once(':') {
            if authority.trim().eq_ignore_ascii_case("EPSG") {
                let code = code
                    .trim()
                    .parse::<u16>()
                    .map_err(|_| Error::InvalidCrs(format!("Invalid EPSG code in '{def}'")))?;
                return Crs::from_epsg(Epsg::new(code));
            }
        }

        if !def.starts_with('+') {
            return Err(Error::InvalidCrs(format!("Unrecognized CRS definition: '{def}'")));
        }

        let proj = normalize_proj_string(def);
        let geographic = proj4rs::Proj::from_proj_string(&proj)?.is_latlong();
        Ok(Crs {
            epsg: None,
            proj,
            geographic,
        })
    }

    pub fn wgs84() -> Self {
        Crs {
            epsg: Some(epsg::WGS84),
            proj: WGS84_PROJ.to_string(),
            geographic: true,
        }
    }

    pub fn epsg(&self) -> Option<Epsg> {
        self.epsg
    }

    pub fn proj_string(&self) -> &str {
        &self.proj
    }

    pub fn is_geographic(&self) -> bool {
        self.geographic
    }

    pub fn is_projected(&self) -> bool {
        !self.geographic
    }

    /// The identifier that resolves back to this CRS with [`Crs::from_definition`]
    pub fn identifier(&self) -> String {
        match self.epsg {
            Some(epsg) => epsg.to_string(),
            None => self.proj.clone(),
        }
    }

    /// Create a transformer from this CRS to the target CRS
    pub fn transformer_to(&self, target: &Crs) -> Result<CoordinateTransformer> {
        CoordinateTransformer::new(self, target)
    }
}

impl PartialEq for Crs {
    fn eq(&self, other: &Self) -> bool {
        match (self.epsg, other.epsg) {
            (Some(lhs), Some(rhs)) => lhs == rhs,
            _ => self.proj == other.proj,
        }
    }
}

impl std::str::FromStr for Crs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Crs::from_definition(s)
    }
}

impl TryFrom<Epsg> for Crs {
    type Error = Error;

    fn try_from(epsg: Epsg) -> Result<Self> {
        Crs::from_epsg(epsg)
    }
}

impl std::fmt::Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Sorted, whitespace collapsed proj parameters so equivalent strings compare equal
fn normalize_proj_string(proj: &str) -> String {
    let mut params: Vec<&str> = proj.split_whitespace().collect();
    params.sort_unstable();
    params.dedup();
    params.join(" ")
}
