use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Crs, GridCoverage, GridGeometry, processing::Interpolation};

#[derive(Debug, Clone)]
pub enum ParameterValue {
    Coverage(Arc<GridCoverage>),
    Crs(Crs),
    GridGeometry(GridGeometry),
    Constants(Vec<f64>),
    Number(f64),
    Interpolation(Interpolation),
    Geometry(geo_types::Geometry<f64>),
}

impl ParameterValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterValue::Coverage(_) => "coverage",
            ParameterValue::Crs(_) => "coordinate reference system",
            ParameterValue::GridGeometry(_) => "grid geometry",
            ParameterValue::Constants(_) => "constants",
            ParameterValue::Number(_) => "number",
            ParameterValue::Interpolation(_) => "interpolation",
            ParameterValue::Geometry(_) => "geometry",
        }
    }
}

impl From<Arc<GridCoverage>> for ParameterValue {
    fn from(cov: Arc<GridCoverage>) -> Self {
        ParameterValue::Coverage(cov)
    }
}

impl From<Crs> for ParameterValue {
    fn from(crs: Crs) -> Self {
        ParameterValue::Crs(crs)
    }
}

impl From<GridGeometry> for ParameterValue {
    fn from(geometry: GridGeometry) -> Self {
        ParameterValue::GridGeometry(geometry)
    }
}

impl From<Vec<f64>> for ParameterValue {
    fn from(constants: Vec<f64>) -> Self {
        ParameterValue::Constants(constants)
    }
}

impl From<f64> for ParameterValue {
    fn from(number: f64) -> Self {
        ParameterValue::Number(number)
    }
}

impl From<Interpolation> for ParameterValue {
    fn from(interpolation: Interpolation) -> Self {
        ParameterValue::Interpolation(interpolation)
    }
}

impl From<geo_types::Geometry<f64>> for ParameterValue {
    fn from(geometry: geo_types::Geometry<f64>) -> Self {
        ParameterValue::Geometry(geometry)
    }
}

/// Named operation parameters
#[derive(Debug, Clone, Default)]
pub struct Parameters(BTreeMap<String, ParameterValue>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<ParameterValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<ParameterValue>) {
        self.0.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.0.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
