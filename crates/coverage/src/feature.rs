use crate::Point;

/// A point sample produced from a single raster cell.
/// The geometry is the model space center of the cell, the attributes hold one value per band
/// keyed by band label. No-data values are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    geometry: Point,
    attributes: Vec<(String, Option<f64>)>,
}

impl Feature {
    pub fn new(geometry: Point, attributes: Vec<(String, Option<f64>)>) -> Self {
        Feature { geometry, attributes }
    }

    pub fn geometry(&self) -> Point {
        self.geometry
    }

    /// Attributes in band order
    pub fn attributes(&self) -> &[(String, Option<f64>)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<f64> {
        self.attributes.iter().find(|(key, _)| key == name).and_then(|(_, value)| *value)
    }

    pub fn into_geo_feature(self) -> (geo_types::Geometry<f64>, Vec<(String, Option<f64>)>) {
        (geo_types::Geometry::Point(self.geometry), self.attributes)
    }
}
