use std::cmp::Ordering;

use crate::{DataType, GridCoverage, Nodata};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandStatistics {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub mean: f64,
    pub stddev: f64,
    pub value_count: usize,
    pub sum: f64,
}

/// Read-only view on one sample dimension of a coverage
#[derive(Clone, Copy)]
pub struct Band<'a> {
    coverage: &'a GridCoverage,
    index: usize,
}

impl<'a> Band<'a> {
    pub(crate) fn new(coverage: &'a GridCoverage, index: usize) -> Self {
        Band { coverage, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> Option<&'a str> {
        self.coverage.dimensions()[self.index].name()
    }

    /// The band name, or its index when the band is unnamed
    pub fn label(&self) -> String {
        self.coverage.band_label(self.index)
    }

    pub fn data_type(&self) -> DataType {
        self.coverage.dimensions()[self.index].data_type()
    }

    pub fn nodata(&self) -> Option<f64> {
        self.coverage.dimensions()[self.index].nodata()
    }

    /// Samples in row-major, north-to-south order, NaN marks no-data
    pub fn samples(&self) -> &'a [f64] {
        self.coverage.band_samples(self.index).unwrap_or_default()
    }

    /// Iterator over the valid samples of the band
    pub fn values(&self) -> impl Iterator<Item = f64> + 'a {
        self.samples().iter().copied().filter(|v| !v.is_nodata())
    }

    /// (min, max) of the valid samples, `None` if the band only contains no-data
    pub fn range(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((min, max)) => Some((f64::min(min, v), f64::max(max, v))),
        })
    }

    /// Calculates basic statistics of the valid samples in one pass.
    /// Returns `None` if the band contains only no-data values.
    pub fn statistics(&self) -> Option<BandStatistics> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;

        let mut pixel_values = Vec::with_capacity(self.samples().len());
        for val in self.values() {
            min = min.min(val);
            max = max.max(val);
            sum += val;
            pixel_values.push(val);
        }

        if pixel_values.is_empty() {
            return None;
        }

        pixel_values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let count = pixel_values.len();
        let mean = sum / count as f64;
        let variance = pixel_values.iter().map(|v| (mean - v) * (mean - v)).sum::<f64>() / count as f64;

        let median = if count % 2 == 0 {
            (pixel_values[count / 2 - 1] + pixel_values[count / 2]) / 2.0
        } else {
            pixel_values[count / 2]
        };

        Some(BandStatistics {
            min,
            max,
            median,
            mean,
            stddev: variance.sqrt(),
            value_count: count,
            sum,
        })
    }
}

impl std::fmt::Debug for Band<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Band")
            .field("index", &self.index)
            .field("name", &self.name())
            .field("data_type", &self.data_type())
            .field("nodata", &self.nodata())
            .finish()
    }
}
