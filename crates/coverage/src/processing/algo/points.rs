use std::sync::Arc;

use crate::{CellIterator, Feature, GridCoverage, processing::FeatureCursor};

/// Cursor producing one point feature per cell, starting at the south west cell
pub struct PointCursor {
    coverage: Arc<GridCoverage>,
    labels: Vec<String>,
    cells: CellIterator,
    closed: bool,
}

impl PointCursor {
    pub fn new(coverage: Arc<GridCoverage>) -> Self {
        let labels = (0..coverage.band_count()).map(|band| coverage.band_label(band)).collect();
        let cells = CellIterator::for_raster_with_size(coverage.size());
        PointCursor {
            coverage,
            labels,
            cells,
            closed: false,
        }
    }
}

impl FeatureCursor for PointCursor {
    fn next_feature(&mut self) -> Option<Feature> {
        if self.closed {
            return None;
        }

        let cell = self.cells.next()?;
        let attributes = self
            .labels
            .iter()
            .enumerate()
            .map(|(band, label)| (label.clone(), self.coverage.value(band, cell)))
            .collect();

        Some(Feature::new(self.coverage.geometry().pixel_center(cell), attributes))
    }

    fn close(&mut self) {
        if !self.closed {
            log::trace!("Closing point cursor of coverage '{}'", self.coverage.name());
            self.closed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Bounds, DataType, GridGeometry, Point, RasterSize, SampleDimension};

    #[test]
    fn cursor_walks_cells_from_the_south_west() {
        let coverage = GridCoverage::new(
            "test",
            GridGeometry::with_size(RasterSize::with_rows_cols(2, 2), Bounds::new(0.0, 0.0, 2.0, 2.0).unwrap()).unwrap(),
            vec![SampleDimension::new(DataType::Float64).with_name("value")],
            vec![vec![1.0, 2.0, 3.0, f64::NAN]],
        )
        .unwrap();

        let mut cursor = PointCursor::new(Arc::new(coverage));
        let first = cursor.next_feature().unwrap();
        assert_eq!(first.geometry(), Point::new(0.5, 0.5));
        assert_eq!(first.attribute("value"), Some(3.0));

        let second = cursor.next_feature().unwrap();
        assert_eq!(second.geometry(), Point::new(1.5, 0.5));
        assert_eq!(second.attribute("value"), None);

        cursor.close();
        assert!(cursor.next_feature().is_none());
    }
}
