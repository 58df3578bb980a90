use std::iter::FusedIterator;

use crate::{Feature, processing::FeatureCursor};

/// One-shot sequence of point features over the cells of a raster.
///
/// The underlying cursor is closed as soon as the sequence is exhausted, when [`Features::close`]
/// is called or when the sequence is dropped, whichever comes first.
pub struct Features {
    cursor: Option<Box<dyn FeatureCursor>>,
}

impl Features {
    pub(crate) fn new(cursor: Box<dyn FeatureCursor>) -> Self {
        Features { cursor: Some(cursor) }
    }

    /// Release the cursor without consuming the remaining features
    pub fn close(mut self) {
        self.release();
    }

    pub fn is_closed(&self) -> bool {
        self.cursor.is_none()
    }

    fn release(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            cursor.close();
        }
    }
}

impl Iterator for Features {
    type Item = Feature;

    fn next(&mut self) -> Option<Feature> {
        let feature = self.cursor.as_mut()?.next_feature();
        if feature.is_none() {
            self.release();
        }

        feature
    }
}

impl FusedIterator for Features {}

impl Drop for Features {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Features {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Features").field("closed", &self.is_closed()).finish()
    }
}
