use std::cell::OnceCell;

use crate::math::Point2;

/// Memoized outlines of one wall.
///
/// Filled lazily by outline queries and emptied by the store whenever the
/// wall or one of its joined walls changes shape.
#[derive(Debug, Clone, Default)]
pub(crate) struct OutlineCache {
    plain: OnceCell<Vec<Point2>>,
    with_baseboards: OnceCell<Vec<Point2>>,
}

impl OutlineCache {
    pub(crate) fn cell(&self, with_baseboards: bool) -> &OnceCell<Vec<Point2>> {
        if with_baseboards {
            &self.with_baseboards
        } else {
            &self.plain
        }
    }

    /// Returns the cached outline without computing it.
    pub(crate) fn peek(&self, with_baseboards: bool) -> Option<&[Point2]> {
        self.cell(with_baseboards).get().map(Vec::as_slice)
    }

    pub(crate) fn clear(&mut self) {
        self.plain.take();
        self.with_baseboards.take();
    }
}
