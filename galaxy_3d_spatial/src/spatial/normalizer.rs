/// Translation between the box store frame and the tree frame.
///
/// Tree boxes are stored relative to the dataset's minimum corner. That keeps
/// the numbers in the tree buffer small and lets the absolute frame move
/// (recentring) without touching the tree.

use glam::DVec3;
use crate::bounds::{AABB, BOX_STRIDE};

/// Origin of the tree frame, expressed in the absolute frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoordinateNormalizer {
    origin: DVec3,
}

impl CoordinateNormalizer {
    /// Normalizer anchored at `origin` (the dataset box's minimum corner).
    pub fn new(origin: DVec3) -> Self {
        Self { origin }
    }

    /// Normalizer anchored at the minimum corner of `dataset`.
    pub fn for_dataset(dataset: &AABB) -> Self {
        Self::new(dataset.min)
    }

    /// Current origin.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Absolute frame → tree frame.
    #[inline]
    pub fn to_tree_frame(&self, absolute: &AABB) -> AABB {
        AABB {
            min: absolute.min - self.origin,
            max: absolute.max - self.origin,
        }
    }

    /// Tree frame → absolute frame.
    #[inline]
    pub fn to_absolute_frame(&self, normalized: &AABB) -> AABB {
        AABB {
            min: normalized.min + self.origin,
            max: normalized.max + self.origin,
        }
    }

    /// Absolute → tree frame, in place on six numbers in buffer order.
    #[inline]
    pub fn normalize_slice(&self, values: &mut [f64; BOX_STRIDE]) {
        for axis in 0..3 {
            values[axis] -= self.origin[axis];
            values[axis + 3] -= self.origin[axis];
        }
    }

    /// Tree → absolute frame for six numbers in buffer order.
    #[inline]
    pub fn inflate_slice(&self, values: &[f64]) -> AABB {
        AABB {
            min: DVec3::new(values[0], values[1], values[2]) + self.origin,
            max: DVec3::new(values[3], values[4], values[5]) + self.origin,
        }
    }

    /// Move the absolute frame by `offset` (the tree frame stays put).
    pub fn shift(&mut self, offset: DVec3) {
        self.origin += offset;
    }
}
