/// Axis-aligned bounding box value type.
///
/// Owned counterpart of a [`BoxView`](super::BoxView): the six numbers of a
/// box copied out of a shared buffer, with double-precision corners.

use glam::{DMat4, DVec3};

/// Number of `f64` values a box occupies in a flat buffer.
pub const BOX_STRIDE: usize = 6;

/// Axis-Aligned Bounding Box
///
/// Flat buffer order is `min.x, min.y, min.z, max.x, max.y, max.z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: DVec3,
    /// Maximum corner (x, y, z)
    pub max: DVec3,
}

impl AABB {
    /// Create a box from its two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` with the given half extents.
    pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Read a box from six numbers in buffer order.
    pub fn from_array(values: [f64; BOX_STRIDE]) -> Self {
        Self {
            min: DVec3::new(values[0], values[1], values[2]),
            max: DVec3::new(values[3], values[4], values[5]),
        }
    }

    /// Six numbers in buffer order.
    pub fn to_array(&self) -> [f64; BOX_STRIDE] {
        [self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z]
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &DMat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow this box so that it contains `other`.
    pub fn expand(&mut self, other: &AABB) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Same box moved by `offset`.
    pub fn translated(&self, offset: DVec3) -> AABB {
        AABB {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Center point of this AABB.
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent along each axis.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Length of the min→max diagonal.
    pub fn diagonal_length(&self) -> f64 {
        self.size().length()
    }

    /// `true` when every coordinate is finite and `min <= max` on every axis.
    ///
    /// Flat boxes (`min == max` on an axis) are well formed.
    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all()
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Component-wise closeness within `epsilon`.
    pub fn abs_diff_eq(&self, other: &AABB, epsilon: f64) -> bool {
        self.min.abs_diff_eq(other.min, epsilon) && self.max.abs_diff_eq(other.max, epsilon)
    }
}
