/// Zero-copy views over six consecutive numbers of a shared `f64` buffer.
///
/// Both the box store (one slot per sample) and the flat tree (one slot per
/// node) keep their boxes in a single contiguous buffer. A view borrows one
/// slot of such a buffer and exposes per-axis min/max access without copying.

use super::aabb::{AABB, BOX_STRIDE};

/// Offset of the max corner inside a slot.
const MAX_OFFSET: usize = 3;

/// Borrow slot `index` of a flat box buffer.
///
/// Panics if the buffer is too short.
pub fn slot(buffer: &[f64], index: usize) -> BoxView<'_> {
    let start = index * BOX_STRIDE;
    BoxView { data: &buffer[start..start + BOX_STRIDE] }
}

/// Mutably borrow slot `index` of a flat box buffer.
///
/// Panics if the buffer is too short.
pub fn slot_mut(buffer: &mut [f64], index: usize) -> BoxViewMut<'_> {
    let start = index * BOX_STRIDE;
    BoxViewMut { data: &mut buffer[start..start + BOX_STRIDE] }
}

/// Read-only view over one box of a shared buffer.
#[derive(Debug, Clone, Copy)]
pub struct BoxView<'a> {
    data: &'a [f64],
}

impl<'a> BoxView<'a> {
    /// View over a six-number slice.
    pub fn new(data: &'a [f64]) -> Self {
        debug_assert_eq!(data.len(), BOX_STRIDE, "a box view spans exactly six numbers");
        Self { data }
    }

    /// Minimum along `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn min(&self, axis: usize) -> f64 {
        self.data[axis]
    }

    /// Maximum along `axis` (0 = x, 1 = y, 2 = z).
    #[inline]
    pub fn max(&self, axis: usize) -> f64 {
        self.data[MAX_OFFSET + axis]
    }

    /// Center along `axis`.
    #[inline]
    pub fn center(&self, axis: usize) -> f64 {
        (self.data[axis] + self.data[MAX_OFFSET + axis]) * 0.5
    }

    /// Underlying six numbers.
    pub fn as_slice(&self) -> &'a [f64] {
        self.data
    }

    /// Copy the box out of the buffer.
    #[inline]
    pub fn to_array(&self) -> [f64; BOX_STRIDE] {
        let mut out = [0.0; BOX_STRIDE];
        out.copy_from_slice(self.data);
        out
    }

    /// Copy the box out of the buffer as an [`AABB`].
    #[inline]
    pub fn to_aabb(&self) -> AABB {
        AABB::from_array(self.to_array())
    }
}

/// Mutable view over one box of a shared buffer.
#[derive(Debug)]
pub struct BoxViewMut<'a> {
    data: &'a mut [f64],
}

impl<'a> BoxViewMut<'a> {
    /// Mutable view over a six-number slice.
    pub fn new(data: &'a mut [f64]) -> Self {
        debug_assert_eq!(data.len(), BOX_STRIDE, "a box view spans exactly six numbers");
        Self { data }
    }

    /// Minimum along `axis`.
    #[inline]
    pub fn min(&self, axis: usize) -> f64 {
        self.data[axis]
    }

    /// Maximum along `axis`.
    #[inline]
    pub fn max(&self, axis: usize) -> f64 {
        self.data[MAX_OFFSET + axis]
    }

    #[inline]
    pub fn set_min(&mut self, axis: usize, value: f64) {
        self.data[axis] = value;
    }

    #[inline]
    pub fn set_max(&mut self, axis: usize, value: f64) {
        self.data[MAX_OFFSET + axis] = value;
    }

    /// Overwrite this slot with six numbers in buffer order.
    #[inline]
    pub fn set(&mut self, values: &[f64; BOX_STRIDE]) {
        self.data.copy_from_slice(values);
    }

    /// Overwrite this slot with an [`AABB`].
    pub fn set_aabb(&mut self, aabb: &AABB) {
        self.set(&aabb.to_array());
    }

    /// Grow this slot so that it also contains `other`.
    #[inline]
    pub fn combine(&mut self, other: &[f64; BOX_STRIDE]) {
        for axis in 0..3 {
            if other[axis] < self.data[axis] {
                self.data[axis] = other[axis];
            }
            if other[MAX_OFFSET + axis] > self.data[MAX_OFFSET + axis] {
                self.data[MAX_OFFSET + axis] = other[MAX_OFFSET + axis];
            }
        }
    }

    /// Add `offset[axis]` to both corners on every axis.
    #[inline]
    pub fn translate(&mut self, offset: [f64; 3]) {
        for axis in 0..3 {
            self.data[axis] += offset[axis];
            self.data[MAX_OFFSET + axis] += offset[axis];
        }
    }

    /// Read-only view of the same slot.
    pub fn as_view(&self) -> BoxView<'_> {
        BoxView { data: &self.data[..] }
    }
}

/// Union of two boxes in buffer order.
#[inline]
pub fn union_arrays(a: &[f64; BOX_STRIDE], b: &[f64; BOX_STRIDE]) -> [f64; BOX_STRIDE] {
    [
        a[0].min(b[0]),
        a[1].min(b[1]),
        a[2].min(b[2]),
        a[3].max(b[3]),
        a[4].max(b[4]),
        a[5].max(b[5]),
    ]
}
