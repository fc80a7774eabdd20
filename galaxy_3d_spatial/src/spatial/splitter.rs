/// Variance-guided in-place partition of a range of box indices.
///
/// 1. Centroid of the box centers over the range.
/// 2. Per axis, the sum of squared deviations of the centers from the
///    centroid (no division: only the relative order of the axes matters).
/// 3. The axis with the largest sum is the split axis.
/// 4. Lomuto-style pass: boxes whose center lies strictly above the centroid
///    on that axis are swapped to the front of the range.
/// 5. Balance safeguard: a boundary within `size / balance_divisor` of either
///    end of the range is replaced by the exact midpoint.
///
/// The safeguard only discourages degenerate splits. It does not bound the
/// tree depth to O(log N) for adversarial inputs.

use crate::bounds;

/// Range partitioner used by the tree builder.
#[derive(Debug, Clone, Copy)]
pub struct Splitter {
    balance_divisor: usize,
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Splitter {
    /// Splitter with the given balance divisor (3 = outer thirds).
    pub fn new(balance_divisor: usize) -> Self {
        debug_assert!(balance_divisor > 0, "balance divisor must be positive");
        Self { balance_divisor }
    }

    /// Partition `order[lo..hi]` and return the boundary `p`, `lo < p < hi`.
    ///
    /// `boxes` is a flat box buffer indexed by the values stored in `order`.
    /// The range must hold at least 3 indices.
    pub fn sort(&self, boxes: &[f64], order: &mut [u32], lo: usize, hi: usize) -> usize {
        let size = hi - lo;
        debug_assert!(size >= 3, "ranges below 3 boxes are built without splitting");

        // Pass 1: centroid
        let mut centroid = [0.0_f64; 3];
        for &index in &order[lo..hi] {
            let view = bounds::slot(boxes, index as usize);
            for (axis, sum) in centroid.iter_mut().enumerate() {
                *sum += view.center(axis);
            }
        }
        for sum in &mut centroid {
            *sum /= size as f64;
        }

        // Pass 2: spread
        let mut spread = [0.0_f64; 3];
        for &index in &order[lo..hi] {
            let view = bounds::slot(boxes, index as usize);
            for axis in 0..3 {
                let deviation = view.center(axis) - centroid[axis];
                spread[axis] += deviation * deviation;
            }
        }

        let mut split_axis = 0;
        for axis in 1..3 {
            if spread[axis] > spread[split_axis] {
                split_axis = axis;
            }
        }

        // Pass 3: partition
        let pivot = centroid[split_axis];
        let mut boundary = lo;
        for cursor in lo..hi {
            if bounds::slot(boxes, order[cursor] as usize).center(split_axis) > pivot {
                order.swap(boundary, cursor);
                boundary += 1;
            }
        }

        self.balanced(boundary, lo, hi)
    }

    /// Apply the balance safeguard to a raw boundary.
    fn balanced(&self, boundary: usize, lo: usize, hi: usize) -> usize {
        let size = hi - lo;
        let margin = size / self.balance_divisor;
        if boundary - lo < margin || hi - boundary < margin || boundary == lo || boundary == hi {
            lo + size / 2
        } else {
            boundary
        }
    }
}

#[cfg(test)]
#[path = "splitter_tests.rs"]
mod tests;
