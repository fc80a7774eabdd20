//! Bounds module: axis-aligned boxes and zero-copy views over box buffers.

mod aabb;
mod box_view;

pub use aabb::{AABB, BOX_STRIDE};
pub use box_view::{BoxView, BoxViewMut, slot, slot_mut, union_arrays};
