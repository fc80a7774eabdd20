/// Data consumed from the model layer to place every sample.
///
/// The index does not know how transforms or representations are decoded.
/// It only reads them through the two lookup traits below, once per sample,
/// while the box store is filled.

use glam::{DMat4, DVec3};
use rustc_hash::FxHashMap;
use crate::bounds::AABB;

/// Placement frame: a position plus two orthogonal direction vectors.
///
/// The third axis is `x_axis × y_axis`. Axis lengths carry scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Origin of the frame
    pub position: DVec3,
    /// First direction vector
    pub x_axis: DVec3,
    /// Second direction vector
    pub y_axis: DVec3,
}

impl Transform {
    /// The identity frame.
    pub const IDENTITY: Self = Self {
        position: DVec3::ZERO,
        x_axis: DVec3::X,
        y_axis: DVec3::Y,
    };

    /// Create a frame from its position and first two axes.
    pub fn new(position: DVec3, x_axis: DVec3, y_axis: DVec3) -> Self {
        Self { position, x_axis, y_axis }
    }

    /// Identity frame moved to `position`.
    pub fn from_translation(position: DVec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Third axis of the frame.
    pub fn z_axis(&self) -> DVec3 {
        self.x_axis.cross(self.y_axis)
    }

    /// Affine matrix of this frame (column-major, columns = axes then position).
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_cols(
            self.x_axis.extend(0.0),
            self.y_axis.extend(0.0),
            self.z_axis().extend(0.0),
            self.position.extend(1.0),
        )
    }

    /// Reason this frame cannot place geometry, if any.
    pub(crate) fn defect(&self) -> Option<&'static str> {
        if !(self.position.is_finite() && self.x_axis.is_finite() && self.y_axis.is_finite()) {
            return Some("non-finite component");
        }
        if self.x_axis.length_squared() == 0.0 {
            return Some("zero-length x axis");
        }
        if self.y_axis.length_squared() == 0.0 {
            return Some("zero-length y axis");
        }
        None
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Everything the index needs to know about one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRecord {
    /// Logical model element owning the sample
    pub item_id: u32,
    /// Shared geometry definition placed by the sample
    pub representation_id: u32,
    /// Per-sample transform (applied first)
    pub local: Transform,
    /// Per-item transform (applied second)
    pub global: Transform,
}

impl SampleRecord {
    /// World matrix: the local transform followed by the global one.
    pub fn world_matrix(&self) -> DMat4 {
        self.global.to_matrix() * self.local.to_matrix()
    }
}

/// Source of sample records, addressed by dense sample id.
pub trait SampleLookup {
    /// Record of `sample_id`, or `None` if the source has no such sample.
    fn sample(&self, sample_id: u32) -> Option<SampleRecord>;
}

/// Source of representation-local bounding boxes.
pub trait RepresentationLookup {
    /// Local box of `representation_id`, or `None` if unknown.
    fn local_bounds(&self, representation_id: u32) -> Option<AABB>;
}

impl SampleLookup for [SampleRecord] {
    fn sample(&self, sample_id: u32) -> Option<SampleRecord> {
        self.get(sample_id as usize).copied()
    }
}

impl SampleLookup for Vec<SampleRecord> {
    fn sample(&self, sample_id: u32) -> Option<SampleRecord> {
        self.as_slice().sample(sample_id)
    }
}

impl RepresentationLookup for [AABB] {
    fn local_bounds(&self, representation_id: u32) -> Option<AABB> {
        self.get(representation_id as usize).copied()
    }
}

impl RepresentationLookup for Vec<AABB> {
    fn local_bounds(&self, representation_id: u32) -> Option<AABB> {
        self.as_slice().local_bounds(representation_id)
    }
}

impl RepresentationLookup for FxHashMap<u32, AABB> {
    fn local_bounds(&self, representation_id: u32) -> Option<AABB> {
        self.get(&representation_id).copied()
    }
}
