/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a DVec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// The same plane convention is used for the extra clipping (section) planes
/// accepted by the spatial queries, so the helpers below work on any plane
/// slice, not only on the six frustum planes.

use glam::{DMat4, DVec3, DVec4};
use crate::bounds::AABB;

/// Result of a 3-way plane-set/AABB classification.
///
/// - `Outside` → skip the entire subtree
/// - `Inside` → collect all leaves without further testing
/// - `Partial` → descend and test leaves individually
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside at least one plane
    Outside,
    /// AABB is entirely inside every plane
    Inside,
    /// AABB straddles at least one plane
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [DVec4; 6],
}

impl Frustum {
    /// Build a frustum from six inward-facing planes.
    pub fn from_planes(planes: [DVec4; 6]) -> Self {
        Self { planes }
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections (OpenGL-style clip space, z in [-w, w]).
    pub fn from_view_projection(vp: &DMat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            DVec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            DVec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            DVec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            DVec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row3 + row2
            DVec4::new(m[0][3] + m[0][2], m[1][3] + m[1][2], m[2][3] + m[2][2], m[3][3] + m[3][2]),
            // Far:    row3 - row2
            DVec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Box-shaped frustum whose inside is exactly `aabb` (boundary included).
    ///
    /// Handy for region selection and for orthographic "box" views.
    pub fn from_aabb(aabb: &AABB) -> Self {
        Self {
            planes: [
                DVec4::new(1.0, 0.0, 0.0, -aabb.min.x),
                DVec4::new(-1.0, 0.0, 0.0, aabb.max.x),
                DVec4::new(0.0, 1.0, 0.0, -aabb.min.y),
                DVec4::new(0.0, -1.0, 0.0, aabb.max.y),
                DVec4::new(0.0, 0.0, 1.0, -aabb.min.z),
                DVec4::new(0.0, 0.0, -1.0, aabb.max.z),
            ],
        }
    }

    /// Test if an AABB intersects this frustum (conservative).
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| plane_keeps_part(plane, aabb))
    }

    /// Test if an AABB lies entirely inside this frustum.
    pub fn contains_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| plane_keeps_all(plane, aabb))
    }

    /// Classify an AABB against the frustum (3-way test).
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        classify_against_planes(self.planes.iter(), aabb)
    }
}

/// Positive vertex: corner most in the direction of the plane normal.
#[inline]
fn p_vertex(normal: DVec3, aabb: &AABB) -> DVec3 {
    DVec3::new(
        if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
        if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
        if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
    )
}

/// Negative vertex: corner least in the direction of the plane normal.
#[inline]
fn n_vertex(normal: DVec3, aabb: &AABB) -> DVec3 {
    DVec3::new(
        if normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
        if normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
        if normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
    )
}

/// `true` if some part of the box is on the inner side of `plane`.
#[inline]
pub fn plane_keeps_part(plane: &DVec4, aabb: &AABB) -> bool {
    let normal = plane.truncate();
    normal.dot(p_vertex(normal, aabb)) + plane.w >= 0.0
}

/// `true` if the whole box is on the inner side of `plane`.
#[inline]
pub fn plane_keeps_all(plane: &DVec4, aabb: &AABB) -> bool {
    let normal = plane.truncate();
    normal.dot(n_vertex(normal, aabb)) + plane.w >= 0.0
}

/// Classify an AABB against any set of inward-facing planes.
///
/// An empty plane set keeps everything (`Inside`).
pub fn classify_against_planes<'a, I>(planes: I, aabb: &AABB) -> FrustumTest
where
    I: IntoIterator<Item = &'a DVec4>,
{
    let mut all_inside = true;

    for plane in planes {
        if !plane_keeps_part(plane, aabb) {
            return FrustumTest::Outside;
        }
        if all_inside && !plane_keeps_all(plane, aabb) {
            all_inside = false;
        }
    }

    if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
