//! Camera module: query primitives derived from the viewer's camera.
//!
//! Provides passive data containers: the view frustum used for culling and
//! level-of-detail selection, and the picking ray. The index does NOT store
//! cameras; the viewer builds these per frame and passes them in.

mod frustum;
mod ray;

pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
    classify_against_planes, plane_keeps_all, plane_keeps_part,
};
pub use ray::Ray;
