use glam::{DMat4, DVec3, DVec4};
use crate::bounds::AABB;
use super::*;

fn perspective_frustum(fov: f64, eye: DVec3) -> Frustum {
    let projection = DMat4::perspective_rh_gl(fov, 1.0, 0.1, 100.0);
    let view = DMat4::look_at_rh(eye, DVec3::ZERO, DVec3::Y);
    Frustum::from_view_projection(&(projection * view))
}

fn cube(center: DVec3, half: f64) -> AABB {
    AABB::from_center_half_extents(center, DVec3::splat(half))
}

// ============================================================================
// Frustum::from_view_projection
// ============================================================================

#[test]
fn test_frustum_from_identity_matrix() {
    let frustum = Frustum::from_view_projection(&DMat4::IDENTITY);

    // Identity VP → NDC cube: x,y,z in [-1, 1]
    for plane in &frustum.planes {
        assert!((plane.truncate().length() - 1.0).abs() < 1e-12, "plane normal should be unit length");
    }
    assert!(frustum.contains_aabb(&cube(DVec3::ZERO, 1.0)));
    assert!(!frustum.contains_aabb(&cube(DVec3::ZERO, 1.1)));
}

#[test]
fn test_frustum_from_perspective_projection() {
    let frustum = perspective_frustum(std::f64::consts::FRAC_PI_4, DVec3::new(0.0, 0.0, 5.0));

    for plane in &frustum.planes {
        assert!((plane.truncate().length() - 1.0).abs() < 1e-9, "plane normal should be unit length");
    }
    // Near plane faces away from the eye, towards the target
    assert!(frustum.planes[PLANE_NEAR].z < 0.0);
    assert!(frustum.planes[PLANE_FAR].z > 0.0);
}

#[test]
fn test_frustum_from_orthographic_projection() {
    let projection = DMat4::orthographic_rh_gl(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&projection);

    assert_eq!(frustum.planes[PLANE_LEFT].truncate(), DVec3::X);
    assert_eq!(frustum.planes[PLANE_RIGHT].truncate(), -DVec3::X);
    assert_eq!(frustum.planes[PLANE_BOTTOM].truncate(), DVec3::Y);
    assert_eq!(frustum.planes[PLANE_TOP].truncate(), -DVec3::Y);
}

// ============================================================================
// Frustum::intersects_aabb / contains_aabb
// ============================================================================

#[test]
fn test_aabb_inside_frustum() {
    let frustum = perspective_frustum(std::f64::consts::FRAC_PI_2, DVec3::new(0.0, 0.0, 5.0));
    let aabb = cube(DVec3::ZERO, 1.0);

    assert!(frustum.intersects_aabb(&aabb));
    assert!(frustum.contains_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Inside);
}

#[test]
fn test_aabb_outside_frustum() {
    let frustum = perspective_frustum(std::f64::consts::FRAC_PI_4, DVec3::new(0.0, 0.0, 5.0));
    let aabb = AABB::new(DVec3::splat(100.0), DVec3::splat(101.0));

    assert!(!frustum.intersects_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Outside);
}

#[test]
fn test_aabb_behind_camera() {
    let frustum = perspective_frustum(std::f64::consts::FRAC_PI_2, DVec3::new(0.0, 0.0, 5.0));
    let aabb = cube(DVec3::new(0.0, 0.0, 10.0), 1.0);

    assert!(!frustum.intersects_aabb(&aabb));
}

#[test]
fn test_aabb_straddling_is_partial() {
    let frustum = perspective_frustum(std::f64::consts::FRAC_PI_2, DVec3::new(0.0, 0.0, 5.0));
    // Crosses the near plane (the eye sits inside this box)
    let aabb = cube(DVec3::new(0.0, 0.0, 5.0), 1.0);

    assert!(frustum.intersects_aabb(&aabb));
    assert!(!frustum.contains_aabb(&aabb));
    assert_eq!(frustum.classify_aabb(&aabb), FrustumTest::Partial);
}

// ============================================================================
// Frustum::from_aabb
// ============================================================================

#[test]
fn test_box_frustum_contains_its_own_box() {
    let region = AABB::new(DVec3::new(-0.5, -0.5, -0.5), DVec3::new(10.5, 10.5, 10.5));
    let frustum = Frustum::from_aabb(&region);

    assert!(frustum.contains_aabb(&region));
    assert!(frustum.contains_aabb(&cube(DVec3::new(5.0, 5.0, 5.0), 0.5)));
    assert_eq!(frustum.classify_aabb(&cube(DVec3::new(10.5, 0.0, 0.0), 0.5)), FrustumTest::Partial);
    assert_eq!(frustum.classify_aabb(&cube(DVec3::new(20.0, 0.0, 0.0), 0.5)), FrustumTest::Outside);
}

// ============================================================================
// Plane helpers
// ============================================================================

#[test]
fn test_empty_plane_set_keeps_everything() {
    let planes: [DVec4; 0] = [];
    assert_eq!(classify_against_planes(planes.iter(), &cube(DVec3::ZERO, 1.0)), FrustumTest::Inside);
}

#[test]
fn test_section_plane_cuts_box() {
    // Keep everything with x <= 0
    let section = DVec4::new(-1.0, 0.0, 0.0, 0.0);
    let left = cube(DVec3::new(-2.0, 0.0, 0.0), 1.0);
    let cut = cube(DVec3::ZERO, 1.0);
    let right = cube(DVec3::new(2.0, 0.0, 0.0), 1.0);

    assert!(plane_keeps_all(&section, &left));
    assert!(plane_keeps_part(&section, &cut));
    assert!(!plane_keeps_all(&section, &cut));
    assert!(!plane_keeps_part(&section, &right));
}
