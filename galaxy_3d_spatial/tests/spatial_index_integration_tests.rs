//! Integration tests for SpatialIndex
//!
//! These tests build indices through the public API and check query results
//! against hand-computed answers and against the brute-force scan.
//!
//! Run with: cargo test --test spatial_index_integration_tests

use galaxy_3d_spatial::galaxy3d::{Error, SpatialIndex};
use galaxy_3d_spatial::galaxy3d::bounds::AABB;
use galaxy_3d_spatial::galaxy3d::camera::{Frustum, Ray};
use galaxy_3d_spatial::galaxy3d::spatial::{
    BruteForceIndex, IndexConfig, InstanceIndex, NodeTag, SampleRecord, Transform,
};
use galaxy_3d_spatial::glam::{DMat4, DVec3, DVec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// HELPERS
// ============================================================================

/// Representation 0: unit cube centered on its origin.
fn unit_cube() -> Vec<AABB> {
    vec![AABB::from_center_half_extents(DVec3::ZERO, DVec3::splat(0.5))]
}

fn sample_at(item_id: u32, position: DVec3) -> SampleRecord {
    SampleRecord {
        item_id,
        representation_id: 0,
        local: Transform::from_translation(position),
        global: Transform::IDENTITY,
    }
}

/// Unit cubes at the origin, on each axis at distance 10, and at (5, 5, 5).
fn five_cubes() -> Vec<SampleRecord> {
    [
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(10.0, 0.0, 0.0),
        DVec3::new(0.0, 10.0, 0.0),
        DVec3::new(0.0, 0.0, 10.0),
        DVec3::new(5.0, 5.0, 5.0),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, position)| sample_at(i as u32, position))
    .collect()
}

fn sorted(mut ids: Vec<u32>) -> Vec<u32> {
    ids.sort_unstable();
    ids
}

/// Random scene: boxes of varied sizes and shapes, on a 1/8 grid so both
/// frames hold the exact same numbers.
fn random_scene(rng: &mut StdRng, count: usize) -> (Vec<SampleRecord>, Vec<AABB>) {
    let representations: Vec<AABB> = (0..8)
        .map(|_| {
            let half = DVec3::new(
                rng.random_range(1..16) as f64 / 8.0,
                rng.random_range(1..16) as f64 / 8.0,
                rng.random_range(1..16) as f64 / 8.0,
            );
            AABB::new(-half, half)
        })
        .collect();

    let samples = (0..count)
        .map(|i| SampleRecord {
            item_id: (i / 3) as u32,
            representation_id: rng.random_range(0..representations.len() as u32),
            local: Transform::from_translation(DVec3::new(
                rng.random_range(-800..800) as f64 / 8.0,
                rng.random_range(-800..800) as f64 / 8.0,
                rng.random_range(-200..200) as f64 / 8.0,
            )),
            global: Transform::from_translation(DVec3::new(250.0, -125.0, 0.0)),
        })
        .collect();

    (samples, representations)
}

fn random_frustum(rng: &mut StdRng) -> Frustum {
    let eye = DVec3::new(
        rng.random_range(100.0..400.0),
        rng.random_range(-250.0..0.0),
        rng.random_range(20.0..80.0),
    );
    let target = DVec3::new(
        rng.random_range(150.0..350.0),
        rng.random_range(-225.0..-25.0),
        0.0,
    );
    let view = DMat4::look_at_rh(eye, target, DVec3::Z);
    let projection = DMat4::perspective_rh_gl(rng.random_range(0.3..1.2), 1.5, 0.5, 200.0);
    Frustum::from_view_projection(&(projection * view))
}

// ============================================================================
// FIVE CUBES
// ============================================================================

#[test]
fn test_integration_five_cubes_frustum_over_all() {
    let samples = five_cubes();
    let index = SpatialIndex::build(samples.len(), &samples, &unit_cube()).unwrap();
    let all = index.dataset_bounds().unwrap();

    let results = index.query_frustum(&Frustum::from_aabb(&all), &[], true);

    assert_eq!(sorted(results), vec![0, 1, 2, 3, 4]);
}

#[test]
fn test_integration_five_cubes_frustum_on_one_cube() {
    let samples = five_cubes();
    let index = SpatialIndex::build(samples.len(), &samples, &unit_cube()).unwrap();
    let cube = AABB::from_center_half_extents(DVec3::new(10.0, 0.0, 0.0), DVec3::splat(0.5));

    let results = index.query_frustum(&Frustum::from_aabb(&cube), &[], true);

    assert_eq!(results, vec![1]);
}

#[test]
fn test_integration_five_cubes_ray_segment() {
    let samples = five_cubes();
    let index = SpatialIndex::build(samples.len(), &samples, &unit_cube()).unwrap();

    let results = index.query_ray(&Ray::segment(DVec3::ZERO, DVec3::X), &[]);

    assert_eq!(results, vec![0]);
}

#[test]
fn test_integration_five_cubes_unbounded_ray_reaches_far_cube() {
    let samples = five_cubes();
    let index = SpatialIndex::build(samples.len(), &samples, &unit_cube()).unwrap();

    let results = index.query_ray(&Ray::new(DVec3::ZERO, DVec3::X), &[]);

    assert_eq!(sorted(results), vec![0, 1]);
}

// ============================================================================
// TREE INVARIANTS
// ============================================================================

#[test]
fn test_integration_tree_layout_invariants() {
    let mut rng = StdRng::seed_from_u64(7);
    let (samples, representations) = random_scene(&mut rng, 333);
    let index = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();
    let tree = index.tree().unwrap();

    assert_eq!(tree.node_count(), 2 * 333 - 1);

    let mut leaves: Vec<u32> = tree
        .tags()
        .iter()
        .filter_map(|tag| match tag {
            NodeTag::Leaf(sample) => Some(*sample),
            NodeTag::Group(_) => None,
        })
        .collect();
    leaves.sort_unstable();
    assert_eq!(leaves, (0..333).collect::<Vec<_>>());

    // Every group box is the union of its leaves, in absolute coordinates
    for node in 0..tree.node_count() {
        if tree.tag(node).is_leaf() {
            continue;
        }
        let union = tree
            .leaves_under(node)
            .map(|sample| index.box_of(sample))
            .reduce(|acc, b| acc.union(&b))
            .unwrap();
        assert!(index.node_bounds(node).unwrap().abs_diff_eq(&union, 1e-9), "node {}", node);
    }

    assert!(index.node_bounds(0).unwrap().abs_diff_eq(&index.dataset_bounds().unwrap(), 1e-9));
}

#[test]
fn test_integration_far_frustum_returns_nothing() {
    let mut rng = StdRng::seed_from_u64(11);
    let (samples, representations) = random_scene(&mut rng, 200);
    let index = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();
    let far = AABB::from_center_half_extents(DVec3::splat(1.0e5), DVec3::splat(10.0));

    assert!(index.query_frustum(&Frustum::from_aabb(&far), &[], false).is_empty());
}

#[test]
fn test_integration_repeated_queries_are_stable() {
    let mut rng = StdRng::seed_from_u64(5);
    let (samples, representations) = random_scene(&mut rng, 150);
    let index = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();
    let frustum = random_frustum(&mut rng);

    let first = sorted(index.query_frustum(&frustum, &[], false));
    let second = sorted(index.query_frustum(&frustum, &[], false));

    assert_eq!(first, second);
}

#[test]
fn test_integration_item_lookup_covers_all_samples() {
    let mut rng = StdRng::seed_from_u64(3);
    let (samples, representations) = random_scene(&mut rng, 30);
    let index = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();

    for item in 0..10 {
        assert_eq!(index.samples_of_item(item), &[3 * item, 3 * item + 1, 3 * item + 2]);
    }
}

// ============================================================================
// COMPARISON WITH BRUTE FORCE
// ============================================================================

#[test]
fn test_integration_random_frustums_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(2024);
    let (samples, representations) = random_scene(&mut rng, 1500);
    let index = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();
    let brute = BruteForceIndex::build(samples.len(), &samples, &representations).unwrap();

    for round in 0..40 {
        let frustum = random_frustum(&mut rng);
        let fully_included = round % 2 == 0;
        let section = if round % 3 == 0 {
            vec![DVec4::new(0.0, 0.0, -1.0, 10.0)]
        } else {
            Vec::new()
        };

        let mut expected = Vec::new();
        brute.query_frustum_into(&frustum, &section, fully_included, &mut expected);
        let mut actual = Vec::new();
        index.query_frustum_into(&frustum, &section, fully_included, &mut actual);

        assert_eq!(sorted(actual), sorted(expected), "round {}", round);
    }
}

#[test]
fn test_integration_random_rays_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(99);
    let (samples, representations) = random_scene(&mut rng, 1000);
    let index = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();
    let brute = BruteForceIndex::build(samples.len(), &samples, &representations).unwrap();

    for round in 0..60 {
        let origin = DVec3::new(
            rng.random_range(100.0..400.0),
            rng.random_range(-250.0..0.0),
            rng.random_range(30.0..60.0),
        );
        let direction = DVec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..-0.1),
        );
        let ray = Ray::new(origin, direction);
        let section = if round % 4 == 0 {
            vec![DVec4::new(1.0, 0.0, 0.0, -250.0)]
        } else {
            Vec::new()
        };

        let mut expected = Vec::new();
        brute.query_ray_into(&ray, &section, &mut expected);
        let mut actual = Vec::new();
        index.query_ray_into(&ray, &section, &mut actual);

        assert_eq!(sorted(actual), sorted(expected), "round {}", round);
    }
}

#[test]
fn test_integration_translated_index_matches_rebuilt_index() {
    let mut rng = StdRng::seed_from_u64(41);
    let (mut samples, representations) = random_scene(&mut rng, 400);
    let offset = DVec3::new(-256.0, 128.0, 8.0);

    let mut moved = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();
    moved.translate(offset);

    for sample in &mut samples {
        sample.global.position += offset;
    }
    let rebuilt = SpatialIndex::build(samples.len(), &samples, &representations).unwrap();

    assert_eq!(moved.dataset_bounds(), rebuilt.dataset_bounds());
    for _ in 0..20 {
        let frustum = random_frustum(&mut rng);
        let shifted = Frustum::from_planes(frustum.planes.map(|plane| {
            // Same frustum moved by `offset`
            DVec4::new(plane.x, plane.y, plane.z, plane.w - plane.truncate().dot(offset))
        }));
        assert_eq!(
            sorted(moved.query_frustum(&shifted, &[], false)),
            sorted(rebuilt.query_frustum(&shifted, &[], false))
        );
    }
}

// ============================================================================
// CONFIGURATION AND ERRORS
// ============================================================================

#[test]
fn test_integration_balance_divisor_keeps_results() {
    let mut rng = StdRng::seed_from_u64(13);
    let (samples, representations) = random_scene(&mut rng, 500);
    let loose = IndexConfig { balance_divisor: 1, log_statistics: false, ..IndexConfig::default() };
    let strict = IndexConfig { balance_divisor: 3, log_statistics: false, ..IndexConfig::default() };

    let a = SpatialIndex::build_with_config(samples.len(), &samples, &representations, &loose).unwrap();
    let b = SpatialIndex::build_with_config(samples.len(), &samples, &representations, &strict).unwrap();
    let frustum = random_frustum(&mut rng);

    assert_eq!(a.node_count(), b.node_count());
    assert_eq!(
        sorted(a.query_frustum(&frustum, &[], false)),
        sorted(b.query_frustum(&frustum, &[], false))
    );
}

#[test]
fn test_integration_error_aborts_whole_build() {
    let mut samples = five_cubes();
    samples[4].representation_id = 3;

    let result = SpatialIndex::build(samples.len(), &samples, &unit_cube());

    assert_eq!(result.unwrap_err(), Error::MissingRepresentation { sample: 4, representation: 3 });
}
