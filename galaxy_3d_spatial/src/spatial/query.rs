/// Single-pass iterative traversal of a [`FlatTree`].
///
/// One cursor scans the node array front to back. For the node under the
/// cursor, three outcomes are possible:
/// - fully inside the query volume: every leaf of the subtree is emitted
///   without further plane tests and the cursor jumps past the subtree;
/// - colliding (or a leaf): the cursor moves to the next node;
/// - neither: the whole subtree is skipped with `cursor += span`.

use glam::DVec4;
use crate::bounds::AABB;
use crate::camera::{Frustum, Ray, plane_keeps_all, plane_keeps_part};
use super::flat_tree::{FlatTree, NodeTag};
use super::normalizer::CoordinateNormalizer;

/// Shape tested against node boxes during traversal.
pub trait QueryVolume {
    /// `true` if every point of `aabb` lies inside the volume.
    fn contains(&self, aabb: &AABB) -> bool;

    /// `true` if the volume may touch `aabb` (false positives allowed).
    fn intersects(&self, aabb: &AABB) -> bool;
}

/// Camera frustum plus optional extra clipping planes.
#[derive(Debug, Clone, Copy)]
pub struct FrustumVolume<'a> {
    frustum: &'a Frustum,
    clipping_planes: &'a [DVec4],
}

impl<'a> FrustumVolume<'a> {
    pub fn new(frustum: &'a Frustum, clipping_planes: &'a [DVec4]) -> Self {
        Self { frustum, clipping_planes }
    }

    #[inline]
    fn planes(&self) -> impl Iterator<Item = &'a DVec4> {
        let frustum: &'a Frustum = self.frustum;
        let clipping_planes: &'a [DVec4] = self.clipping_planes;
        frustum.planes.iter().chain(clipping_planes.iter())
    }
}

impl QueryVolume for FrustumVolume<'_> {
    #[inline]
    fn contains(&self, aabb: &AABB) -> bool {
        self.planes().all(|plane| plane_keeps_all(plane, aabb))
    }

    #[inline]
    fn intersects(&self, aabb: &AABB) -> bool {
        self.planes().all(|plane| plane_keeps_part(plane, aabb))
    }
}

/// Picking ray. A ray has no volume, so it never fully contains a box.
#[derive(Debug, Clone, Copy)]
pub struct RayVolume<'a> {
    ray: &'a Ray,
}

impl<'a> RayVolume<'a> {
    pub fn new(ray: &'a Ray) -> Self {
        Self { ray }
    }
}

impl QueryVolume for RayVolume<'_> {
    #[inline]
    fn contains(&self, _aabb: &AABB) -> bool {
        false
    }

    #[inline]
    fn intersects(&self, aabb: &AABB) -> bool {
        self.ray.intersects_aabb(aabb)
    }
}

/// `true` unless `aabb` lies entirely on the discarded side of a section plane.
#[inline]
pub fn survives_clipping(planes: &[DVec4], aabb: &AABB) -> bool {
    planes.iter().all(|plane| plane_keeps_part(plane, aabb))
}

/// Traverse `tree` and append the sample id of every accepted leaf to `results`.
///
/// A leaf is accepted when it collides with `volume`, `visible` returns
/// `true` for it, and, if `fully_included` is set, the volume contains it.
pub fn traverse<V, F>(
    tree: &FlatTree,
    normalizer: &CoordinateNormalizer,
    volume: &V,
    fully_included: bool,
    mut visible: F,
    results: &mut Vec<u32>,
) where
    V: QueryVolume + ?Sized,
    F: FnMut(u32, &AABB) -> bool,
{
    let node_count = tree.node_count();
    let mut pos = 0;

    while pos < node_count {
        let tag = tree.tag(pos);
        let aabb = normalizer.inflate_slice(tree.bounds(pos).as_slice());

        let included = volume.contains(&aabb);
        let collides = included || volume.intersects(&aabb);

        match tag {
            NodeTag::Leaf(sample) => {
                if collides && (included || !fully_included) && visible(sample, &aabb) {
                    results.push(sample);
                }
                pos += 1;
            }
            NodeTag::Group(span) => {
                let end = pos + span as usize;
                if included {
                    // Whole subtree inside: emit leaves without plane tests
                    for inner in pos + 1..end {
                        if let NodeTag::Leaf(sample) = tree.tag(inner) {
                            let leaf_box = normalizer.inflate_slice(tree.bounds(inner).as_slice());
                            if visible(sample, &leaf_box) {
                                results.push(sample);
                            }
                        }
                    }
                    pos = end;
                } else if collides {
                    pos += 1;
                } else {
                    pos = end;
                }
            }
        }
    }
}

/// Frustum query (camera planes plus extra clipping planes).
pub fn query_frustum(
    tree: &FlatTree,
    normalizer: &CoordinateNormalizer,
    frustum: &Frustum,
    clipping_planes: &[DVec4],
    fully_included: bool,
    results: &mut Vec<u32>,
) {
    let volume = FrustumVolume::new(frustum, clipping_planes);
    traverse(tree, normalizer, &volume, fully_included, |_, _| true, results);
}

/// Ray query. Candidates whose box is entirely clipped away by
/// `clipping_planes` or rejected by `seen` are dropped.
pub fn query_ray<F>(
    tree: &FlatTree,
    normalizer: &CoordinateNormalizer,
    ray: &Ray,
    clipping_planes: &[DVec4],
    mut seen: F,
    results: &mut Vec<u32>,
) where
    F: FnMut(u32, &AABB) -> bool,
{
    let volume = RayVolume::new(ray);
    traverse(
        tree,
        normalizer,
        &volume,
        false,
        |sample, aabb| survives_clipping(clipping_planes, aabb) && seen(sample, aabb),
        results,
    );
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
