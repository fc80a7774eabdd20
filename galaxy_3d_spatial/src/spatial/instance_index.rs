/// Instance query strategies.
///
/// An InstanceIndex answers the culling and picking queries of a viewer.
/// Implementations range from a linear scan over every sample box
/// (baseline, small models, reference results in tests) to the BVH.

use glam::DVec4;
use crate::camera::{Frustum, Ray};
use crate::error::Result;
use super::box_store::BoxStore;
use super::query::{FrustumVolume, QueryVolume, survives_clipping};
use super::source::{RepresentationLookup, SampleLookup};
use super::spatial_index::SpatialIndex;

/// Trait for anything that can answer frustum and ray queries over samples.
///
/// Results are appended to `results` in no particular order.
pub trait InstanceIndex: Send + Sync {
    /// Number of samples covered.
    fn sample_count(&self) -> usize;

    /// Samples intersecting (or, with `fully_included`, inside) the frustum
    /// and the extra clipping planes.
    fn query_frustum_into(
        &self,
        frustum: &Frustum,
        clipping_planes: &[DVec4],
        fully_included: bool,
        results: &mut Vec<u32>,
    );

    /// Samples whose box the ray touches and which are not entirely clipped away.
    fn query_ray_into(&self, ray: &Ray, clipping_planes: &[DVec4], results: &mut Vec<u32>);
}

impl InstanceIndex for SpatialIndex {
    fn sample_count(&self) -> usize {
        SpatialIndex::sample_count(self)
    }

    fn query_frustum_into(
        &self,
        frustum: &Frustum,
        clipping_planes: &[DVec4],
        fully_included: bool,
        results: &mut Vec<u32>,
    ) {
        SpatialIndex::query_frustum_into(self, frustum, clipping_planes, fully_included, results);
    }

    fn query_ray_into(&self, ray: &Ray, clipping_planes: &[DVec4], results: &mut Vec<u32>) {
        SpatialIndex::query_ray_into(self, ray, clipping_planes, results);
    }
}

/// Brute-force index: tests every sample box, O(n) per query.
///
/// Suitable for small models or as a baseline for comparison.
#[derive(Debug, Clone, Default)]
pub struct BruteForceIndex {
    store: BoxStore,
}

impl BruteForceIndex {
    /// Process samples `0..sample_count` into a plain box store.
    ///
    /// # Errors
    ///
    /// Same sample errors as [`SpatialIndex::build`].
    pub fn build<S, R>(sample_count: usize, samples: &S, representations: &R) -> Result<Self>
    where
        S: SampleLookup + ?Sized,
        R: RepresentationLookup + ?Sized,
    {
        let mut store = BoxStore::new(sample_count);
        for sample_id in 0..sample_count as u32 {
            store.process(sample_id, samples, representations)?;
        }
        Ok(Self { store })
    }

    /// Scan over an already filled store.
    pub fn from_store(store: BoxStore) -> Self {
        Self { store }
    }

    pub fn box_store(&self) -> &BoxStore {
        &self.store
    }
}

impl InstanceIndex for BruteForceIndex {
    fn sample_count(&self) -> usize {
        self.store.len()
    }

    fn query_frustum_into(
        &self,
        frustum: &Frustum,
        clipping_planes: &[DVec4],
        fully_included: bool,
        results: &mut Vec<u32>,
    ) {
        let volume = FrustumVolume::new(frustum, clipping_planes);
        for sample in 0..self.store.len() as u32 {
            let aabb = self.store.get(sample).to_aabb();
            let accepted = if fully_included {
                volume.contains(&aabb)
            } else {
                volume.intersects(&aabb)
            };
            if accepted {
                results.push(sample);
            }
        }
    }

    fn query_ray_into(&self, ray: &Ray, clipping_planes: &[DVec4], results: &mut Vec<u32>) {
        for sample in 0..self.store.len() as u32 {
            let aabb = self.store.get(sample).to_aabb();
            if ray.intersects_aabb(&aabb) && survives_clipping(clipping_planes, &aabb) {
                results.push(sample);
            }
        }
    }
}
