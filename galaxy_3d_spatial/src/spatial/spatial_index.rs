/// The handle a loaded model keeps for culling and picking.
///
/// Built once per dataset: every sample is processed into the box store, then
/// the flat tree is laid out over the store. The index is read-only
/// afterwards; a changed dataset means a new index.

use glam::{DVec3, DVec4};
use crate::bounds::AABB;
use crate::camera::{Frustum, Ray};
use crate::engine::Engine;
use crate::error::{Error, Result};
use super::box_store::BoxStore;
use super::config::IndexConfig;
use super::flat_tree::FlatTree;
use super::normalizer::CoordinateNormalizer;
use super::query;
use super::source::{RepresentationLookup, SampleLookup};
use super::splitter::Splitter;
use super::tree_builder::{BuildStats, TreeBuilder};

const LOG_SOURCE: &str = "galaxy3d::SpatialIndex";

/// Largest sample count whose `2N - 1` node tree is addressable with `u32` spans.
const MAX_SAMPLES: usize = (u32::MAX as usize) / 2 + 1;

/// BVH over the boxes of every sample of a model.
#[derive(Debug, Clone, Default)]
pub struct SpatialIndex {
    store: BoxStore,
    /// `None` for an empty dataset
    tree: Option<FlatTree>,
    normalizer: CoordinateNormalizer,
    stats: BuildStats,
}

impl SpatialIndex {
    /// An index over no samples. Every query returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index over samples `0..sample_count` with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`SpatialIndex::build_with_config`].
    pub fn build<S, R>(sample_count: usize, samples: &S, representations: &R) -> Result<Self>
    where
        S: SampleLookup + ?Sized,
        R: RepresentationLookup + ?Sized,
    {
        Self::build_with_config(sample_count, samples, representations, &IndexConfig::default())
    }

    /// Build an index over samples `0..sample_count`.
    ///
    /// # Errors
    ///
    /// Returns an error (and publishes no index) if:
    /// - The configuration is invalid
    /// - `sample_count` exceeds the addressable node count
    /// - Any sample cannot be placed (missing record or representation,
    ///   malformed local box, unusable transform)
    pub fn build_with_config<S, R>(
        sample_count: usize,
        samples: &S,
        representations: &R,
        config: &IndexConfig,
    ) -> Result<Self>
    where
        S: SampleLookup + ?Sized,
        R: RepresentationLookup + ?Sized,
    {
        config
            .validate()
            .map_err(|e| Engine::log_and_return_error(LOG_SOURCE, e))?;

        if sample_count > MAX_SAMPLES {
            return Err(Engine::log_and_return_error(LOG_SOURCE, Error::TooManySamples(sample_count)));
        }

        if sample_count == 0 {
            crate::spatial_debug!(LOG_SOURCE, "Empty dataset, no tree built");
            return Ok(Self::empty());
        }

        crate::spatial_debug!(LOG_SOURCE, "Processing {} samples", sample_count);

        let mut store = BoxStore::new(sample_count);
        for sample_id in 0..sample_count as u32 {
            store
                .process(sample_id, samples, representations)
                .map_err(|e| Engine::log_and_return_error(LOG_SOURCE, e))?;
        }

        let Some(dataset) = store.dataset_bounds() else {
            // Unreachable: at least one sample was processed
            return Ok(Self::empty());
        };
        let normalizer = CoordinateNormalizer::for_dataset(&dataset);

        let builder = TreeBuilder::new(
            store.as_slice(),
            Splitter::new(config.balance_divisor),
            normalizer,
            config.depth_pool_levels,
        );
        let (tree, stats, _) = builder.build();

        if stats.max_depth > config.depth_pool_levels {
            crate::spatial_warn!(
                LOG_SOURCE,
                "Tree depth {} exceeded the {} preallocated pool levels",
                stats.max_depth,
                config.depth_pool_levels
            );
        }

        if config.log_statistics {
            crate::spatial_info!(
                LOG_SOURCE,
                "Built BVH: {} samples, {} items, {} nodes, depth {}",
                stats.leaf_count,
                store.item_count(),
                stats.node_count,
                stats.max_depth
            );
        }

        Ok(Self {
            store,
            tree: Some(tree),
            normalizer,
            stats,
        })
    }

    // ===== GETTERS =====

    /// `true` if the index covers no sample.
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Number of indexed samples.
    pub fn sample_count(&self) -> usize {
        self.store.len()
    }

    /// Number of tree nodes (`2N - 1`, or 0 when empty).
    pub fn node_count(&self) -> usize {
        self.tree.as_ref().map_or(0, FlatTree::node_count)
    }

    /// Statistics of the build.
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// The flat tree, `None` for an empty index.
    pub fn tree(&self) -> Option<&FlatTree> {
        self.tree.as_ref()
    }

    /// The per-sample box store.
    pub fn box_store(&self) -> &BoxStore {
        &self.store
    }

    /// Union of all sample boxes, `None` for an empty index.
    pub fn dataset_bounds(&self) -> Option<AABB> {
        self.store.dataset_bounds()
    }

    /// Absolute box of `sample_id`.
    ///
    /// # Panics
    ///
    /// Panics if `sample_id >= sample_count()`.
    pub fn box_of(&self, sample_id: u32) -> AABB {
        self.store.get(sample_id).to_aabb()
    }

    /// Cached diagonal length of `sample_id` (level-of-detail metric).
    ///
    /// # Panics
    ///
    /// Panics if `sample_id >= sample_count()`.
    pub fn diagonal_of(&self, sample_id: u32) -> f64 {
        self.store.diagonal(sample_id)
    }

    /// Samples belonging to `item_id` (empty for unknown items).
    pub fn samples_of_item(&self, item_id: u32) -> &[u32] {
        self.store.samples_of_item(item_id)
    }

    /// Absolute box of tree node `index`, `None` past the last node.
    pub fn node_bounds(&self, index: usize) -> Option<AABB> {
        let tree = self.tree.as_ref()?;
        (index < tree.node_count()).then(|| self.normalizer.inflate_slice(tree.bounds(index).as_slice()))
    }

    // ===== QUERIES =====

    /// Samples whose box intersects the frustum (and the extra clipping planes).
    ///
    /// With `fully_included`, only samples entirely inside are returned.
    /// Results are unordered.
    pub fn query_frustum(&self, frustum: &Frustum, clipping_planes: &[DVec4], fully_included: bool) -> Vec<u32> {
        let mut results = Vec::new();
        self.query_frustum_into(frustum, clipping_planes, fully_included, &mut results);
        results
    }

    /// Same as [`SpatialIndex::query_frustum`], appending to `results`.
    pub fn query_frustum_into(
        &self,
        frustum: &Frustum,
        clipping_planes: &[DVec4],
        fully_included: bool,
        results: &mut Vec<u32>,
    ) {
        if let Some(tree) = &self.tree {
            query::query_frustum(tree, &self.normalizer, frustum, clipping_planes, fully_included, results);
        }
    }

    /// Samples whose box the ray touches, ignoring boxes entirely clipped
    /// away by `clipping_planes`. Results are unordered; the caller resolves
    /// the nearest hit.
    pub fn query_ray(&self, ray: &Ray, clipping_planes: &[DVec4]) -> Vec<u32> {
        let mut results = Vec::new();
        self.query_ray_into(ray, clipping_planes, &mut results);
        results
    }

    /// Same as [`SpatialIndex::query_ray`], appending to `results`.
    pub fn query_ray_into(&self, ray: &Ray, clipping_planes: &[DVec4], results: &mut Vec<u32>) {
        self.query_ray_filtered(ray, clipping_planes, |_, _| true, results);
    }

    /// Ray query with an extra caller predicate on each candidate leaf.
    pub fn query_ray_filtered<F>(&self, ray: &Ray, clipping_planes: &[DVec4], seen: F, results: &mut Vec<u32>)
    where
        F: FnMut(u32, &AABB) -> bool,
    {
        if let Some(tree) = &self.tree {
            query::query_ray(tree, &self.normalizer, ray, clipping_planes, seen, results);
        }
    }

    // ===== RECENTRING =====

    /// Move the whole dataset by `offset` without rebuilding the tree.
    ///
    /// Tree boxes are relative to the dataset origin, so only the box store
    /// and the normalizer origin change.
    pub fn translate(&mut self, offset: DVec3) {
        if self.tree.is_none() {
            return;
        }
        self.store.translate(offset);
        self.normalizer.shift(offset);
        crate::spatial_debug!(LOG_SOURCE, "Dataset translated by {:?}", offset);
    }
}

#[cfg(test)]
#[path = "spatial_index_tests.rs"]
mod tests;
