/// Lays out the flat BVH over the box store in one pass.
///
/// Recursion writes each subtree directly at its final position in the node
/// arrays. Bounds travel back up through a pool of two temporary boxes per
/// recursion depth (one per child), so the recursion never allocates.
///
/// Base cases:
/// - 1 box  → one leaf
/// - 2 boxes → one group (span 3) and its two leaves, no recursive call

use crate::bounds::{self, BOX_STRIDE};
use super::flat_tree::{FlatTree, NodeTag};
use super::normalizer::CoordinateNormalizer;
use super::splitter::Splitter;

/// Two temporary boxes (left child, right child) for one recursion depth.
type PoolLevel = [[f64; BOX_STRIDE]; 2];

/// Where a recursive call deposits the absolute bounds of its subtree.
#[derive(Debug, Clone, Copy)]
enum BoundsSlot {
    Root,
    Pooled { depth: usize, side: usize },
}

/// Statistics of one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Nodes written (`2N - 1`)
    pub node_count: usize,
    /// Leaves written (`N`)
    pub leaf_count: usize,
    /// Deepest recursion depth reached (root = 0)
    pub max_depth: usize,
}

pub(crate) struct TreeBuilder<'a> {
    /// Absolute boxes, `6 * N` numbers
    source: &'a [f64],
    /// Permutation of sample ids, partitioned in place by the splitter
    order: Vec<u32>,
    splitter: Splitter,
    normalizer: CoordinateNormalizer,
    pool: Vec<PoolLevel>,
    root_bounds: [f64; BOX_STRIDE],
    boxes: Vec<f64>,
    tags: Vec<NodeTag>,
    stats: BuildStats,
}

impl<'a> TreeBuilder<'a> {
    pub(crate) fn new(
        source: &'a [f64],
        splitter: Splitter,
        normalizer: CoordinateNormalizer,
        depth_pool_levels: usize,
    ) -> Self {
        let leaf_count = source.len() / BOX_STRIDE;
        debug_assert!(leaf_count > 0, "empty datasets never reach the tree builder");
        let node_count = 2 * leaf_count - 1;

        Self {
            source,
            order: (0..leaf_count as u32).collect(),
            splitter,
            normalizer,
            pool: vec![[[0.0; BOX_STRIDE]; 2]; depth_pool_levels],
            root_bounds: [0.0; BOX_STRIDE],
            boxes: vec![0.0; node_count * BOX_STRIDE],
            tags: vec![NodeTag::Leaf(0); node_count],
            stats: BuildStats { node_count, leaf_count, max_depth: 0 },
        }
    }

    /// Build the whole tree. Returns it with its statistics and the absolute
    /// bounds of the root.
    pub(crate) fn build(mut self) -> (FlatTree, BuildStats, [f64; BOX_STRIDE]) {
        let leaf_count = self.order.len();
        let written = self.build_range(0, leaf_count, 0, 0, BoundsSlot::Root);
        debug_assert_eq!(written, self.stats.node_count);

        let tree = FlatTree::from_parts(self.boxes, self.tags);
        (tree, self.stats, self.root_bounds)
    }

    /// Write the subtree for `order[lo..hi]` at `position`; returns the
    /// number of nodes written.
    fn build_range(&mut self, lo: usize, hi: usize, depth: usize, position: usize, out: BoundsSlot) -> usize {
        self.stats.max_depth = self.stats.max_depth.max(depth);

        match hi - lo {
            1 => {
                let sample = self.order[lo];
                let absolute = bounds::slot(self.source, sample as usize).to_array();
                self.write_node(position, NodeTag::Leaf(sample), absolute);
                self.store_bounds(out, absolute);
                1
            }
            2 => {
                let first = self.order[lo];
                let second = self.order[lo + 1];
                let a = bounds::slot(self.source, first as usize).to_array();
                let b = bounds::slot(self.source, second as usize).to_array();
                let union = bounds::union_arrays(&a, &b);

                self.stats.max_depth = self.stats.max_depth.max(depth + 1);
                self.write_node(position, NodeTag::Group(3), union);
                self.write_node(position + 1, NodeTag::Leaf(first), a);
                self.write_node(position + 2, NodeTag::Leaf(second), b);
                self.store_bounds(out, union);
                3
            }
            _ => {
                let frontier = self.splitter.sort(self.source, &mut self.order, lo, hi);

                if depth >= self.pool.len() {
                    crate::spatial_trace!(
                        "galaxy3d::TreeBuilder",
                        "Growing depth pool to {} levels",
                        depth + 1
                    );
                    self.pool.resize(depth + 1, [[0.0; BOX_STRIDE]; 2]);
                }

                let left_count = self.build_range(
                    lo,
                    frontier,
                    depth + 1,
                    position + 1,
                    BoundsSlot::Pooled { depth, side: 0 },
                );
                let right_count = self.build_range(
                    frontier,
                    hi,
                    depth + 1,
                    position + 1 + left_count,
                    BoundsSlot::Pooled { depth, side: 1 },
                );

                let [left, right] = self.pool[depth];
                let union = bounds::union_arrays(&left, &right);
                let count = left_count + right_count + 1;

                self.write_node(position, NodeTag::Group(count as u32), union);
                self.store_bounds(out, union);
                count
            }
        }
    }

    /// Write node `position` with its box converted to the tree frame.
    #[inline]
    fn write_node(&mut self, position: usize, tag: NodeTag, mut absolute: [f64; BOX_STRIDE]) {
        self.normalizer.normalize_slice(&mut absolute);
        bounds::slot_mut(&mut self.boxes, position).set(&absolute);
        self.tags[position] = tag;
    }

    #[inline]
    fn store_bounds(&mut self, slot: BoundsSlot, absolute: [f64; BOX_STRIDE]) {
        match slot {
            BoundsSlot::Root => self.root_bounds = absolute,
            BoundsSlot::Pooled { depth, side } => self.pool[depth][side] = absolute,
        }
    }
}

#[cfg(test)]
#[path = "tree_builder_tests.rs"]
mod tests;
