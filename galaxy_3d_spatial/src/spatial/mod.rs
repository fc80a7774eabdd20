//! Spatial module: the instance BVH and everything it is built from.
//!
//! Provides the per-sample box store, the splitter and tree builder that
//! lay out the flat tree, the coordinate normalizer, and the query engine
//! (frustum and ray). `SpatialIndex` ties them together.

mod box_store;
mod config;
mod flat_tree;
mod instance_index;
mod normalizer;
mod query;
mod source;
mod spatial_index;
mod splitter;
mod tree_builder;

pub use box_store::BoxStore;
pub use config::IndexConfig;
pub use flat_tree::{FlatTree, NodeTag};
pub use instance_index::{InstanceIndex, BruteForceIndex};
pub use normalizer::CoordinateNormalizer;
pub use query::{QueryVolume, FrustumVolume, RayVolume, survives_clipping, traverse};
pub use source::{Transform, SampleRecord, SampleLookup, RepresentationLookup};
pub use spatial_index::SpatialIndex;
pub use splitter::Splitter;
pub use tree_builder::BuildStats;
