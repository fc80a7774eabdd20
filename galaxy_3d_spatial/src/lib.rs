/*!
# Galaxy 3D Spatial

Instance spatial index for the Galaxy 3D viewer.

A model is made of items, each placing one or more shared representations
(geometry definitions) through samples. This crate computes one world-space
bounding box per sample and organizes them into a flat bounding volume
hierarchy, so the viewer can cull against the camera frustum and pick with
a ray without testing every sample.

## Architecture

- **BoxStore**: World box of every sample, in one flat buffer
- **Splitter**: In-place partition of a sample range along its widest axis
- **FlatTree**: Pre-order node arrays, `2N - 1` nodes for `N` samples
- **CoordinateNormalizer**: Tree boxes relative to the dataset origin
- **SpatialIndex**: Build, frustum and ray queries, recentring
- **InstanceIndex**: Query trait shared by the BVH and the brute-force scan

The index is built once and is read-only afterwards; a changed dataset is
indexed again from scratch.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod bounds;
pub mod camera;
pub mod spatial;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logger)
    pub use crate::engine::Engine;

    // Index handle
    pub use crate::spatial::SpatialIndex;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Bounding boxes and box buffers
    pub mod bounds {
        pub use crate::bounds::*;
    }

    // Query primitives
    pub mod camera {
        pub use crate::camera::*;
    }

    // Spatial index sub-module
    pub mod spatial {
        pub use crate::spatial::*;
    }
}

// Re-export math library at crate root
pub use glam;
