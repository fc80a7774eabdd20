/// One world-space bounding box per sample, in a flat buffer.
///
/// Sample `i` occupies `boxes[6 * i .. 6 * i + 6]`. Boxes are written once by
/// `process` during the bulk load and are read-only afterwards (apart from
/// whole-dataset recentring through `translate`).

use glam::DVec3;
use rustc_hash::FxHashMap;
use crate::bounds::{self, AABB, BOX_STRIDE, BoxView};
use crate::error::{Error, Result};
use super::source::{RepresentationLookup, SampleLookup};

/// Flat store of per-sample world boxes.
#[derive(Debug, Clone, Default)]
pub struct BoxStore {
    /// `6 * sample_count` numbers
    boxes: Vec<f64>,
    /// Cached diagonal length per sample (level-of-detail input)
    diagonals: Vec<f64>,
    /// Reverse lookup: item id → samples it owns
    item_samples: FxHashMap<u32, Vec<u32>>,
    /// Union of every processed box
    dataset: Option<AABB>,
}

impl BoxStore {
    /// Allocate room for `sample_count` boxes.
    pub fn new(sample_count: usize) -> Self {
        Self {
            boxes: vec![0.0; sample_count * BOX_STRIDE],
            diagonals: vec![0.0; sample_count],
            item_samples: FxHashMap::default(),
            dataset: None,
        }
    }

    /// Number of sample slots.
    pub fn len(&self) -> usize {
        self.diagonals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagonals.is_empty()
    }

    /// Compute and store the world box of `sample_id`.
    ///
    /// The representation's local box is transformed by the sample's local
    /// transform followed by its item's global transform.
    ///
    /// # Errors
    ///
    /// - `Error::MissingSample` if `samples` has no record for the id
    /// - `Error::InvalidTransform` if either transform is unusable
    /// - `Error::MissingRepresentation` if the representation is unknown
    /// - `Error::MalformedGeometry` if the local box is inverted or not finite
    ///
    /// # Panics
    ///
    /// Panics if `sample_id` is outside the store.
    pub fn process<S, R>(&mut self, sample_id: u32, samples: &S, representations: &R) -> Result<()>
    where
        S: SampleLookup + ?Sized,
        R: RepresentationLookup + ?Sized,
    {
        assert!((sample_id as usize) < self.len(), "sample {} outside the box store", sample_id);

        let record = samples.sample(sample_id).ok_or(Error::MissingSample(sample_id))?;

        for transform in [&record.local, &record.global] {
            if let Some(reason) = transform.defect() {
                return Err(Error::InvalidTransform { sample: sample_id, reason: reason.to_string() });
            }
        }

        let local = representations
            .local_bounds(record.representation_id)
            .ok_or(Error::MissingRepresentation {
                sample: sample_id,
                representation: record.representation_id,
            })?;

        if !local.is_well_formed() {
            return Err(Error::MalformedGeometry {
                representation: record.representation_id,
                reason: format!("local box {:?} is inverted or not finite", local.to_array()),
            });
        }

        let world = local.transformed(&record.world_matrix());

        bounds::slot_mut(&mut self.boxes, sample_id as usize).set_aabb(&world);
        self.diagonals[sample_id as usize] = world.diagonal_length();
        self.item_samples.entry(record.item_id).or_default().push(sample_id);
        match &mut self.dataset {
            Some(dataset) => dataset.expand(&world),
            None => self.dataset = Some(world),
        }

        Ok(())
    }

    /// View over the box of `sample_id`.
    ///
    /// # Panics
    ///
    /// Panics if `sample_id` is outside the store.
    #[inline]
    pub fn get(&self, sample_id: u32) -> BoxView<'_> {
        bounds::slot(&self.boxes, sample_id as usize)
    }

    /// Cached diagonal length of `sample_id`.
    pub fn diagonal(&self, sample_id: u32) -> f64 {
        self.diagonals[sample_id as usize]
    }

    /// Samples owned by `item_id` (empty for unknown items).
    pub fn samples_of_item(&self, item_id: u32) -> &[u32] {
        self.item_samples.get(&item_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct items seen while processing.
    pub fn item_count(&self) -> usize {
        self.item_samples.len()
    }

    /// Union of every processed box, `None` before the first `process`.
    pub fn dataset_bounds(&self) -> Option<AABB> {
        self.dataset
    }

    /// The raw buffer, `6 * len()` numbers.
    pub fn as_slice(&self) -> &[f64] {
        &self.boxes
    }

    /// Move every stored box (and the dataset box) by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        let delta = offset.to_array();
        for chunk in self.boxes.chunks_exact_mut(BOX_STRIDE) {
            bounds::BoxViewMut::new(chunk).translate(delta);
        }
        if let Some(dataset) = &mut self.dataset {
            *dataset = dataset.translated(offset);
        }
    }
}
