use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;

use crate::bucket::{Bucket, BucketId};
use crate::config::GridConfig;
use crate::directory::{CellCoord, Directory};
use crate::error::GridError;

/// Adaptive grid file over a fixed 2-D domain.
///
/// Points are identified by a copyable key `K` and indexed at the position
/// passed to [`insert`](Self::insert)/[`update`](Self::update). The index
/// never owns the points themselves; callers must `update` or `remove` a key
/// before they dispose of the point it names.
///
/// Buckets live in an arena and are referenced by handle from the directory
/// cells. Buckets are never merged: emptying one leaves it in place.
#[derive(Debug, Clone)]
pub struct GridFile<K> {
    pub(crate) config: GridConfig,
    pub(crate) directory: Directory,
    pub(crate) buckets: Vec<Bucket<K>>,
    /// Back-references: which bucket currently holds each key.
    pub(crate) owners: HashMap<K, BucketId>,
    pub(crate) splits: u64,
}

impl<K> GridFile<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Create an index with a single bucket spanning the whole domain.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let root = BucketId(0);
        Ok(Self {
            config,
            directory: Directory::new(config.width, config.height, root),
            buckets: vec![Bucket::new(config.bucket_capacity)],
            owners: HashMap::new(),
            splits: 0,
        })
    }

    /// Shorthand for `GridFile::new(GridConfig::new(width, height, bucket_capacity))`.
    pub fn with_dimensions(
        width: f32,
        height: f32,
        bucket_capacity: usize,
    ) -> Result<Self, GridError> {
        Self::new(GridConfig::new(width, height, bucket_capacity))
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn width(&self) -> f32 {
        self.config.width
    }

    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn bucket_capacity(&self) -> usize {
        self.config.bucket_capacity
    }

    /// Column boundaries, from 0 to the domain width.
    pub fn x_scales(&self) -> &[f32] {
        self.directory.x_scales()
    }

    /// Row boundaries, from 0 to the domain height.
    pub fn y_scales(&self) -> &[f32] {
        self.directory.y_scales()
    }

    /// Number of tracked points.
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    pub fn contains(&self, key: K) -> bool {
        self.owners.contains_key(&key)
    }

    /// Bucket currently holding `key`.
    pub fn bucket_of(&self, key: K) -> Option<BucketId> {
        self.owners.get(&key).copied()
    }

    /// Position `key` was last indexed at.
    pub fn position(&self, key: K) -> Option<Vec2> {
        let id = self.bucket_of(key)?;
        self.buckets[id.index()].position_of(key)
    }

    pub fn bucket(&self, id: BucketId) -> Option<&Bucket<K>> {
        self.buckets.get(id.index())
    }

    /// Directory cell a position resolves to, clamped to the domain.
    pub fn cell_of(&self, position: Vec2) -> CellCoord {
        self.directory.cell_of(position)
    }

    /// Bucket owning a directory cell. Panics if the cell is out of range.
    pub fn bucket_at(&self, cell: CellCoord) -> BucketId {
        self.directory.bucket_at(cell)
    }

    /// Number of successful splits since construction.
    pub fn split_count(&self) -> u64 {
        self.splits
    }

    /// Every tracked point and its indexed position, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = (K, Vec2)> + '_ {
        self.buckets.iter().flat_map(Bucket::iter)
    }

    /// Index `key` at `position`, splitting full buckets as needed.
    ///
    /// Re-inserting a tracked key moves it. Positions outside the domain are
    /// accepted and stored in the nearest boundary cell.
    pub fn insert(&mut self, key: K, position: Vec2) {
        self.detach(key);
        loop {
            let cell = self.directory.cell_of(position);
            let id = self.directory.bucket_at(cell);
            if !self.buckets[id.index()].is_full() {
                self.attach(id, key, position);
                return;
            }
            if self.split_bucket(id, cell).is_none() {
                tracing::warn!(
                    ?key,
                    bucket = id.index(),
                    len = self.buckets[id.index()].len(),
                    "points too close to split, bucket over capacity"
                );
                self.attach(id, key, position);
                return;
            }
        }
    }

    /// Re-index `key` after it moved from `old_position` to `new_position`.
    ///
    /// Removal goes through the key's back-reference, so `old_position` is
    /// informational only. An untracked key is simply inserted.
    pub fn update(&mut self, key: K, old_position: Vec2, new_position: Vec2) {
        tracing::trace!(?key, from = ?old_position, to = ?new_position, "update");
        self.insert(key, new_position);
    }

    /// Stop tracking `key`. Returns the position it was indexed at, or `None`
    /// if it was not tracked.
    pub fn remove(&mut self, key: K) -> Option<Vec2> {
        self.detach(key)
    }

    pub(crate) fn attach(&mut self, id: BucketId, key: K, position: Vec2) {
        if self.buckets[id.index()].add(key, position) {
            self.owners.insert(key, id);
        }
    }

    pub(crate) fn detach(&mut self, key: K) -> Option<Vec2> {
        let id = self.owners.remove(&key)?;
        self.buckets[id.index()].remove(key)
    }
}
