use glam::Vec2;

/// Handle of a bucket in the grid file's bucket arena.
///
/// Directory cells hold handles, so two cells sharing a bucket hold equal
/// handles. Deduplication during queries compares handles, never contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketId(pub(crate) usize);

impl BucketId {
    /// Position of the bucket in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity container of point keys and the positions they were
/// indexed at.
///
/// The bucket only tracks membership. The owning [`GridFile`](crate::GridFile)
/// keeps the point-to-bucket back-references in sync with `add`/`remove`.
#[derive(Debug, Clone)]
pub struct Bucket<K> {
    capacity: usize,
    entries: Vec<(K, Vec2)>,
}

impl<K: Copy + Eq> Bucket<K> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A full bucket must be split before it can admit another point.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Position the key was stored at, if it lives in this bucket.
    pub fn position_of(&self, key: K) -> Option<Vec2> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, pos)| *pos)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Vec2)> + '_ {
        self.entries.iter().copied()
    }

    /// Append the key unless it is already present. Returns whether it was added.
    pub(crate) fn add(&mut self, key: K, position: Vec2) -> bool {
        if self.contains(key) {
            return false;
        }
        self.entries.push((key, position));
        true
    }

    /// Remove the key if present, returning the position it was stored at.
    pub(crate) fn remove(&mut self, key: K) -> Option<Vec2> {
        let idx = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Empty the bucket, handing its entries to a split.
    pub(crate) fn take_entries(&mut self) -> Vec<(K, Vec2)> {
        std::mem::take(&mut self.entries)
    }
}
