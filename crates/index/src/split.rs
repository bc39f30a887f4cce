//! Overload resolution: splitting a full bucket along one axis.
//!
//! The axis is the one along which the cell the insert resolved to is longer
//! (ties go to Y). The split coordinate is the arithmetic mean of the bucket's
//! points along that axis, with positions clamped into the bucket's region.
//! The mean is not balanced for skewed inputs; a later insert cascades into
//! further splits when one side stays full.
//!
//! The bucket may own a larger region than that cell. The region bounds the
//! split value and is what gets reassigned.

use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;

use crate::bucket::{Bucket, BucketId};
use crate::directory::{Axis, CellCoord, Region};
use crate::grid_file::GridFile;

/// Result of one successful split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitOutcome {
    pub axis: Axis,
    /// New boundary. Points with `coord < value` went low, the rest high.
    pub value: f32,
    /// Left (X) or top (Y) bucket. Reuses the overloaded bucket's slot.
    pub low: BucketId,
    /// Right (X) or bottom (Y) bucket, freshly allocated.
    pub high: BucketId,
    pub low_count: usize,
    pub high_count: usize,
}

impl<K> GridFile<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Split the bucket owning `cell` whether or not it is full.
    ///
    /// `insert` calls the same routine on overflow; this entry point lets a
    /// driver pre-partition a region.
    pub fn split_cell(&mut self, cell: CellCoord) -> Option<SplitOutcome> {
        let id = self.directory.bucket_at(cell);
        self.split_bucket(id, cell)
    }

    /// Split bucket `id`, found through `cell`. Returns `None` when no axis
    /// separates its points, leaving the index untouched.
    pub(crate) fn split_bucket(&mut self, id: BucketId, cell: CellCoord) -> Option<SplitOutcome> {
        let single = Region {
            first: cell,
            last: cell,
        };
        let (x_lo, x_hi) = self.directory.extent(&single, Axis::X);
        let (y_lo, y_hi) = self.directory.extent(&single, Axis::Y);
        let preferred = if x_hi - x_lo > y_hi - y_lo {
            Axis::X
        } else {
            Axis::Y
        };

        let region = self.directory.region_of(id, cell);
        let bucket = &self.buckets[id.index()];
        let (axis, value) = [preferred, preferred.other()]
            .into_iter()
            .find_map(|axis| {
                let (lo, hi) = self.directory.extent(&region, axis);
                let value = mean_along(bucket, axis, lo, hi)?;
                separates(bucket, axis, value, lo, hi).then_some((axis, value))
            })?;

        let (region, boundary) = self.directory.insert_boundary(region, axis, value);
        let high = BucketId(self.buckets.len());
        self.buckets.push(Bucket::new(self.config.bucket_capacity));
        self.directory.reassign(&region, axis, boundary, id, high);

        let entries = self.buckets[id.index()].take_entries();
        let original = entries.len();
        for (key, position) in entries {
            let target = if axis.of(position) < value { id } else { high };
            self.attach(target, key, position);
        }
        self.splits += 1;

        let outcome = SplitOutcome {
            axis,
            value,
            low: id,
            high,
            low_count: self.buckets[id.index()].len(),
            high_count: self.buckets[high.index()].len(),
        };
        debug_assert_eq!(outcome.low_count + outcome.high_count, original);
        tracing::debug!(
            axis = ?outcome.axis,
            value = outcome.value,
            low = outcome.low_count,
            high = outcome.high_count,
            depth_x = self.directory.cols(),
            depth_y = self.directory.rows(),
            "split bucket"
        );
        Some(outcome)
    }
}

/// Mean coordinate along `axis`, each point clamped into `[lo, hi]` first so
/// points stored beyond the domain edge pull the mean to that edge only.
fn mean_along<K: Copy + Eq>(bucket: &Bucket<K>, axis: Axis, lo: f32, hi: f32) -> Option<f32> {
    if bucket.is_empty() {
        return None;
    }
    let sum: f64 = bucket
        .iter()
        .map(|(_, p)| f64::from(axis.of(p).clamp(lo, hi)))
        .sum();
    Some((sum / bucket.len() as f64) as f32)
}

/// A usable split value lies strictly inside the region and leaves points on
/// both sides.
fn separates<K: Copy + Eq>(bucket: &Bucket<K>, axis: Axis, value: f32, lo: f32, hi: f32) -> bool {
    let below = |p: Vec2| axis.of(p) < value;
    lo < value
        && value < hi
        && bucket.iter().any(|(_, p)| below(p))
        && bucket.iter().any(|(_, p)| !below(p))
}
