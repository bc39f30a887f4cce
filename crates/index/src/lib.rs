//! Grid file: an adaptive spatial index over a fixed 2-D domain.
//!
//! A directory of cells, bounded by two sorted scale sequences, maps every
//! cell to a bucket. Adjacent cells may share a bucket, so sparse areas use
//! large rectangular regions and dense areas get split into small ones.
//!
//! # Invariants
//! - Every tracked point lives in exactly one bucket, and the cell its
//!   position resolves to maps to that bucket.
//! - After `insert` returns, the receiving bucket holds at most its capacity,
//!   unless its points are too close together to separate.
//! - Buckets are created in pairs by splits and are never merged.
//!
//! # Example
//! ```
//! use glam::Vec2;
//! use gridfile_index::GridFile;
//!
//! let mut grid: GridFile<u32> = GridFile::with_dimensions(800.0, 600.0, 10).unwrap();
//! for k in 0..11 {
//!     grid.insert(k, Vec2::new(k as f32 * 70.0, 300.0));
//! }
//! let stats = grid.stats();
//! assert_eq!(stats.distinct_buckets, 2);
//! assert_eq!(grid.query_count(0.0, 0.0, 800.0, 600.0), 11);
//! ```

mod bucket;
mod config;
mod directory;
mod error;
mod grid_file;
mod query;
mod split;

pub use bucket::{Bucket, BucketId};
pub use config::GridConfig;
pub use directory::{Axis, CellCoord};
pub use error::GridError;
pub use grid_file::GridFile;
pub use query::GridStats;
pub use split::SplitOutcome;

pub fn crate_info() -> &'static str {
    "gridfile-index v0.1.0"
}
