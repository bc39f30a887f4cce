use std::collections::BTreeSet;

use glam::Vec2;

use crate::bucket::BucketId;

/// A zero-based directory cell: column along X, row along Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    pub col: usize,
    pub row: usize,
}

impl CellCoord {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Split axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    pub(crate) fn of(self, p: Vec2) -> f32 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

/// Inclusive block of cells owned by one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Region {
    pub first: CellCoord,
    pub last: CellCoord,
}

/// Scale sequences plus the cell-to-bucket matrix.
///
/// # Invariants
/// - Both scale sequences start at 0, end at the domain extent and are
///   strictly increasing.
/// - `cells` has `y_scales.len() - 1` rows of `x_scales.len() - 1` columns.
/// - The cells referencing one bucket form a rectangle.
#[derive(Debug, Clone)]
pub(crate) struct Directory {
    x_scales: Vec<f32>,
    y_scales: Vec<f32>,
    cells: Vec<Vec<BucketId>>,
}

impl Directory {
    pub fn new(width: f32, height: f32, root: BucketId) -> Self {
        Self {
            x_scales: vec![0.0, width],
            y_scales: vec![0.0, height],
            cells: vec![vec![root]],
        }
    }

    pub fn x_scales(&self) -> &[f32] {
        &self.x_scales
    }

    pub fn y_scales(&self) -> &[f32] {
        &self.y_scales
    }

    pub fn cols(&self) -> usize {
        self.x_scales.len() - 1
    }

    pub fn rows(&self) -> usize {
        self.y_scales.len() - 1
    }

    fn scales(&self, axis: Axis) -> &[f32] {
        match axis {
            Axis::X => &self.x_scales,
            Axis::Y => &self.y_scales,
        }
    }

    /// Resolve the cell containing `p`. Coordinates outside the domain clamp
    /// to the nearest boundary interval.
    pub fn cell_of(&self, p: Vec2) -> CellCoord {
        CellCoord {
            col: interval_of(&self.x_scales, p.x),
            row: interval_of(&self.y_scales, p.y),
        }
    }

    pub fn bucket_at(&self, cell: CellCoord) -> BucketId {
        self.cells[cell.row][cell.col]
    }

    /// Grow outward from `seed` to the full rectangle of cells owned by `id`.
    pub fn region_of(&self, id: BucketId, seed: CellCoord) -> Region {
        debug_assert_eq!(self.bucket_at(seed), id, "seed cell must belong to the bucket");
        let row = &self.cells[seed.row];
        let mut first_col = seed.col;
        while first_col > 0 && row[first_col - 1] == id {
            first_col -= 1;
        }
        let mut last_col = seed.col;
        while last_col + 1 < row.len() && row[last_col + 1] == id {
            last_col += 1;
        }
        let mut first_row = seed.row;
        while first_row > 0 && self.cells[first_row - 1][seed.col] == id {
            first_row -= 1;
        }
        let mut last_row = seed.row;
        while last_row + 1 < self.cells.len() && self.cells[last_row + 1][seed.col] == id {
            last_row += 1;
        }
        Region {
            first: CellCoord::new(first_col, first_row),
            last: CellCoord::new(last_col, last_row),
        }
    }

    /// Coordinate extent `(lo, hi)` of a region along one axis.
    pub fn extent(&self, region: &Region, axis: Axis) -> (f32, f32) {
        let (first, last) = match axis {
            Axis::X => (region.first.col, region.last.col),
            Axis::Y => (region.first.row, region.last.row),
        };
        let scales = self.scales(axis);
        (scales[first], scales[last + 1])
    }

    /// Make `value` a boundary inside `region` along `axis`.
    ///
    /// `value` must lie strictly inside the region's extent. If it is not
    /// already a scale entry, it is inserted and the column (or row) holding
    /// it is duplicated across the whole directory. Returns the widened
    /// region and the index of the first column (or row) above the boundary.
    pub fn insert_boundary(&mut self, region: Region, axis: Axis, value: f32) -> (Region, usize) {
        let k = interval_of(self.scales(axis), value);
        let mut region = region;
        if self.scales(axis)[k] == value {
            return (region, k);
        }
        match axis {
            Axis::X => {
                self.x_scales.insert(k + 1, value);
                for row in &mut self.cells {
                    let owner = row[k];
                    row.insert(k + 1, owner);
                }
                region.last.col += 1;
            }
            Axis::Y => {
                self.y_scales.insert(k + 1, value);
                let copy = self.cells[k].clone();
                self.cells.insert(k + 1, copy);
                region.last.row += 1;
            }
        }
        (region, k + 1)
    }

    /// Hand the cells of `region` below `boundary` to `low` and the rest to `high`.
    pub fn reassign(
        &mut self,
        region: &Region,
        axis: Axis,
        boundary: usize,
        low: BucketId,
        high: BucketId,
    ) {
        for row in region.first.row..=region.last.row {
            for col in region.first.col..=region.last.col {
                let index = match axis {
                    Axis::X => col,
                    Axis::Y => row,
                };
                self.cells[row][col] = if index < boundary { low } else { high };
            }
        }
    }

    /// Distinct bucket handles referenced by the cells between `from` and `to`
    /// inclusive, in handle order.
    pub fn buckets_between(&self, from: CellCoord, to: CellCoord) -> BTreeSet<BucketId> {
        let mut seen = BTreeSet::new();
        for row in &self.cells[from.row..=to.row] {
            seen.extend(row[from.col..=to.col].iter().copied());
        }
        seen
    }

    /// Distinct bucket handles over the whole directory.
    pub fn distinct_buckets(&self) -> BTreeSet<BucketId> {
        self.buckets_between(
            CellCoord::new(0, 0),
            CellCoord::new(self.cols() - 1, self.rows() - 1),
        )
    }
}

/// Index `k` of the interval `[scales[k], scales[k + 1])` holding `v`.
/// Values below the first boundary resolve to 0, values at or past the last
/// boundary resolve to the last interval.
fn interval_of(scales: &[f32], v: f32) -> usize {
    let interior = &scales[1..scales.len() - 1];
    interior.partition_point(|&s| s <= v)
}
