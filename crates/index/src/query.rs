use std::fmt::Debug;
use std::hash::Hash;

use glam::Vec2;
use gridfile_common::Rect;
use serde::Serialize;

use crate::grid_file::GridFile;

/// Occupancy summary of a grid file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridStats {
    pub total_points: usize,
    pub distinct_buckets: usize,
    /// `total_points / (distinct_buckets * bucket_capacity)`.
    pub utilization: f64,
    /// Number of directory columns.
    pub depth_x: usize,
    /// Number of directory rows.
    pub depth_y: usize,
}

impl std::fmt::Display for GridStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "points={} buckets={} utilization={:.1}% depth={}x{}",
            self.total_points,
            self.distinct_buckets,
            self.utilization * 100.0,
            self.depth_x,
            self.depth_y
        )
    }
}

impl<K> GridFile<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Visit every tracked point inside the closed rectangle.
    ///
    /// The cell sweep is a superset; each bucket is scanned once no matter how
    /// many visited cells share it, and points are filtered exactly.
    fn for_each_in(&self, rect: &Rect, mut visit: impl FnMut(K, Vec2)) {
        if rect.is_degenerate() {
            return;
        }
        let from = self.directory.cell_of(rect.min);
        let to = self.directory.cell_of(rect.max);
        for id in self.directory.buckets_between(from, to) {
            for (key, position) in self.buckets[id.index()].iter() {
                if rect.contains_point(position) {
                    visit(key, position);
                }
            }
        }
    }

    /// Keys and positions of the points inside the closed rectangle.
    pub fn query_entries(&self, rect: &Rect) -> Vec<(K, Vec2)> {
        let mut found = Vec::new();
        self.for_each_in(rect, |key, position| found.push((key, position)));
        found
    }

    /// Keys of the points inside the closed rectangle. Rectangles with no
    /// interior return nothing.
    pub fn query_rect(&self, rect: &Rect) -> Vec<K> {
        let mut found = Vec::new();
        self.for_each_in(rect, |key, _| found.push(key));
        found
    }

    /// Keys of the points inside `[x, x + w] x [y, y + h]`.
    pub fn query_points(&self, x: f32, y: f32, w: f32, h: f32) -> Vec<K> {
        self.query_rect(&Rect::from_xywh(x, y, w, h))
    }

    /// Number of points inside `[x, x + w] x [y, y + h]`.
    pub fn query_count(&self, x: f32, y: f32, w: f32, h: f32) -> usize {
        let mut count = 0;
        self.for_each_in(&Rect::from_xywh(x, y, w, h), |_, _| count += 1);
        count
    }

    /// Count points and distinct buckets over the whole directory.
    pub fn stats(&self) -> GridStats {
        let distinct = self.directory.distinct_buckets();
        let total_points: usize = distinct
            .iter()
            .map(|id| self.buckets[id.index()].len())
            .sum();
        let slots = distinct.len() * self.config.bucket_capacity;
        let utilization = if slots > 0 {
            total_points as f64 / slots as f64
        } else {
            0.0
        };
        GridStats {
            total_points,
            distinct_buckets: distinct.len(),
            utilization,
            depth_x: self.directory.cols(),
            depth_y: self.directory.rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scattered(n: u32, capacity: usize) -> GridFile<u32> {
        let mut g = GridFile::with_dimensions(800.0, 600.0, capacity).unwrap();
        for k in 0..n {
            let x = (k as f32 * 97.0) % 800.0;
            let y = (k as f32 * 61.0) % 600.0;
            g.insert(k, Vec2::new(x, y));
        }
        g
    }

    #[test]
    fn degenerate_rectangles_are_empty() {
        let g = scattered(50, 4);
        assert!(g.query_points(0.0, 0.0, 0.0, 600.0).is_empty());
        assert!(g.query_points(0.0, 0.0, 800.0, -1.0).is_empty());
        assert_eq!(g.query_count(100.0, 100.0, -50.0, -50.0), 0);
    }

    #[test]
    fn full_domain_query_sees_everything() {
        let g = scattered(200, 4);
        assert!(g.split_count() > 0);
        assert_eq!(g.query_count(0.0, 0.0, 800.0, 600.0), 200);
    }

    #[test]
    fn query_matches_brute_force() {
        let g = scattered(120, 3);
        let rect = Rect::from_xywh(150.0, 90.0, 310.0, 205.0);
        let mut expected: Vec<u32> = g
            .iter()
            .filter(|(_, p)| rect.contains_point(*p))
            .map(|(k, _)| k)
            .collect();
        let mut got = g.query_rect(&rect);
        expected.sort_unstable();
        got.sort_unstable();
        assert_eq!(got, expected);
    }

    #[test]
    fn entries_carry_stored_positions() {
        let g = scattered(120, 3);
        let rect = Rect::from_xywh(100.0, 50.0, 400.0, 300.0);
        let mut entries = g.query_entries(&rect);
        entries.sort_unstable_by_key(|(k, _)| *k);
        for (k, p) in &entries {
            assert_eq!(g.position(*k), Some(*p));
            assert!(rect.contains_point(*p));
        }
        let keys: Vec<u32> = entries.iter().map(|(k, _)| *k).collect();
        let mut expected = g.query_rect(&rect);
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert!(g.query_entries(&Rect::from_xywh(0.0, 0.0, 0.0, 10.0)).is_empty());
    }

    #[test]
    fn closed_bounds_include_edges() {
        let mut g: GridFile<u32> = GridFile::with_dimensions(100.0, 100.0, 4).unwrap();
        g.insert(1, Vec2::new(10.0, 10.0));
        g.insert(2, Vec2::new(20.0, 20.0));
        assert_eq!(g.query_count(10.0, 10.0, 10.0, 10.0), 2);
    }

    #[test]
    fn outside_rectangle_is_empty() {
        let g = scattered(40, 4);
        assert_eq!(g.query_count(900.0, 700.0, 50.0, 50.0), 0);
        assert_eq!(g.query_count(-100.0, -100.0, 50.0, 50.0), 0);
    }

    #[test]
    fn shared_buckets_are_scanned_once() {
        let g = scattered(300, 5);
        let hits = g.query_points(0.0, 0.0, 800.0, 600.0);
        let mut unique = hits.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(hits.len(), unique.len());
    }

    #[test]
    fn stats_of_fresh_index() {
        let g: GridFile<u32> = GridFile::with_dimensions(800.0, 600.0, 10).unwrap();
        let s = g.stats();
        assert_eq!(s.total_points, 0);
        assert_eq!(s.distinct_buckets, 1);
        assert_eq!(s.utilization, 0.0);
        assert_eq!((s.depth_x, s.depth_y), (1, 1));
    }

    #[test]
    fn stats_utilization() {
        let g = scattered(10, 10);
        let s = g.stats();
        assert_eq!(s.distinct_buckets, 1);
        assert_eq!(s.utilization, 1.0);
        assert_eq!(s.to_string(), "points=10 buckets=1 utilization=100.0% depth=1x1");
    }

    #[test]
    fn emptied_buckets_still_count() {
        let mut g = scattered(11, 10);
        assert_eq!(g.stats().distinct_buckets, 2);
        for k in 0..11 {
            g.remove(k);
        }
        let s = g.stats();
        assert_eq!(s.total_points, 0);
        assert_eq!(s.distinct_buckets, 2);
    }
}
