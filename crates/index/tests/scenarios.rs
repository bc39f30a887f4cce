use glam::Vec2;
use gridfile_index::{Axis, CellCoord, GridError, GridFile};

/// Ten points spread over the 800x600 reference domain, mean x = 365.
fn ten_points() -> Vec<Vec2> {
    (0..10)
        .map(|i| Vec2::new(50.0 + i as f32 * 70.0, 40.0 + i as f32 * 55.0))
        .collect()
}

fn reference_grid() -> GridFile<u32> {
    GridFile::with_dimensions(800.0, 600.0, 10).unwrap()
}

#[test]
fn invalid_geometry_is_reported() {
    let err = GridFile::<u32>::with_dimensions(-1.0, 600.0, 10).unwrap_err();
    assert!(matches!(err, GridError::InvalidGeometry { .. }));
    assert!(err.to_string().contains("invalid geometry"));
}

#[test]
fn ten_points_fill_without_splitting() {
    let mut g = reference_grid();
    for (k, p) in ten_points().into_iter().enumerate() {
        g.insert(k as u32, p);
    }
    let s = g.stats();
    assert_eq!(s.distinct_buckets, 1);
    assert_eq!(s.total_points, 10);
    assert_eq!(g.split_count(), 0);
}

#[test]
fn eleventh_point_splits_once_along_x() {
    let mut g = reference_grid();
    for (k, p) in ten_points().into_iter().enumerate() {
        g.insert(k as u32, p);
    }
    g.insert(10, Vec2::new(400.0, 300.0));

    let s = g.stats();
    assert_eq!(g.split_count(), 1);
    assert_eq!(s.distinct_buckets, 2);
    assert_eq!(s.depth_x, 2);
    assert_eq!(s.depth_y, 1);
    assert_eq!(g.query_count(0.0, 0.0, 800.0, 600.0), 11);
    assert_eq!(g.x_scales()[1], 365.0);
}

#[test]
fn split_boundary_separates_queries() {
    let mut g = reference_grid();
    for (k, p) in ten_points().into_iter().enumerate() {
        g.insert(k as u32, p);
    }
    g.insert(10, Vec2::new(400.0, 300.0));
    let m = g.x_scales()[1];

    // Point 0 sits at x = 50 < m.
    let left = g.query_points(0.0, 0.0, m, 600.0);
    let right = g.query_points(m, 0.0, 800.0 - m, 600.0);
    assert!(left.contains(&0));
    assert!(!right.contains(&0));
}

#[test]
fn update_moves_point_across_the_boundary() {
    let mut g = reference_grid();
    for (k, p) in ten_points().into_iter().enumerate() {
        g.insert(k as u32, p);
    }
    g.insert(10, Vec2::new(400.0, 300.0));
    let m = g.x_scales()[1];
    let before = g.bucket_of(0).unwrap();

    let old = g.position(0).unwrap();
    let new = Vec2::new(m + 100.0, old.y);
    g.update(0, old, new);

    let left = g.query_points(0.0, 0.0, m, 600.0);
    let right = g.query_points(m, 0.0, 800.0 - m, 600.0);
    assert!(!left.contains(&0));
    assert_eq!(right.iter().filter(|&&k| k == 0).count(), 1);
    assert_ne!(g.bucket_of(0), Some(before));
    assert_eq!(g.stats().total_points, 11);
}

#[test]
fn clustered_inserts_cascade_splits() {
    let mut g: GridFile<u32> = GridFile::with_dimensions(800.0, 600.0, 4).unwrap();
    // Tight cluster near one corner forces repeated splits of the same area.
    for k in 0..40u32 {
        let x = 10.0 + (k % 8) as f32 * 0.5;
        let y = 10.0 + (k / 8) as f32 * 0.5;
        g.insert(k, Vec2::new(x, y));
    }
    assert_eq!(g.len(), 40);
    for (k, p) in g.iter() {
        let bucket = g.bucket_of(k).unwrap();
        assert_eq!(g.bucket_at(g.cell_of(p)), bucket);
        assert!(g.bucket(bucket).unwrap().len() <= 4);
    }
    assert_eq!(g.query_count(0.0, 0.0, 20.0, 20.0), 40);
}

#[test]
fn coincident_points_overflow_instead_of_looping() {
    let mut g: GridFile<u32> = GridFile::with_dimensions(100.0, 100.0, 2).unwrap();
    for k in 0..5 {
        g.insert(k, Vec2::new(25.0, 25.0));
    }
    assert_eq!(g.len(), 5);
    assert_eq!(g.split_count(), 0);
    assert_eq!(g.query_count(20.0, 20.0, 10.0, 10.0), 5);
}

#[test]
fn manual_split_of_the_root() {
    let mut g = reference_grid();
    g.insert(0, Vec2::new(100.0, 100.0));
    g.insert(1, Vec2::new(300.0, 500.0));
    let out = g.split_cell(CellCoord::new(0, 0)).unwrap();
    assert_eq!(out.axis, Axis::X);
    assert_eq!(out.value, 200.0);
    assert_eq!(out.low_count + out.high_count, 2);
    assert_eq!(g.bucket_of(0), Some(out.low));
    assert_eq!(g.bucket_of(1), Some(out.high));

    // An empty bucket has nothing to split on.
    let mut empty = reference_grid();
    assert!(empty.split_cell(CellCoord::new(0, 0)).is_none());
}

#[test]
fn points_on_the_outer_edge_are_tracked() {
    let mut g = reference_grid();
    g.insert(0, Vec2::new(800.0, 600.0));
    g.insert(1, Vec2::new(0.0, 0.0));
    assert_eq!(g.query_count(0.0, 0.0, 800.0, 600.0), 2);
}
