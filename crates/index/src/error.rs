/// Errors from constructing a grid file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Domain extents must be positive and finite, bucket capacity at least 1.
    #[error("invalid geometry: width={width}, height={height}, bucket_capacity={bucket_capacity}")]
    InvalidGeometry {
        width: f32,
        height: f32,
        bucket_capacity: usize,
    },
}
