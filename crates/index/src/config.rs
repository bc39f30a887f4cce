use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Domain and bucket sizing for a [`GridFile`](crate::GridFile).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Domain extent along X. Points are expected in `[0, width)`.
    pub width: f32,
    /// Domain extent along Y. Points are expected in `[0, height)`.
    pub height: f32,
    /// Points a bucket holds before the next insert into it splits it.
    pub bucket_capacity: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            bucket_capacity: 10,
        }
    }
}

impl GridConfig {
    pub fn new(width: f32, height: f32, bucket_capacity: usize) -> Self {
        Self {
            width,
            height,
            bucket_capacity,
        }
    }

    /// Reject empty, inverted or non-finite domains and zero capacity.
    pub fn validate(&self) -> Result<(), GridError> {
        let extent_ok = |v: f32| v.is_finite() && v > 0.0;
        if extent_ok(self.width) && extent_ok(self.height) && self.bucket_capacity >= 1 {
            Ok(())
        } else {
            Err(GridError::InvalidGeometry {
                width: self.width,
                height: self.height,
                bucket_capacity: self.bucket_capacity,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_domain() {
        let config = GridConfig::default();
        assert_eq!(config.width, 800.0);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.bucket_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_geometry() {
        for bad in [
            GridConfig::new(0.0, 600.0, 10),
            GridConfig::new(800.0, -1.0, 10),
            GridConfig::new(800.0, 600.0, 0),
            GridConfig::new(f32::INFINITY, 600.0, 10),
            GridConfig::new(f32::NAN, 600.0, 10),
        ] {
            assert!(matches!(
                bad.validate(),
                Err(GridError::InvalidGeometry { .. })
            ));
        }
    }
}
