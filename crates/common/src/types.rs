use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier for an agent tracked by the simulation and the index.
///
/// Ids are handed out sequentially by the world, so iteration over a
/// `BTreeMap<AgentId, _>` follows spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Health state carried by an agent. Opaque to the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Health {
    #[default]
    Healthy,
    Infected,
}

impl Health {
    pub fn is_infected(self) -> bool {
        matches!(self, Self::Infected)
    }
}

/// Closed axis-aligned rectangle `[min.x, max.x] x [min.y, max.y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Build a rectangle from its top-left corner and size.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + w, y + h),
        }
    }

    /// Square of side `2 * half` centred on `center`.
    pub fn around(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True if the rectangle has no interior: zero or negative extent on
    /// either axis (or NaN bounds).
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    /// Closed containment test; points on the edges are inside.
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Strict overlap test; rectangles that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Clamp a point into the rectangle.
    pub fn clamp_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }
}
