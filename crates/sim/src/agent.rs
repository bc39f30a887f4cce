use glam::Vec2;
use gridfile_common::{Health, Rect};
use serde::{Deserialize, Serialize};

/// A moving member of the population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: Health,
}

impl Agent {
    pub fn new(position: Vec2, velocity: Vec2, health: Health) -> Self {
        Self {
            position,
            velocity,
            health,
        }
    }

    /// Collision square of half side `half` around the agent.
    pub fn bounds(&self, half: f32) -> Rect {
        Rect::around(self.position, half)
    }

    /// Advance one step.
    ///
    /// A step that would put the agent's square into an obstacle reverses the
    /// velocity and keeps the agent in place. Crossing or touching a domain
    /// edge reverses that velocity component and clamps the position back
    /// onto the edge.
    pub fn advance(&mut self, obstacles: &[Rect], domain: &Rect, half: f32) {
        let next = Self {
            position: self.position + self.velocity,
            ..*self
        };
        let square = next.bounds(half);
        if obstacles.iter().any(|o| square.overlaps(o)) {
            self.velocity = -self.velocity;
        } else {
            self.position = next.position;
        }

        if self.position.x <= domain.min.x || self.position.x >= domain.max.x {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y <= domain.min.y || self.position.y >= domain.max.y {
            self.velocity.y = -self.velocity.y;
        }
        self.position = domain.clamp_point(self.position);
    }
}
