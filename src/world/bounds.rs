// bounds.rs - Container walls
//
// The container spans [0, width] x [0, height] in canvas coordinates
// (y grows downward). Walls are inset by a particle's radius.

use crate::sim::Vector;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Check if a disc of `radius` at `pos` lies fully inside the walls
    #[inline]
    pub fn contains(&self, pos: Vector, radius: f32) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }

    /// Reflect a tentative position off the walls.
    ///
    /// Each axis is handled independently, so a corner hit reflects both
    /// components in the same call. The crossing axis is clamped to the
    /// inset wall and its velocity component is turned to point back inside.
    pub fn reflect(&self, pos: &mut Vector, vel: &mut Vector, radius: f32) {
        if pos.x - radius < 0.0 {
            pos.x = radius;
            vel.x = vel.x.abs();
        }
        if pos.x + radius > self.width {
            pos.x = self.width - radius;
            vel.x = -vel.x.abs();
        }
        if pos.y - radius < 0.0 {
            pos.y = radius;
            vel.y = vel.y.abs();
        }
        if pos.y + radius > self.height {
            pos.y = self.height - radius;
            vel.y = -vel.y.abs();
        }
    }
}
