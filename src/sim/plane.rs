//! The player's plane

use glam::Vec2;

use crate::tuning::Tuning;

/// The player-controlled plane
///
/// Only `pos.y` and `velocity` change after construction; the horizontal
/// anchor stays put while the pipes scroll past.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    pub pos: Vec2,
    /// Vertical velocity (positive is down, canvas units per tick)
    pub velocity: f32,
    /// Added to velocity every tick
    pub gravity: f32,
    /// Velocity set by a flap
    pub lift: f32,
}

impl Plane {
    /// Spawn a plane at rest, a third of the way across and halfway down
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.canvas_width / 3.0, tuning.canvas_height / 2.0),
            velocity: 0.0,
            gravity: tuning.gravity,
            lift: tuning.lift,
        }
    }

    /// Advance one tick: velocity first, then position
    pub fn integrate(&mut self) {
        self.velocity += self.gravity;
        self.pos.y += self.velocity;
    }

    /// Flap. Replaces the current velocity rather than adding to it.
    pub fn apply_impulse(&mut self) {
        self.velocity = self.lift;
    }
}
