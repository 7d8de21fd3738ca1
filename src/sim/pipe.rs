//! Pipe pairs the plane has to fly through
//!
//! A pipe is a top band from the canvas top down to `top` and a bottom band
//! from `bottom` down to the canvas floor. The opening between them is the gap.

use rand::Rng;

use super::plane::Plane;
use crate::consts::{HITBOX_HALF_HEIGHT, HITBOX_HALF_WIDTH};
use crate::tuning::Tuning;

/// Gap edges are snapped to this grid so `bottom - top` is exactly the gap
const EDGE_GRID: f32 = 64.0;

/// A scrolling pipe pair
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Height of the opening
    pub gap: f32,
    /// Y of the top pipe's lower edge (upper edge of the opening)
    pub top: f32,
    /// Set once the plane has flown past the trailing edge
    pub scored: bool,
}

impl Pipe {
    /// Spawn a pipe on the right edge of the canvas with a random gap
    pub fn spawn<R: Rng>(tuning: &Tuning, rng: &mut R) -> Self {
        let range = tuning.gap_top_range();
        let raw = rng.random_range(range.clone());
        Self::with_top(tuning, snap_top(raw, range.start, range.end))
    }

    /// Spawn a pipe on the right edge with a chosen gap position
    pub fn with_top(tuning: &Tuning, top: f32) -> Self {
        Self {
            x: tuning.canvas_width,
            width: tuning.pipe_width,
            gap: tuning.pipe_gap,
            top,
            scored: false,
        }
    }

    /// Y of the bottom pipe's upper edge (lower edge of the opening)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.gap
    }

    /// X of the trailing (right) edge
    #[inline]
    pub fn trailing_edge(&self) -> f32 {
        self.x + self.width
    }

    /// Scroll left
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// True once the whole pipe is left of the canvas
    pub fn is_offscreen(&self) -> bool {
        self.trailing_edge() < 0.0
    }

    /// True once the plane's anchor is strictly past the trailing edge
    pub fn is_passed_by(&self, plane: &Plane) -> bool {
        self.trailing_edge() < plane.pos.x
    }

    /// AABB test of the plane's hit box against the pipe bands
    ///
    /// The plane collides when its box pokes out of the opening vertically
    /// while overlapping the pipe horizontally. Touching an edge exactly is
    /// not a hit.
    pub fn collides_with(&self, plane: &Plane) -> bool {
        let escapes_gap = plane.pos.y - HITBOX_HALF_HEIGHT < self.top
            || plane.pos.y + HITBOX_HALF_HEIGHT > self.bottom();
        let overlaps_x = plane.pos.x + HITBOX_HALF_WIDTH > self.x
            && plane.pos.x - HITBOX_HALF_WIDTH < self.trailing_edge();
        escapes_gap && overlaps_x
    }
}

/// Snap a sampled gap top onto the edge grid without leaving `[min, max]`
///
/// The bounds themselves are pulled inward to the nearest grid line. A range
/// too narrow to hold a grid line keeps the raw sample.
fn snap_top(raw: f32, min: f32, max: f32) -> f32 {
    let lo = (min * EDGE_GRID).ceil() / EDGE_GRID;
    let hi = (max * EDGE_GRID).floor() / EDGE_GRID;
    if lo > hi {
        return raw;
    }
    ((raw * EDGE_GRID).round() / EDGE_GRID).clamp(lo, hi)
}
